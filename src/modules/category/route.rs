use actix_web::web::{scope, ServiceConfig};

use crate::modules::category::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/categories").service(get_categories).service(create_category));
}
