use actix_web::web::{scope, ServiceConfig};

use crate::modules::video::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/videos")
            .service(get_videos)
            .service(stream_video)
            .service(get_video)
            .service(upload_video),
    );
}
