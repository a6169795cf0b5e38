use actix_web::{get, post, web};
use validator::Validate;

use crate::{
    api::{error, success},
    modules::category::{
        model::CreateCategoryRequest,
        repository_pg::CategoryPgRepository,
        schema::CategoryDto,
        service::CategoryService,
    },
};

type CategorySvc = CategoryService<CategoryPgRepository>;

#[get("/")]
pub async fn get_categories(
    category_svc: web::Data<CategorySvc>,
) -> Result<success::Success<Vec<CategoryDto>>, error::Error> {
    let categories = category_svc.get_all().await?;
    let categories = categories.into_iter().map(CategoryDto::from).collect();

    Ok(success::Success::ok(Some(categories)))
}

#[post("/")]
pub async fn create_category(
    category_svc: web::Data<CategorySvc>,
    body: web::Json<CreateCategoryRequest>,
) -> Result<success::Success<CategoryDto>, error::Error> {
    let body = body.into_inner();
    body.validate().map_err(|e| error::Error::bad_request(e.to_string()))?;

    let category = category_svc.create(&body.name).await?;

    Ok(success::Success::created(Some(CategoryDto::from(category)))
        .message("Category created successfully"))
}
