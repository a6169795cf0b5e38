use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::{
    configs::connect_database,
    modules::{
        category::{repository_pg::CategoryPgRepository, service::CategoryService},
        media::{
            store::MediaStore,
            thumbnail::{ThumbnailConfig, ThumbnailService},
            validation::{FileValidator, UploadLimits},
        },
        video::{repository_pg::VideoPgRepository, service::VideoService},
    },
};

mod api;
mod configs;
mod constants;
mod modules;
mod test;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let base_dir = std::env::current_dir()?;

    let video_repo = VideoPgRepository::new(db_pool.clone());
    let category_repo = CategoryPgRepository::new(db_pool.clone());

    let validator = FileValidator::new(UploadLimits { max_file_size_mb: ENV.max_file_size_mb });
    let store = MediaStore::new(base_dir.clone(), ENV.upload_path.clone());
    let thumbnails = ThumbnailService::new(
        base_dir,
        ThumbnailConfig {
            thumbnail_dir: ENV.thumbnail_path.clone(),
            width: ENV.thumbnail_width,
            height: ENV.thumbnail_height,
            ffmpeg_path: ENV.ffmpeg_path.clone(),
            timeout: Duration::from_secs(ENV.thumbnail_timeout_secs),
        },
    );
    let thumbnail_dir = thumbnails.thumbnail_directory();

    let category_service = CategoryService::with_dependencies(Arc::new(category_repo));
    let video_service = VideoService::with_dependencies(
        Arc::new(video_repo),
        category_service.clone(),
        validator,
        store,
        thumbnails,
    );

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allowed_origin(ENV.frontend_url.as_str())
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(web::Data::new(video_service.clone()))
            .app_data(web::Data::new(category_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(actix_files::Files::new("/uploads/thumbnails", thumbnail_dir.clone()))
            .service(
                web::scope("/api")
                    .configure(modules::video::route::configure)
                    .configure(modules::category::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
