pub mod handle;
pub mod model;
pub mod repository;
pub mod repository_pg;
pub mod route;
pub mod schema;
pub mod service;

pub use model::{NewVideo, UploadedFile, VideoUploadMeta};
pub use repository::VideoRepository;
pub use repository_pg::VideoPgRepository;
pub use schema::{VideoDetail, VideoEntity, VideoUploadResponse};
pub use service::VideoService;
