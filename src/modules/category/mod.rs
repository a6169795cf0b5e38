pub mod handle;
pub mod model;
pub mod repository;
pub mod repository_pg;
pub mod route;
pub mod schema;
pub mod service;

pub use repository::CategoryRepository;
pub use repository_pg::CategoryPgRepository;
pub use schema::{CategoryDto, CategoryEntity};
pub use service::CategoryService;
