pub mod sanitize;
pub mod store;
pub mod thumbnail;
pub mod validation;

pub use sanitize::sanitize_file_name;
pub use store::{MediaStore, OpenMedia, StoredMedia};
pub use thumbnail::{ProcessExecution, ThumbnailConfig, ThumbnailService};
pub use validation::{FileValidator, UploadLimits, ValidationFailure, ValidationOutcome};
