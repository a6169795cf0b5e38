pub mod category;
pub mod media;
pub mod video;
