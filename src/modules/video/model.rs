use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// New video row to insert into database
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub thumbnail_path: String,
}

/// Metadata fields of an upload form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VideoUploadMeta {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: String,
    pub category_ids: Vec<Uuid>,
    pub new_categories: Vec<String>,
}

/// The uploaded file exactly as the client declared it: name, content type
/// and bytes are all untrusted until validated.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
