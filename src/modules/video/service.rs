use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        category::{repository::CategoryRepository, schema::CategoryDto, service::CategoryService},
        media::{
            sanitize::sanitize_file_name,
            store::{MediaStore, OpenMedia},
            thumbnail::ThumbnailService,
            validation::{FileValidator, ValidationFailure, ValidationOutcome},
        },
        video::{
            model::{NewVideo, UploadedFile, VideoUploadMeta},
            repository::VideoRepository,
            schema::{VideoDetail, VideoEntity, VideoUploadResponse},
        },
    },
};

/// Orchestrates the upload pipeline: validate, sanitize and persist the
/// bytes, derive a thumbnail best-effort, then record the metadata row.
#[derive(Clone)]
pub struct VideoService<R, C>
where
    R: VideoRepository + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    video_repo: Arc<R>,
    category_svc: CategoryService<C>,
    validator: FileValidator,
    store: MediaStore,
    thumbnails: ThumbnailService,
}

impl<R, C> VideoService<R, C>
where
    R: VideoRepository + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    pub fn with_dependencies(
        video_repo: Arc<R>,
        category_svc: CategoryService<C>,
        validator: FileValidator,
        store: MediaStore,
        thumbnails: ThumbnailService,
    ) -> Self {
        Self { video_repo, category_svc, validator, store, thumbnails }
    }

    pub fn upload_limit_bytes(&self) -> usize {
        self.validator.max_file_size_bytes() as usize
    }

    pub fn upload_limit_formatted(&self) -> String {
        self.validator.max_file_size_formatted()
    }

    /// Fails only on validation or when the bytes cannot be durably written;
    /// a missing thumbnail is a fully valid end state.
    pub async fn upload(
        &self,
        meta: VideoUploadMeta,
        file: UploadedFile,
    ) -> Result<VideoUploadResponse, error::SystemError> {
        match self.validator.validate(&file.file_name, &file.content_type, file.bytes.len() as i64)
        {
            ValidationOutcome::Valid => {}
            ValidationOutcome::Invalid(failure) => {
                log::warn!("Upload rejected ({:?}): {}", failure, file.file_name);
                return Err(self.validation_error(failure));
            }
        }

        let sanitized_name = sanitize_file_name(&file.file_name);
        let stored = self.store.write(&sanitized_name, &file.bytes).await?;

        let thumbnail_path = self.generate_thumbnail_safely(&stored.relative_path).await;

        let categories =
            self.category_svc.resolve_or_create(&meta.category_ids, &meta.new_categories).await?;

        let mut tx = self.video_repo.get_pool().begin().await?;

        let new_video = NewVideo {
            title: meta.title,
            description: meta.description,
            file_path: stored.relative_path,
            thumbnail_path,
        };
        let video = self.video_repo.create(&new_video, tx.as_mut()).await?;

        for category in &categories {
            self.video_repo.link_category(&video.id, &category.id, tx.as_mut()).await?;
        }

        tx.commit().await?;

        log::info!("Video record created with ID: {}", video.id);

        Ok(VideoUploadResponse {
            id: video.id,
            title: video.title,
            message: "Video uploaded successfully".to_string(),
            thumbnail_url: video.thumbnail_path,
        })
    }

    fn validation_error(&self, failure: ValidationFailure) -> error::SystemError {
        match failure {
            ValidationFailure::BadExtension | ValidationFailure::BadMimeType => {
                error::SystemError::unsupported_media_type(format!(
                    "Invalid file type. Allowed types: {}",
                    self.validator.allowed_extensions()
                ))
            }
            ValidationFailure::TooLarge => error::SystemError::payload_too_large(format!(
                "File size exceeds the maximum allowed size of {}",
                self.validator.max_file_size_formatted()
            )),
            ValidationFailure::Empty => {
                error::SystemError::bad_request("Uploaded video file is empty")
            }
        }
    }

    /// Thumbnail extraction is best-effort: any failure is logged and folded
    /// into an empty path instead of aborting the upload.
    async fn generate_thumbnail_safely(&self, video_path: &str) -> String {
        match self.thumbnails.generate(video_path).await {
            Ok(thumbnail_path) => thumbnail_path,
            Err(err) => {
                log::error!(
                    "Failed to generate thumbnail for video {}: {}. \
                     Video will be saved without thumbnail.",
                    video_path,
                    err
                );
                String::new()
            }
        }
    }

    pub async fn get_all(&self) -> Result<Vec<VideoDetail>, error::SystemError> {
        let videos = self.video_repo.find_all().await?;
        let ids: Vec<Uuid> = videos.iter().map(|v| v.id).collect();

        let mut by_video: HashMap<Uuid, Vec<CategoryDto>> = HashMap::new();
        for row in self.video_repo.find_categories_for(&ids).await? {
            by_video
                .entry(row.video_id)
                .or_default()
                .push(CategoryDto { id: row.category_id, name: row.name });
        }

        Ok(videos
            .into_iter()
            .map(|video| {
                let categories = by_video.remove(&video.id).unwrap_or_default();
                to_detail(video, categories)
            })
            .collect())
    }

    pub async fn get_by_id(&self, video_id: &Uuid) -> Result<Option<VideoDetail>, error::SystemError> {
        let Some(video) = self.video_repo.find_by_id(video_id).await? else {
            return Ok(None);
        };

        let categories = self
            .video_repo
            .find_categories_for(&[video.id])
            .await?
            .into_iter()
            .map(|row| CategoryDto { id: row.category_id, name: row.name })
            .collect();

        Ok(Some(to_detail(video, categories)))
    }

    /// Opens the stored file behind a video row for range-capable delivery.
    /// A missing row and a file deleted out-of-band both map to NotFound.
    pub async fn get_stream(&self, video_id: &Uuid) -> Result<OpenMedia, error::SystemError> {
        let video = self
            .video_repo
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Video not found"))?;

        self.store.open(&video.file_path).await
    }
}

fn to_detail(video: VideoEntity, categories: Vec<CategoryDto>) -> VideoDetail {
    VideoDetail {
        id: video.id,
        title: video.title,
        description: video.description,
        thumbnail_url: video.thumbnail_path,
        created_at: video.created_at,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::category::repository_pg::CategoryPgRepository;
    use crate::modules::media::thumbnail::ThumbnailConfig;
    use crate::modules::media::validation::UploadLimits;
    use crate::modules::video::repository_pg::VideoPgRepository;
    use sqlx::postgres::PgPoolOptions;
    use std::path::Path;
    use std::time::Duration;

    // The pool is lazy and points nowhere: any query would fail, so these
    // tests also prove the rejection paths never reach the database.
    fn service(base: &Path) -> VideoService<VideoPgRepository, CategoryPgRepository> {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost:1/video_store_unused")
            .unwrap();
        let category_svc =
            CategoryService::with_dependencies(Arc::new(CategoryPgRepository::new(pool.clone())));

        VideoService::with_dependencies(
            Arc::new(VideoPgRepository::new(pool)),
            category_svc,
            FileValidator::new(UploadLimits { max_file_size_mb: 1 }),
            MediaStore::new(base, "uploads/videos"),
            ThumbnailService::new(
                base,
                ThumbnailConfig {
                    ffmpeg_path: "/nonexistent/ffmpeg".to_string(),
                    timeout: Duration::from_secs(1),
                    ..ThumbnailConfig::default()
                },
            ),
        )
    }

    fn upload_of(name: &str, content_type: &str, bytes: Vec<u8>) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }

    fn storage_root_is_empty(base: &Path) -> bool {
        let root = base.join("uploads/videos");
        !root.exists() || std::fs::read_dir(root).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn bad_extension_is_rejected_before_any_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let err = svc
            .upload(VideoUploadMeta::default(), upload_of("clip.mkv", "video/mp4", vec![0; 16]))
            .await
            .unwrap_err();

        assert!(matches!(err, error::SystemError::UnsupportedMediaType(_)));
        assert!(storage_root_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected_before_any_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let oversized = vec![0u8; 1024 * 1024 + 1];

        let err = svc
            .upload(VideoUploadMeta::default(), upload_of("clip.mp4", "video/mp4", oversized))
            .await
            .unwrap_err();

        assert!(matches!(err, error::SystemError::PayloadTooLarge(_)));
        assert!(storage_root_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn empty_upload_is_rejected_before_any_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let err = svc
            .upload(VideoUploadMeta::default(), upload_of("clip.mp4", "video/mp4", Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, error::SystemError::BadRequest(_)));
        assert!(storage_root_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn thumbnail_failure_folds_into_an_empty_path() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let stored = svc.store.write("clip.mp4", b"fake video bytes").await.unwrap();

        assert_eq!(svc.generate_thumbnail_safely(&stored.relative_path).await, "");
    }
}
