use actix_files::NamedFile;
use actix_web::{
    get,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, web, HttpRequest, HttpResponse,
};
use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{error, success},
    modules::{
        category::repository_pg::CategoryPgRepository,
        video::{
            model::{UploadedFile, VideoUploadMeta},
            repository_pg::VideoPgRepository,
            schema::{VideoDetail, VideoUploadResponse},
            service::VideoService,
        },
    },
};

type VideoSvc = VideoService<VideoPgRepository, CategoryPgRepository>;

#[get("/")]
pub async fn get_videos(
    video_svc: web::Data<VideoSvc>,
) -> Result<success::Success<Vec<VideoDetail>>, error::Error> {
    let videos = video_svc.get_all().await?;

    Ok(success::Success::ok(Some(videos)))
}

#[get("/{video_id}")]
pub async fn get_video(
    video_svc: web::Data<VideoSvc>,
    video_id: web::Path<Uuid>,
) -> Result<success::Success<VideoDetail>, error::Error> {
    match video_svc.get_by_id(&video_id).await {
        Ok(Some(video)) => Ok(success::Success::ok(Some(video))),
        Ok(None) => Err(error::Error::not_found("Video not found")),
        Err(e) => Err(error::Error::from(e)),
    }
}

/// Upload handler: parses the multipart form (`title`, `description`,
/// repeated `categoryIds`/`newCategories`, a single `file` field) and hands
/// the pipeline a fully buffered file. The byte cap is enforced while
/// draining so an oversized body is rejected before it is fully received.
#[post("/")]
pub async fn upload_video(
    mut payload: Multipart,
    video_svc: web::Data<VideoSvc>,
) -> Result<success::Success<VideoUploadResponse>, error::Error> {
    let mut meta = VideoUploadMeta::default();
    let mut file: Option<UploadedFile> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|_| error::Error::bad_request("Malformed multipart payload"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => meta.title = read_text_field(&mut field).await?,
            "description" => meta.description = read_text_field(&mut field).await?,
            "categoryIds" => {
                let text = read_text_field(&mut field).await?;
                for part in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let id = Uuid::parse_str(part).map_err(|_| {
                        error::Error::bad_request("categoryIds must contain valid UUIDs")
                    })?;
                    meta.category_ids.push(id);
                }
            }
            "newCategories" => {
                let text = read_text_field(&mut field).await?;
                meta.new_categories.extend(
                    text.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
                );
            }
            "file" => {
                if file.is_some() {
                    log::warn!("Upload attempt with multiple files");
                    return Err(error::Error::bad_request(
                        "Only one file can be uploaded at a time",
                    ));
                }
                file = Some(read_file_field(&mut field, &video_svc).await?);
            }
            _ => {
                // Unknown field, drain and ignore.
                while field
                    .try_next()
                    .await
                    .map_err(|_| error::Error::bad_request("Malformed multipart payload"))?
                    .is_some()
                {}
            }
        }
    }

    let file = file.ok_or_else(|| {
        log::warn!("Upload attempt with no file");
        error::Error::bad_request("No video file provided")
    })?;

    meta.validate().map_err(|e| error::Error::bad_request(e.to_string()))?;

    let response = video_svc.upload(meta, file).await?;

    Ok(success::Success::created(Some(response)).message("Video uploaded successfully"))
}

/// Streaming handler: the service resolves the stored file; `NamedFile`
/// performs the Range negotiation and partial-content responses.
#[get("/{video_id}/stream")]
pub async fn stream_video(
    video_svc: web::Data<VideoSvc>,
    video_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<HttpResponse, error::Error> {
    let media = video_svc.get_stream(&video_id).await?;

    let named = NamedFile::from_file(media.file, &media.path)
        .map_err(|err| {
            log::error!("Failed to open video for streaming: {err}");
            error::Error::internal_server_error()
        })?
        .set_content_type(media.content_type)
        .set_content_disposition(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(media.file_name)],
        });

    Ok(named.into_response(&req))
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String, error::Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|_| error::Error::bad_request("Malformed multipart payload"))?
    {
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes)
        .map_err(|_| error::Error::bad_request("Form fields must be valid UTF-8"))
}

async fn read_file_field(
    field: &mut actix_multipart::Field,
    video_svc: &web::Data<VideoSvc>,
) -> Result<UploadedFile, error::Error> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string)
        .ok_or_else(|| error::Error::bad_request("Missing filename"))?;

    let content_type = field
        .content_type()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let limit = video_svc.upload_limit_bytes();
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|_| error::Error::bad_request("Malformed multipart payload"))?
    {
        if bytes.len() + chunk.len() > limit {
            log::warn!("Upload attempt with file exceeding size limit");
            return Err(error::Error::payload_too_large(format!(
                "File size exceeds the maximum allowed size of {}",
                video_svc.upload_limit_formatted()
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(UploadedFile { file_name, content_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::modules::{
        category::service::CategoryService,
        media::{
            store::MediaStore,
            thumbnail::{ThumbnailConfig, ThumbnailService},
            validation::{FileValidator, UploadLimits},
        },
    };

    fn test_service(base: &std::path::Path) -> VideoSvc {
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

    #[actix_web::test]
    async fn truncated_file_field_is_a_bad_request() {
        // The error response reads the environment for its CORS header.
        std::env::set_var("DATABASE_URL", "postgres://postgres@localhost:1/video_store_unused");

        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_service(dir.path())))
                .service(upload_video),
        )
        .await;

        // Body ends mid-file-field, with no closing boundary.
        let body = concat!(
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"file\"; filename=\"clip.mp4\"\r\n",
            "Content-Type: video/mp4\r\n",
            "\r\n",
            "partial bytes"
        );
        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "multipart/form-data; boundary=boundary"))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
