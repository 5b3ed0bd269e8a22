use axum::extract::{Multipart, State};
use axum_extra::extract::PrivateCookieJar;
use chrono::Utc;
use serde::Serialize;

use crate::api::forms::{parse_published, parse_tags};
use crate::app::AppState;
use crate::auth::session::is_superuser;
use crate::db::models::Photo;
use crate::db::photo_repository::PhotoRepository;
use crate::error::AppError;
use crate::storage::client::StorageClient;

/// Storage prefix (below the static root) for uploaded photos.
pub const PHOTO_PREFIX: &str = "photos";

/// Request body cap for `POST /api/photo/add/`.
pub const MAX_PHOTO_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct PhotoList {
    pub photos: Vec<Photo>,
}

/// Response from a successful photo upload.
#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    pub result: &'static str,
    #[serde(rename = "photoId")]
    pub photo_id: String,
    /// Public URL of the stored file.
    pub url: String,
}

/// A photo upload collected from a multipart form.
#[derive(Debug, Default)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub tags: Vec<String>,
    pub published: Option<bool>,
}

/// Keep ASCII alphanumerics, dots and hyphens; anything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Store the photo bytes and record the photo.
pub async fn store_photo(
    repo: &dyn PhotoRepository,
    storage: &dyn StorageClient,
    upload: PhotoUpload,
    author: &str,
) -> Result<Photo, AppError> {
    if !upload.content_type.starts_with("image/") {
        return Err(AppError::BadRequest("Only image files are allowed".into()));
    }
    if upload.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let filename = format!(
        "{}_{}",
        Utc::now().timestamp_millis(),
        sanitize_file_name(&upload.file_name)
    );

    let key = format!("{PHOTO_PREFIX}/{filename}");
    storage.put_object(&key, upload.data).await?;

    let inserted = repo
        .insert(Photo {
            id: String::new(),
            filename,
            mime_type: upload.content_type,
            published: upload.published.unwrap_or(true),
            pub_date: Utc::now(),
            author: author.to_string(),
            tags: upload.tags,
        })
        .await;

    // No record, no file.
    if inserted.is_err() {
        if let Err(e) = storage.delete_object(&key).await {
            tracing::warn!(key = %key, "Failed to remove orphaned photo: {e}");
        }
    }
    inserted
}

/// Public URL for a stored photo.
pub fn photo_url(photo: &Photo) -> String {
    format!("/static/{PHOTO_PREFIX}/{}", photo.filename)
}

/// `GET /api/photo/`: published photos, newest first; drafts too for a superuser.
pub async fn list_photos_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<axum::Json<PhotoList>, AppError> {
    let only_published = !is_superuser(&jar, &state.config.auth_secret);
    let photos = state.photos.list(only_published).await?;
    Ok(axum::Json(PhotoList { photos }))
}

/// `POST /api/photo/add/`: superuser only.
///
/// Multipart form with a `file` field and optional `Tags` / `Published` fields.
pub async fn upload_photo_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<axum::Json<PhotoUploadResponse>, AppError> {
    let mut upload: Option<PhotoUpload> = None;
    let mut tags = Vec::new();
    let mut published = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                upload = Some(PhotoUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                    ..PhotoUpload::default()
                });
            }
            "Tags" | "Published" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;
                if name == "Tags" {
                    tags = parse_tags(Some(&value));
                } else {
                    published = parse_published(Some(&value))?;
                }
            }
            _ => continue,
        }
    }

    let mut upload =
        upload.ok_or_else(|| AppError::BadRequest("No file field found in request".into()))?;
    upload.tags = tags;
    upload.published = published;

    let photo = store_photo(
        state.photos.as_ref(),
        state.storage.as_ref(),
        upload,
        &state.config.default_author,
    )
    .await?;
    tracing::info!(id = %photo.id, filename = %photo.filename, "Uploaded photo");

    Ok(axum::Json(PhotoUploadResponse {
        result: "ok",
        url: photo_url(&photo),
        photo_id: photo.id,
    }))
}
