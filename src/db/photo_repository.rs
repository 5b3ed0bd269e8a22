use async_trait::async_trait;

use crate::db::models::Photo;
use crate::error::AppError;

/// Repository trait for photo metadata. Photos are append-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// List photos, most recent first.
    async fn list(&self, only_published: bool) -> Result<Vec<Photo>, AppError>;

    /// Store a new photo with a fresh id and publish date. Returns the stored photo.
    async fn insert(&self, photo: Photo) -> Result<Photo, AppError>;
}

/// MongoDB implementation of the PhotoRepository.
pub struct MongoPhotoRepository {
    collection: mongodb::Collection<crate::db::models::PhotoRecord>,
}

impl MongoPhotoRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("photos"),
        }
    }
}

#[async_trait]
impl PhotoRepository for MongoPhotoRepository {
    async fn list(&self, only_published: bool) -> Result<Vec<Photo>, AppError> {
        use crate::db::query::{find_sorted, published_filter};
        use mongodb::bson::doc;

        let records = find_sorted(
            &self.collection,
            published_filter(only_published),
            doc! { "pubdate": -1 },
        )
        .await?;

        Ok(records.into_iter().map(Photo::from).collect())
    }

    async fn insert(&self, photo: Photo) -> Result<Photo, AppError> {
        use crate::db::models::PhotoRecord;

        let record = PhotoRecord::new_photo(&photo);

        self.collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(id = %record.id, filename = %record.filename, "Inserted photo");
        Ok(Photo::from(record))
    }
}
