use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Filter selecting either every document or only published ones.
pub fn published_filter(only_published: bool) -> Document {
    if only_published {
        doc! { "published": true }
    } else {
        doc! {}
    }
}

/// Run a sorted `find` and drain the cursor.
pub async fn find_sorted<T>(
    collection: &Collection<T>,
    filter: Document,
    sort: Document,
) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let options = FindOptions::builder().sort(sort).build();

    let cursor = collection
        .find(filter)
        .with_options(options)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}
