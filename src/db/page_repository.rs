use async_trait::async_trait;

use crate::db::models::Page;
use crate::error::AppError;

/// Repository trait for pages.
///
/// Pages are routed by slug. Slug uniqueness is not enforced here: when
/// several pages share a slug, slug lookups resolve to the oldest one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// List pages ordered by title.
    async fn list(&self, only_published: bool) -> Result<Vec<Page>, AppError>;

    /// Find a page by its id.
    async fn get(&self, id: &str) -> Result<Page, AppError>;

    /// Find a page by its slug, published or not.
    async fn get_by_slug(&self, slug: &str) -> Result<Page, AppError>;

    /// Whether a published page answers to this slug.
    async fn exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Store a new page with a fresh id and publish date. Returns the stored page.
    async fn insert(&self, page: Page) -> Result<Page, AppError>;

    /// Replace the stored page having the same id.
    async fn update(&self, page: &Page) -> Result<(), AppError>;

    /// Remove a page by id.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// MongoDB implementation of the PageRepository.
pub struct MongoPageRepository {
    collection: mongodb::Collection<crate::db::models::ArticleRecord>,
}

impl MongoPageRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("pages"),
        }
    }
}

#[async_trait]
impl PageRepository for MongoPageRepository {
    async fn list(&self, only_published: bool) -> Result<Vec<Page>, AppError> {
        use crate::db::query::{find_sorted, published_filter};
        use mongodb::bson::doc;

        let records = find_sorted(
            &self.collection,
            published_filter(only_published),
            doc! { "title": 1 },
        )
        .await?;

        Ok(records.into_iter().map(Page::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Page, AppError> {
        use crate::db::models::parse_object_id;
        use mongodb::bson::doc;

        let oid = parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .map(Page::from)
            .ok_or_else(|| AppError::NotFound(format!("Page '{id}' not found")))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Page, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOneOptions;

        let options = FindOneOptions::builder()
            .sort(doc! { "pubdate": 1, "_id": 1 })
            .build();

        self.collection
            .find_one(doc! { "slug": slug })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .map(Page::from)
            .ok_or_else(|| AppError::NotFound(format!("Page \"{slug}\" not found")))
    }

    async fn exists(&self, slug: &str) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        let count = self
            .collection
            .count_documents(doc! { "slug": slug, "published": true })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count >= 1)
    }

    async fn insert(&self, page: Page) -> Result<Page, AppError> {
        use crate::db::models::ArticleRecord;

        let record = ArticleRecord::new_page(&page);

        self.collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(id = %record.id, slug = %record.slug, "Inserted page");
        Ok(Page::from(record))
    }

    async fn update(&self, page: &Page) -> Result<(), AppError> {
        use crate::db::models::ArticleRecord;
        use mongodb::bson::doc;

        let record = ArticleRecord::existing_page(page)?;

        let result = self
            .collection
            .replace_one(doc! { "_id": record.id }, &record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Page '{}' not found", page.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        use crate::db::models::parse_object_id;
        use mongodb::bson::doc;

        let oid = parse_object_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Page '{id}' not found")));
        }
        Ok(())
    }
}
