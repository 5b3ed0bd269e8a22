use async_trait::async_trait;

use crate::db::models::BlogPost;
use crate::error::AppError;

/// Repository trait for blog posts.
///
/// This trait allows mocking the database layer in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// List posts, most recent first.
    async fn list(&self, only_published: bool) -> Result<Vec<BlogPost>, AppError>;

    /// Find a post by its id.
    async fn get(&self, id: &str) -> Result<BlogPost, AppError>;

    /// Store a new post. The id and publish date are always assigned here,
    /// whatever the caller put in them. Returns the stored post.
    async fn insert(&self, post: BlogPost) -> Result<BlogPost, AppError>;

    /// Replace the stored post having the same id.
    async fn update(&self, post: &BlogPost) -> Result<(), AppError>;

    /// Remove a post by id.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// MongoDB implementation of the BlogPostRepository.
pub struct MongoBlogPostRepository {
    collection: mongodb::Collection<crate::db::models::ArticleRecord>,
}

impl MongoBlogPostRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("blog_posts"),
        }
    }
}

#[async_trait]
impl BlogPostRepository for MongoBlogPostRepository {
    async fn list(&self, only_published: bool) -> Result<Vec<BlogPost>, AppError> {
        use crate::db::query::{find_sorted, published_filter};
        use mongodb::bson::doc;

        let records = find_sorted(
            &self.collection,
            published_filter(only_published),
            doc! { "pubdate": -1 },
        )
        .await?;

        Ok(records.into_iter().map(BlogPost::from).collect())
    }

    async fn get(&self, id: &str) -> Result<BlogPost, AppError> {
        use crate::db::models::parse_object_id;
        use mongodb::bson::doc;

        let oid = parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .map(BlogPost::from)
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{id}' not found")))
    }

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, AppError> {
        use crate::db::models::ArticleRecord;

        let record = ArticleRecord::new_blog_post(&post);

        self.collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(id = %record.id, slug = %record.slug, "Inserted blog post");
        Ok(BlogPost::from(record))
    }

    async fn update(&self, post: &BlogPost) -> Result<(), AppError> {
        use crate::db::models::ArticleRecord;
        use mongodb::bson::doc;

        let record = ArticleRecord::existing_blog_post(post)?;

        let result = self
            .collection
            .replace_one(doc! { "_id": record.id }, &record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Blog post '{}' not found", post.id)));
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
            return Err(AppError::NotFound(format!("Blog post '{id}' not found")));
        }
        Ok(())
    }
}
