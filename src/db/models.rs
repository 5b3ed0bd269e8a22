use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A blog post as exposed by the JSON API.
///
/// `id` is the hex form of the MongoDB ObjectId. It is empty until the
/// post has been inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Markup text, rendered client-side.
    pub content: String,
    pub published: bool,
    pub pub_date: DateTime<Utc>,
    pub author: String,
    pub tags: Vec<String>,
}

/// A standalone page, routed by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub pub_date: DateTime<Utc>,
    pub author: String,
    pub tags: Vec<String>,
}

/// An uploaded photo. The file itself lives under `StaticRoot/photos/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Photo {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub published: bool,
    pub pub_date: DateTime<Utc>,
    pub author: String,
    pub tags: Vec<String>,
}

/// Stored shape shared by the `blog_posts` and `pages` collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    #[serde(rename = "pubdate")]
    pub pub_date: mongodb::bson::DateTime,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Stored shape of the `photos` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub filename: String,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    pub published: bool,
    #[serde(rename = "pubdate")]
    pub pub_date: mongodb::bson::DateTime,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parse a hex ObjectId coming from a URL. Anything malformed is treated as
/// an unknown id.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound(format!("No document with id '{id}'")))
}

/// Fresh identity for a document about to be inserted.
///
/// Caller-supplied ids and dates are never trusted on insert.
fn fresh_identity() -> (ObjectId, mongodb::bson::DateTime) {
    (ObjectId::new(), mongodb::bson::DateTime::now())
}

impl ArticleRecord {
    fn from_parts(
        id: ObjectId,
        pub_date: mongodb::bson::DateTime,
        slug: &str,
        title: &str,
        content: &str,
        published: bool,
        author: &str,
        tags: &[String],
    ) -> Self {
        Self {
            id,
            slug: slug.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            published,
            pub_date,
            author: author.to_string(),
            tags: tags.to_vec(),
        }
    }

    /// Build a record for insertion, with a new id and the current time.
    pub fn new_blog_post(post: &BlogPost) -> Self {
        let (id, now) = fresh_identity();
        Self::from_parts(
            id,
            now,
            &post.slug,
            &post.title,
            &post.content,
            post.published,
            &post.author,
            &post.tags,
        )
    }

    /// Build a record for insertion, with a new id and the current time.
    pub fn new_page(page: &Page) -> Self {
        let (id, now) = fresh_identity();
        Self::from_parts(
            id,
            now,
            &page.slug,
            &page.title,
            &page.content,
            page.published,
            &page.author,
            &page.tags,
        )
    }

    /// Record replacing an existing blog post; keeps the post's own id and date.
    pub fn existing_blog_post(post: &BlogPost) -> Result<Self, AppError> {
        Ok(Self::from_parts(
            parse_object_id(&post.id)?,
            mongodb::bson::DateTime::from_chrono(post.pub_date),
            &post.slug,
            &post.title,
            &post.content,
            post.published,
            &post.author,
            &post.tags,
        ))
    }

    /// Record replacing an existing page; keeps the page's own id and date.
    pub fn existing_page(page: &Page) -> Result<Self, AppError> {
        Ok(Self::from_parts(
            parse_object_id(&page.id)?,
            mongodb::bson::DateTime::from_chrono(page.pub_date),
            &page.slug,
            &page.title,
            &page.content,
            page.published,
            &page.author,
            &page.tags,
        ))
    }
}

impl From<ArticleRecord> for BlogPost {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            slug: record.slug,
            title: record.title,
            content: record.content,
            published: record.published,
            pub_date: record.pub_date.to_chrono(),
            author: record.author,
            tags: record.tags,
        }
    }
}

impl From<ArticleRecord> for Page {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            slug: record.slug,
            title: record.title,
            content: record.content,
            published: record.published,
            pub_date: record.pub_date.to_chrono(),
            author: record.author,
            tags: record.tags,
        }
    }
}

impl PhotoRecord {
    /// Build a record for insertion, with a new id and the current time.
    pub fn new_photo(photo: &Photo) -> Self {
        let (id, now) = fresh_identity();
        Self {
            id,
            filename: photo.filename.clone(),
            mime_type: photo.mime_type.clone(),
            published: photo.published,
            pub_date: now,
            author: photo.author.clone(),
            tags: photo.tags.clone(),
        }
    }
}

impl From<PhotoRecord> for Photo {
    fn from(record: PhotoRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            filename: record.filename,
            mime_type: record.mime_type,
            published: record.published,
            pub_date: record.pub_date.to_chrono(),
            author: record.author,
            tags: record.tags,
        }
    }
}
