use axum::body::Bytes;
use axum::extract::{Path, State};
use axum_extra::extract::PrivateCookieJar;
use chrono::Utc;
use serde::Serialize;

use crate::api::forms::{ContentInput, FormFields};
use crate::app::AppState;
use crate::auth::session::is_superuser;
use crate::db::blog_repository::BlogPostRepository;
use crate::db::models::BlogPost;
use crate::error::AppError;
use crate::slug::slugify;

/// Response for `GET /api/blog/post/`.
#[derive(Debug, Serialize)]
pub struct BlogPostList {
    pub posts: Vec<BlogPost>,
}

/// Response carrying a single post.
#[derive(Debug, Serialize)]
pub struct BlogPostEnvelope {
    pub result: &'static str,
    pub post: BlogPost,
}

/// Response for create and delete, naming the affected post.
#[derive(Debug, Serialize)]
pub struct BlogPostIdEnvelope {
    pub result: &'static str,
    #[serde(rename = "postId")]
    pub post_id: String,
}

/// Create a post from a submitted form.
///
/// The slug is always derived from the title; the store assigns id and date.
pub async fn create_blog_post(
    repo: &dyn BlogPostRepository,
    fields: &FormFields,
    author: &str,
) -> Result<BlogPost, AppError> {
    let input = ContentInput::from_form(fields, false)?;

    let post = BlogPost {
        id: String::new(),
        slug: slugify(&input.title),
        title: input.title,
        content: input.content,
        published: input.published.unwrap_or(true),
        pub_date: Utc::now(),
        author: author.to_string(),
        tags: input.tags,
    };

    repo.insert(post).await
}

/// Apply a submitted form to an existing post.
///
/// The form is validated before the store is touched, so an invalid edit
/// leaves the stored post unchanged.
pub async fn update_blog_post(
    repo: &dyn BlogPostRepository,
    id: &str,
    fields: &FormFields,
) -> Result<BlogPost, AppError> {
    let input = ContentInput::from_form(fields, true)?;

    let mut post = repo.get(id).await?;
    post.title = input.title;
    post.content = input.content;
    if let Some(slug) = input.slug {
        post.slug = slug;
    }
    post.tags = input.tags;
    if let Some(published) = input.published {
        post.published = published;
    }

    repo.update(&post).await?;
    Ok(post)
}

/// `GET /api/blog/post/`: published posts, newest first.
///
/// A logged-in superuser also sees drafts.
pub async fn list_blog_posts_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<axum::Json<BlogPostList>, AppError> {
    let only_published = !is_superuser(&jar, &state.config.auth_secret);
    let posts = state.blog_posts.list(only_published).await?;
    Ok(axum::Json(BlogPostList { posts }))
}

/// `GET /api/blog/post/{id}/`
pub async fn blog_post_info_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::Json<BlogPostEnvelope>, AppError> {
    let post = state.blog_posts.get(&id).await?;
    Ok(axum::Json(BlogPostEnvelope { result: "ok", post }))
}

/// `POST /api/blog/post/{id}/`: superuser only.
pub async fn update_blog_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<axum::Json<BlogPostEnvelope>, AppError> {
    let fields = FormFields::parse(&body);
    let post = update_blog_post(state.blog_posts.as_ref(), &id, &fields).await?;
    tracing::info!(id = %post.id, "Updated blog post");
    Ok(axum::Json(BlogPostEnvelope { result: "ok", post }))
}

/// `POST /api/blog/post/add/`: superuser only.
pub async fn add_blog_post_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<axum::Json<BlogPostIdEnvelope>, AppError> {
    let fields = FormFields::parse(&body);
    let post = create_blog_post(
        state.blog_posts.as_ref(),
        &fields,
        &state.config.default_author,
    )
    .await?;
    tracing::info!(id = %post.id, slug = %post.slug, "Created blog post");
    Ok(axum::Json(BlogPostIdEnvelope {
        result: "ok",
        post_id: post.id,
    }))
}

/// `POST /api/blog/post/{id}/delete/`: superuser only.
pub async fn delete_blog_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::Json<BlogPostIdEnvelope>, AppError> {
    state.blog_posts.delete(&id).await?;
    tracing::info!(id = %id, "Deleted blog post");
    Ok(axum::Json(BlogPostIdEnvelope {
        result: "ok",
        post_id: id,
    }))
}
