use axum::body::Bytes;
use axum::extract::{Path, State};
use axum_extra::extract::PrivateCookieJar;
use chrono::Utc;
use serde::Serialize;

use crate::api::forms::{ContentInput, FormFields};
use crate::app::AppState;
use crate::auth::session::is_superuser;
use crate::db::models::{parse_object_id, Page};
use crate::db::page_repository::PageRepository;
use crate::error::AppError;

/// Response for `GET /api/page/`.
#[derive(Debug, Serialize)]
pub struct PageList {
    pub pages: Vec<Page>,
}

/// Response carrying a single page.
#[derive(Debug, Serialize)]
pub struct PageEnvelope {
    pub result: &'static str,
    pub page: Page,
}

/// Response for create and delete, naming the affected page.
#[derive(Debug, Serialize)]
pub struct PageIdEnvelope {
    pub result: &'static str,
    #[serde(rename = "pageId")]
    pub page_id: String,
}

/// Create a page from a submitted form. `Slug` is mandatory for pages.
pub async fn create_page(
    repo: &dyn PageRepository,
    fields: &FormFields,
    author: &str,
) -> Result<Page, AppError> {
    let input = ContentInput::from_form(fields, true)?;

    let page = Page {
        id: String::new(),
        slug: input.slug.unwrap_or_default(),
        title: input.title,
        content: input.content,
        published: input.published.unwrap_or(true),
        pub_date: Utc::now(),
        author: author.to_string(),
        tags: input.tags,
    };

    repo.insert(page).await
}

/// Apply a submitted form to an existing page, validating before any store access.
pub async fn update_page(
    repo: &dyn PageRepository,
    id: &str,
    fields: &FormFields,
) -> Result<Page, AppError> {
    let input = ContentInput::from_form(fields, true)?;

    let mut page = repo.get(id).await?;
    page.title = input.title;
    page.content = input.content;
    if let Some(slug) = input.slug {
        page.slug = slug;
    }
    page.tags = input.tags;
    if let Some(published) = input.published {
        page.published = published;
    }

    repo.update(&page).await?;
    Ok(page)
}

/// Resolve the `{id}` route segment.
///
/// The public front-end requests `/api/page/<slug>/`, so a segment that is not
/// an ObjectId is looked up as a slug.
pub async fn find_page(repo: &dyn PageRepository, id_or_slug: &str) -> Result<Page, AppError> {
    if parse_object_id(id_or_slug).is_ok() {
        repo.get(id_or_slug).await
    } else {
        repo.get_by_slug(id_or_slug).await
    }
}

/// `GET /api/page/`: published pages by title; drafts too for a superuser.
pub async fn list_pages_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<axum::Json<PageList>, AppError> {
    let only_published = !is_superuser(&jar, &state.config.auth_secret);
    let pages = state.pages.list(only_published).await?;
    Ok(axum::Json(PageList { pages }))
}

/// `GET /api/page/{id}/`
pub async fn page_info_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::Json<PageEnvelope>, AppError> {
    let page = find_page(state.pages.as_ref(), &id).await?;
    Ok(axum::Json(PageEnvelope { result: "ok", page }))
}

/// `GET /api/page/by-slug/{slug}/`
pub async fn page_by_slug_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<axum::Json<PageEnvelope>, AppError> {
    let page = state.pages.get_by_slug(&slug).await?;
    Ok(axum::Json(PageEnvelope { result: "ok", page }))
}

/// `POST /api/page/{id}/`: superuser only.
pub async fn update_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<axum::Json<PageEnvelope>, AppError> {
    let fields = FormFields::parse(&body);
    let page = update_page(state.pages.as_ref(), &id, &fields).await?;
    tracing::info!(id = %page.id, slug = %page.slug, "Updated page");
    Ok(axum::Json(PageEnvelope { result: "ok", page }))
}

/// `POST /api/page/add/`: superuser only.
pub async fn add_page_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<axum::Json<PageIdEnvelope>, AppError> {
    let fields = FormFields::parse(&body);
    let page = create_page(state.pages.as_ref(), &fields, &state.config.default_author).await?;
    tracing::info!(id = %page.id, slug = %page.slug, "Created page");
    Ok(axum::Json(PageIdEnvelope {
        result: "ok",
        page_id: page.id,
    }))
}

/// `POST /api/page/{id}/delete/`: superuser only.
pub async fn delete_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::Json<PageIdEnvelope>, AppError> {
    state.pages.delete(&id).await?;
    tracing::info!(id = %id, "Deleted page");
    Ok(axum::Json(PageIdEnvelope {
        result: "ok",
        page_id: id,
    }))
}
