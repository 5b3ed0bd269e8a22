use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::app::AppState;
use crate::error::AppError;

/// Slug always served by the page shell so the front-end can render its own
/// "not found" page.
const NOT_FOUND_SLUG: &str = "404";

fn html_or_failed(rendered: Result<String, AppError>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed").into_response()
        }
    }
}

/// `GET /`: the public shell (`base.html`).
pub async fn home_handler(State(state): State<AppState>) -> Response {
    html_or_failed(state.templates.render("base.html").await)
}

/// `GET /admin/` and the gated admin sections: the admin shell.
pub async fn admin_home_handler(State(state): State<AppState>) -> Response {
    html_or_failed(state.templates.render_admin("base.html").await)
}

/// Whether the public page shell should be served for `slug`.
pub async fn page_is_viewable(state: &AppState, slug: &str) -> Result<bool, AppError> {
    if slug == NOT_FOUND_SLUG {
        return Ok(true);
    }
    state.pages.exists(slug).await
}

/// `GET /{slug}` and `GET /{slug}/`: serve the shell for a published page.
pub async fn page_view_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match page_is_viewable(&state, &slug).await {
        Ok(true) => {}
        Ok(false) => {
            return (StatusCode::NOT_FOUND, format!("Page \"{slug}\" not found")).into_response();
        }
        Err(e) => {
            tracing::error!("{e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    }

    match state.templates.render("base.html").await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Fallback for paths no route matches.
pub async fn not_found_handler(uri: axum::http::Uri) -> Response {
    (StatusCode::NOT_FOUND, format!("{} not found", uri.path())).into_response()
}
