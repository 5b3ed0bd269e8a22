use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, FromRef};
use axum::handler::Handler;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::api;
use crate::auth;
use crate::config::SiteConfig;
use crate::db::blog_repository::BlogPostRepository;
use crate::db::page_repository::PageRepository;
use crate::db::photo_repository::PhotoRepository;
use crate::rendering::templates::TemplateRenderer;
use crate::storage::client::StorageClient;
use crate::views;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub blog_posts: Arc<dyn BlogPostRepository>,
    pub pages: Arc<dyn PageRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub storage: Arc<dyn StorageClient>,
    pub templates: Arc<TemplateRenderer>,
    pub config: Arc<SiteConfig>,
    /// Encryption key for the session cookie.
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Build the full HTTP surface.
pub fn router(state: AppState) -> Router {
    let superuser = axum::middleware::from_fn_with_state(
        state.clone(),
        auth::middleware::require_superuser,
    );

    // Routes reachable only with a superuser session
    let admin = Router::new()
        .route("/admin/pages/", get(views::admin_home_handler))
        .route("/admin/blog-posts/", get(views::admin_home_handler))
        .route("/api/admin/menu/", get(api::menu::admin_menu_handler))
        .route("/api/blog/post/add/", post(api::blog::add_blog_post_handler))
        .route(
            "/api/blog/post/{id}/delete/",
            post(api::blog::delete_blog_post_handler),
        )
        .route("/api/page/add/", post(api::pages::add_page_handler))
        .route(
            "/api/page/{id}/delete/",
            post(api::pages::delete_page_handler),
        )
        .route(
            "/api/photo/add/",
            post(api::photos::upload_photo_handler)
                .layer(DefaultBodyLimit::max(api::photos::MAX_PHOTO_UPLOAD_BYTES)),
        )
        .route_layer(superuser.clone());

    let public = Router::new()
        .route("/", get(views::home_handler))
        .route("/login/", post(auth::login::login_handler))
        .route(
            "/logout/",
            get(auth::login::logout_handler).post(auth::login::logout_handler),
        )
        .route("/admin/", get(views::admin_home_handler))
        .route("/api/is-superuser/", get(auth::login::is_superuser_handler))
        .route("/api/menu/item/", get(api::menu::site_menu_handler))
        .route("/api/blog/post/", get(api::blog::list_blog_posts_handler))
        .route(
            "/api/blog/post/{id}/",
            get(api::blog::blog_post_info_handler)
                .post(api::blog::update_blog_post_handler.layer(superuser.clone())),
        )
        .route("/api/page/", get(api::pages::list_pages_handler))
        .route(
            "/api/page/{id}/",
            get(api::pages::page_info_handler)
                .post(api::pages::update_page_handler.layer(superuser)),
        )
        .route(
            "/api/page/by-slug/{slug}/",
            get(api::pages::page_by_slug_handler),
        )
        .route("/api/photo/", get(api::photos::list_photos_handler))
        .route("/{slug}", get(views::page_view_handler))
        .route("/{slug}/", get(views::page_view_handler));

    Router::new()
        .merge(admin)
        .merge(public)
        .nest_service("/static", ServeDir::new(&state.config.static_root))
        .nest_service("/templates", ServeDir::new(&state.config.templates_root))
        .method_not_allowed_fallback(api::errors::method_not_allowed)
        .fallback(views::not_found_handler)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
        .with_state(state)
}
