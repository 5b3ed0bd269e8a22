#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use folio::app::AppState;
use folio::auth::session::cookie_key;
use folio::config::SiteConfig;
use folio::db::blog_repository::BlogPostRepository;
use folio::db::models::{BlogPost, Page, Photo};
use folio::db::page_repository::PageRepository;
use folio::db::photo_repository::PhotoRepository;
use folio::error::AppError;
use folio::rendering::templates::TemplateRenderer;
use folio::storage::client::LocalStorageClient;

pub const AUTH_SECRET: &str = "test-secret";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "123";

// -- In-memory repositories mirroring the MongoDB ordering and filters --

#[derive(Default)]
pub struct MemoryBlogPosts {
    pub posts: Mutex<Vec<BlogPost>>,
}

#[async_trait]
impl BlogPostRepository for MemoryBlogPosts {
    async fn list(&self, only_published: bool) -> Result<Vec<BlogPost>, AppError> {
        let mut posts: Vec<_> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.published || !only_published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(posts)
    }

    async fn get(&self, id: &str) -> Result<BlogPost, AppError> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{id}' not found")))
    }

    async fn insert(&self, mut post: BlogPost) -> Result<BlogPost, AppError> {
        post.id = ObjectId::new().to_hex();
        post.pub_date = Utc::now();
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: &BlogPost) -> Result<(), AppError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{}' not found", post.id)))?;
        *slot = post.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(AppError::NotFound(format!("Blog post '{id}' not found")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPages {
    pub pages: Mutex<Vec<Page>>,
}

#[async_trait]
impl PageRepository for MemoryPages {
    async fn list(&self, only_published: bool) -> Result<Vec<Page>, AppError> {
        let mut pages: Vec<_> = self
            .pages
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.published || !only_published)
            .cloned()
            .collect();
        pages.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(pages)
    }

    async fn get(&self, id: &str) -> Result<Page, AppError> {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Page '{id}' not found")))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Page, AppError> {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.slug == slug)
            .min_by_key(|p| p.pub_date)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Page \"{slug}\" not found")))
    }

    async fn exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self
            .pages
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.slug == slug && p.published))
    }

    async fn insert(&self, mut page: Page) -> Result<Page, AppError> {
        page.id = ObjectId::new().to_hex();
        page.pub_date = Utc::now();
        self.pages.lock().unwrap().push(page.clone());
        Ok(page)
    }

    async fn update(&self, page: &Page) -> Result<(), AppError> {
        let mut pages = self.pages.lock().unwrap();
        let slot = pages
            .iter_mut()
            .find(|p| p.id == page.id)
            .ok_or_else(|| AppError::NotFound(format!("Page '{}' not found", page.id)))?;
        *slot = page.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut pages = self.pages.lock().unwrap();
        let before = pages.len();
        pages.retain(|p| p.id != id);
        if pages.len() == before {
            return Err(AppError::NotFound(format!("Page '{id}' not found")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPhotos {
    pub photos: Mutex<Vec<Photo>>,
}

#[async_trait]
impl PhotoRepository for MemoryPhotos {
    async fn list(&self, only_published: bool) -> Result<Vec<Photo>, AppError> {
        let mut photos: Vec<_> = self
            .photos
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.published || !only_published)
            .cloned()
            .collect();
        photos.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(photos)
    }

    async fn insert(&self, mut photo: Photo) -> Result<Photo, AppError> {
        photo.id = ObjectId::new().to_hex();
        photo.pub_date = Utc::now();
        self.photos.lock().unwrap().push(photo.clone());
        Ok(photo)
    }
}

/// A router wired to in-memory repositories plus temporary static and
/// template directories.
pub struct TestEnv {
    _dir: tempfile::TempDir,
    pub router: Router,
    pub config: SiteConfig,
    pub blog_posts: Arc<MemoryBlogPosts>,
    pub pages: Arc<MemoryPages>,
    pub photos: Arc<MemoryPhotos>,
}

impl TestEnv {
    pub fn start() -> Self {
        Self::with_secret(AUTH_SECRET)
    }

    /// Same session key as [`TestEnv::start`], but a different auth secret.
    pub fn with_secret(secret: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let static_root = dir.path().join("static");
        let templates_root = dir.path().join("templates");
        std::fs::create_dir_all(&static_root).unwrap();
        std::fs::create_dir_all(templates_root.join("admin")).unwrap();
        std::fs::write(static_root.join("site.css"), "body { margin: 0; }").unwrap();
        std::fs::write(
            templates_root.join("base.html"),
            "<html><body><!-- CONTENT --></body></html>",
        )
        .unwrap();
        std::fs::write(
            templates_root.join("admin/base.html"),
            "<html><body class=\"admin\"><!-- CONTENT --></body></html>",
        )
        .unwrap();

        let config = SiteConfig {
            static_root: static_root.clone(),
            templates_root: templates_root.clone(),
            auth_secret: secret.to_string(),
            admin_username: ADMIN_USERNAME.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            session_key: "test-session-key".to_string(),
            ..SiteConfig::default()
        };

        let blog_posts = Arc::new(MemoryBlogPosts::default());
        let pages = Arc::new(MemoryPages::default());
        let photos = Arc::new(MemoryPhotos::default());

        let state = AppState {
            blog_posts: blog_posts.clone(),
            pages: pages.clone(),
            photos: photos.clone(),
            storage: Arc::new(LocalStorageClient::new(&static_root)),
            templates: Arc::new(TemplateRenderer::new(&templates_root)),
            cookie_key: cookie_key(&config.session_key),
            config: Arc::new(config.clone()),
        };

        Self {
            _dir: dir,
            router: folio::app::router(state),
            config,
            blog_posts,
            pages,
            photos,
        }
    }

    /// Build an `axum_test::TestServer` that keeps cookies between requests.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }

    /// Log in with the configured admin credentials.
    pub async fn login(&self, server: &axum_test::TestServer) -> axum_test::TestResponse {
        server
            .post("/login/")
            .form(&[("Username", ADMIN_USERNAME), ("Password", ADMIN_PASSWORD)])
            .await
    }

    /// Seed a page directly into the repository.
    pub fn seed_page(&self, slug: &str, title: &str, published: bool) -> Page {
        let page = Page {
            id: ObjectId::new().to_hex(),
            slug: slug.to_string(),
            title: title.to_string(),
            content: format!("Content of {title}"),
            published,
            pub_date: Utc::now(),
            author: "Mario".to_string(),
            tags: vec![],
        };
        self.pages.pages.lock().unwrap().push(page.clone());
        page
    }

    /// Seed a blog post directly into the repository.
    pub fn seed_post(&self, title: &str, published: bool, age_days: i64) -> BlogPost {
        let post = BlogPost {
            id: ObjectId::new().to_hex(),
            slug: folio::slug::slugify(title),
            title: title.to_string(),
            content: format!("Content of {title}"),
            published,
            pub_date: Utc::now() - chrono::Duration::days(age_days),
            author: "Mario".to_string(),
            tags: vec![],
        };
        self.blog_posts.posts.lock().unwrap().push(post.clone());
        post
    }
}

/// Start a throwaway MongoDB container and return it with a fresh database.
///
/// The container is stopped when the returned handle is dropped.
pub async fn start_mongo() -> (
    testcontainers::ContainerAsync<testcontainers_modules::mongo::Mongo>,
    mongodb::Database,
) {
    use testcontainers::runners::AsyncRunner;

    let container = testcontainers_modules::mongo::Mongo::default()
        .start()
        .await
        .expect("Failed to start MongoDB container");
    let port = container
        .get_host_port_ipv4(27017)
        .await
        .expect("Failed to get MongoDB port");
    let client = mongodb::Client::with_uri_str(format!("mongodb://127.0.0.1:{port}"))
        .await
        .expect("Failed to connect to MongoDB");
    (container, client.database("folio_test"))
}
