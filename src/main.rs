use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use folio::app::{router, AppState};
use folio::auth::session::cookie_key;
use folio::config::SiteConfig;
use folio::db::blog_repository::MongoBlogPostRepository;
use folio::db::page_repository::MongoPageRepository;
use folio::db::photo_repository::MongoPhotoRepository;
use folio::rendering::templates::TemplateRenderer;
use folio::storage::client::LocalStorageClient;

/// Personal website content server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file path
    #[arg(long, default_value = "config/local.json")]
    config: PathBuf,

    /// Address to listen on, overriding the configuration file
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting folio {}...", env!("CARGO_PKG_VERSION"));

    let mut config = SiteConfig::load(&cli.config).with_overrides(|key| std::env::var(key).ok());
    if let Some(listen) = cli.listen {
        config.listen_address = listen;
    }

    if config.auth_secret.is_empty() {
        anyhow::bail!(
            "AuthSecret is empty; set it in {} or via FOLIO_AUTH_SECRET",
            cli.config.display()
        );
    }

    // Connect to MongoDB
    let mongo_uri = config.mongodb_uri();
    let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
        .await
        .with_context(|| format!("Failed to connect to MongoDB at {mongo_uri}"))?;
    let mongo_db = mongo_client.database(&config.db_name);

    tracing::info!("Using MongoDB database '{}' at {}", config.db_name, mongo_uri);

    let state = AppState {
        blog_posts: Arc::new(MongoBlogPostRepository::new(&mongo_db)),
        pages: Arc::new(MongoPageRepository::new(&mongo_db)),
        photos: Arc::new(MongoPhotoRepository::new(&mongo_db)),
        storage: Arc::new(LocalStorageClient::new(&config.static_root)),
        templates: Arc::new(TemplateRenderer::new(&config.templates_root)),
        cookie_key: cookie_key(&config.session_key),
        config: Arc::new(config),
    };

    let addr = state.config.listen_address.clone();
    let app = router(state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
