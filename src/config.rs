use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Site configuration, read from a JSON file.
///
/// Keys keep the PascalCase names of the historical config files
/// (`DBHostname`, `AuthSecret`, ...). Unknown keys are ignored and missing
/// keys fall back to [`SiteConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// MongoDB host (`localhost`, `db:27017`) or a full `mongodb://` URI.
    #[serde(rename = "DBHostname")]
    pub db_hostname: String,
    #[serde(rename = "DBName")]
    pub db_name: String,
    #[serde(rename = "StaticRoot")]
    pub static_root: PathBuf,
    #[serde(rename = "TemplatesRoot")]
    pub templates_root: PathBuf,
    /// Shared secret stored in the admin session and checked on every gated route.
    #[serde(rename = "AuthSecret")]
    pub auth_secret: String,
    #[serde(rename = "AdminUsername")]
    pub admin_username: String,
    #[serde(rename = "AdminPassword")]
    pub admin_password: String,
    #[serde(rename = "ListenAddress")]
    pub listen_address: String,
    /// Key material for the session cookie encryption key.
    #[serde(rename = "SessionKey")]
    pub session_key: String,
    /// Author recorded on content created through the admin API.
    #[serde(rename = "DefaultAuthor")]
    pub default_author: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let cur_dir = std::env::current_dir().unwrap_or_default();
        Self {
            db_hostname: "localhost".to_string(),
            db_name: "mb".to_string(),
            static_root: cur_dir.join("static"),
            templates_root: cur_dir.join("templates"),
            auth_secret: String::new(),
            admin_username: "admin".to_string(),
            admin_password: "123".to_string(),
            listen_address: "0.0.0.0:8080".to_string(),
            session_key: "mbSessionId".to_string(),
            default_author: "Mario".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load the configuration file at `path`.
    ///
    /// A missing, empty or malformed file is not fatal: a warning is logged
    /// and the defaults are returned.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Configuration file {} couldn't be loaded: {e}", path.display());
                return Self::default();
            }
        };

        if raw.trim().is_empty() {
            tracing::warn!("Configuration file {} is empty", path.display());
            return Self::default();
        }

        match serde_json::from_str(&raw) {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!("Configuration file {} is invalid: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply overrides from a variable lookup (the process environment in `main`).
    ///
    /// Recognised variables:
    /// - `MONGODB_URI` replaces `DBHostname`
    /// - `MONGODB_DATABASE` replaces `DBName`
    /// - `FOLIO_AUTH_SECRET` replaces `AuthSecret`
    /// - `FOLIO_LISTEN` replaces `ListenAddress`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGODB_URI") {
            self.db_hostname = uri;
        }
        if let Some(name) = lookup("MONGODB_DATABASE") {
            self.db_name = name;
        }
        if let Some(secret) = lookup("FOLIO_AUTH_SECRET") {
            self.auth_secret = secret;
        }
        if let Some(listen) = lookup("FOLIO_LISTEN") {
            self.listen_address = listen;
        }
        self
    }

    /// Connection string for the MongoDB driver.
    pub fn mongodb_uri(&self) -> String {
        if self.db_hostname.contains("://") {
            self.db_hostname.clone()
        } else {
            format!("mongodb://{}", self.db_hostname)
        }
    }
}
