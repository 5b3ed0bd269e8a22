use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Marker in `base.html` replaced by the named template's content.
pub const CONTENT_MARKER: &str = "<!-- CONTENT -->";

const BASE_TEMPLATE: &str = "base.html";

/// Loads HTML templates from the templates root and composes them into the
/// site's base layout.
///
/// Public templates live directly under the root, admin templates under
/// `admin/`; each directory carries its own `base.html`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    root: PathBuf,
}

impl TemplateRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Render a public template inside `base.html`.
    pub async fn render(&self, name: &str) -> Result<String, AppError> {
        render_in(&self.root, name).await
    }

    /// Render an admin template inside `admin/base.html`.
    pub async fn render_admin(&self, name: &str) -> Result<String, AppError> {
        render_in(&self.root.join("admin"), name).await
    }
}

async fn render_in(dir: &Path, name: &str) -> Result<String, AppError> {
    let base = read_template(dir, BASE_TEMPLATE).await?;
    if name == BASE_TEMPLATE {
        return Ok(base);
    }

    let content = read_template(dir, name).await?;
    Ok(base.replacen(CONTENT_MARKER, &content, 1))
}

async fn read_template(dir: &Path, name: &str) -> Result<String, AppError> {
    tokio::fs::read_to_string(dir.join(name))
        .await
        .map_err(|e| AppError::Template(format!("Couldn't load {name}: {e}")))
}
