use std::{path::PathBuf, sync::LazyLock};

use regex::Regex;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    wardrobe::{entities::UploadedImage, ports::UploadStore},
};

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9._-]").unwrap_or_else(|_| unreachable!("static pattern is valid"))
});

const FALLBACK_NAME: &str = "upload";

/// Writes uploads to `{upload_dir}/{category}_{uuid}_{filename}`.
///
/// Every save gets its own file, so concurrent requests never share a path.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    upload_dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }
}

/// Keeps only the last path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let sanitized = UNSAFE_CHARS.replace_all(base, "_");
    if sanitized.trim_matches('.').is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        sanitized.into_owned()
    }
}

impl UploadStore for LocalUploadStore {
    #[instrument(skip(self, image), fields(category = %image.category, size = image.data.len()))]
    async fn save(&self, image: UploadedImage) -> Result<PathBuf, CoreError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;

        let filename = format!(
            "{}_{}_{}",
            image.category,
            Uuid::now_v7().simple(),
            sanitize_filename(&image.filename)
        );
        let path = self.upload_dir.join(filename);

        tokio::fs::write(&path, &image.data).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to write upload");
            CoreError::from(e)
        })?;

        info!(path = %path.display(), "Saved upload");
        Ok(path)
    }
}
