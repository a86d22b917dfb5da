use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::domain::{classification::entities::ModelKind, common::entities::app_errors::CoreError};

/// Downloads missing `<kind>_best.onnx` files from a remote host.
#[derive(Debug, Clone)]
pub struct ModelFetcher {
    base_url: String,
    model_dir: PathBuf,
    client: Client,
}

#[derive(Debug, Default)]
pub struct FetchReport {
    pub downloaded: Vec<ModelKind>,
    pub present: Vec<ModelKind>,
    pub failed: Vec<(ModelKind, CoreError)>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl ModelFetcher {
    pub fn new(base_url: impl Into<String>, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_dir: model_dir.into(),
            client: Client::new(),
        }
    }

    /// Fetches every weight file that is not already on disk.
    pub async fn fetch_missing(&self) -> FetchReport {
        let mut report = FetchReport::default();

        for kind in ModelKind::ALL {
            match self.fetch(kind).await {
                Ok(true) => report.downloaded.push(kind),
                Ok(false) => report.present.push(kind),
                Err(e) => {
                    warn!(model = %kind, error = %e, "Model download failed");
                    report.failed.push((kind, e));
                }
            }
        }

        report
    }

    /// Returns `Ok(false)` when the file was already present.
    pub async fn fetch(&self, kind: ModelKind) -> Result<bool, CoreError> {
        let file_name = kind.weight_file();
        let target = self.model_dir.join(&file_name);
        if tokio::fs::try_exists(&target).await? {
            return Ok(false);
        }

        tokio::fs::create_dir_all(&self.model_dir).await?;

        let url = format!("{}/{}", self.base_url, file_name);
        info!(model = %kind, url = %url, "Downloading model weights");

        let partial = self.model_dir.join(format!("{file_name}.part"));
        let result = self.download_to(&url, &partial).await;
        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }

        tokio::fs::rename(&partial, &target).await?;
        info!(model = %kind, path = %target.display(), "Model weights saved");
        Ok(true)
    }

    async fn download_to(&self, url: &str, path: &Path) -> Result<(), CoreError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("Model download request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "Model download returned {} for {}",
                status, url
            )));
        }

        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                CoreError::ExternalServiceError(format!("Model download interrupted: {}", e))
            })?;
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        if written == 0 {
            return Err(CoreError::ExternalServiceError(format!(
                "Model download from {} was empty",
                url
            )));
        }

        Ok(())
    }
}
