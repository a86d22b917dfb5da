use tracing::{info, warn};

use crate::{
    domain::{
        classification::ports::GarmentClassifier,
        common::{OutfitterConfig, entities::app_errors::CoreError, services::Service},
    },
    infrastructure::{
        classification::{ModelFetcher, OnnxGarmentClassifier},
        color::ImageColorExtractor,
        llm::GeminiLLMClient,
        storage::LocalUploadStore,
    },
};

pub type OutfitterService =
    Service<OnnxGarmentClassifier, ImageColorExtractor, GeminiLLMClient, LocalUploadStore>;

/// Builds the production service: fetches missing weights when a model host
/// is configured, loads the classifiers and wires the Gemini client if a
/// usable API key is present.
pub async fn create_service(config: OutfitterConfig) -> Result<OutfitterService, CoreError> {
    tokio::fs::create_dir_all(&config.uploads.upload_dir).await?;

    if let Some(base_url) = config.models.base_url.as_deref() {
        let report = ModelFetcher::new(base_url, &config.models.model_dir)
            .fetch_missing()
            .await;
        info!(
            downloaded = report.downloaded.len(),
            present = report.present.len(),
            failed = report.failed.len(),
            "Model weights checked"
        );
    }

    let model_dir = config.models.model_dir.clone();
    let classifier = tokio::task::spawn_blocking(move || OnnxGarmentClassifier::load(&model_dir))
        .await
        .map_err(|e| CoreError::ModelLoad(e.to_string()))?;
    info!(models = ?classifier.loaded_models(), "Classifiers ready");

    let llm_client = match config.llm.usable_api_key() {
        Some(api_key) => Some(GeminiLLMClient::with_base_url(
            api_key.to_string(),
            config.llm.gemini_model.clone(),
            config.llm.gemini_base_url.clone(),
        )),
        None => {
            warn!("GEMINI_API_KEY not set, recommendations will be disabled");
            None
        }
    };

    Ok(Service::new(
        classifier,
        ImageColorExtractor::default(),
        llm_client,
        LocalUploadStore::new(config.uploads.upload_dir),
    ))
}
