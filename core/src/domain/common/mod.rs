use std::path::PathBuf;

pub mod entities;
pub mod services;

/// Placeholder value shipped in sample `.env` files.
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

#[derive(Clone, Debug)]
pub struct OutfitterConfig {
    pub llm: LLMConfig,
    pub models: ModelConfig,
    pub uploads: UploadConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl LLMConfig {
    /// Returns the API key when it is set to something usable.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub model_dir: PathBuf,
    /// Remote host serving `<category>_best.onnx` files.
    pub base_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub upload_dir: PathBuf,
}
