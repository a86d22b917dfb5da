use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use outfitter_core::{
    domain::common::{LLMConfig, ModelConfig, OutfitterConfig, UploadConfig},
    infrastructure::llm::gemini_client::DEFAULT_GEMINI_BASE_URL,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "outfitter-api", version, about = "Winter Outfit Wizard API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub models: ModelArgs,

    #[command(flatten)]
    pub uploads: UploadArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Download missing classifier weights from the model host and exit.
    DownloadModels,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix for every API route, e.g. `/outfitter`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:8000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ModelArgs {
    #[arg(long, env = "MODEL_DIR", default_value = "models")]
    pub model_dir: PathBuf,

    /// Host serving `<category>_best.onnx`; missing weights are fetched at startup.
    #[arg(long, env = "MODEL_BASE_URL")]
    pub model_base_url: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UploadArgs {
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Emit logs as JSON lines.
    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for OutfitterConfig {
    fn from(args: Args) -> Self {
        OutfitterConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            models: ModelConfig {
                model_dir: args.models.model_dir,
                base_url: args.models.model_base_url.filter(|url| !url.trim().is_empty()),
            },
            uploads: UploadConfig {
                upload_dir: args.uploads.upload_dir,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_from_flags() {
        let args = Args::try_parse_from([
            "outfitter-api",
            "--port",
            "9000",
            "--allowed-origins",
            "http://a.test,http://b.test",
            "--gemini-api-key",
            "key",
            "--model-base-url",
            "",
            "download-models",
        ])
        .unwrap();

        assert_eq!(args.server.port, 9000);
        assert_eq!(args.server.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert!(matches!(args.command, Some(Command::DownloadModels)));

        let config = OutfitterConfig::from(args);
        assert_eq!(config.llm.usable_api_key(), Some("key"));
        assert_eq!(config.models.base_url, None);
    }
}
