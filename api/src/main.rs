use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use outfitter_core::infrastructure::classification::ModelFetcher;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    application::http::server::http_server::{router, state},
    args::{Args, Command, LogArgs},
};

mod application;
mod args;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    if let Some(Command::DownloadModels) = args.command {
        return download_models(&args).await;
    }

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_logger(log: &LogArgs) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn download_models(args: &Args) -> Result<(), anyhow::Error> {
    let Some(base_url) = args.models.model_base_url.as_deref() else {
        bail!("MODEL_BASE_URL is not set");
    };

    let report = ModelFetcher::new(base_url, &args.models.model_dir)
        .fetch_missing()
        .await;

    for kind in &report.downloaded {
        info!(model = %kind, "downloaded");
    }
    for kind in &report.present {
        info!(model = %kind, "already present");
    }
    if !report.is_complete() {
        for (kind, e) in &report.failed {
            error!(model = %kind, error = %e, "download failed");
        }
        bail!("{} model(s) could not be downloaded", report.failed.len());
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
