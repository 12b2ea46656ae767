mod config;
mod init;

use std::path::PathBuf;

use pressbox_gateway::{GatewayServer, Pipeline};
use pressbox_index::{PdfExtractor, SplitterConfig, TextSplitter};
use pressbox_llm::HfProvider;
use pressbox_report::{ArticleGenerator, ChatResponder};
use tokio::sync::watch;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init::init_subscriber();

    let config_path = resolve_config_path();
    let config = Config::load(&config_path)?;
    config.validate()?;
    let api_token = config::api_token()?;

    tracing::info!(
        model = %config.inference.model,
        embedding_model = %config.inference.embedding_model,
        "starting pressbox"
    );

    let provider = HfProvider::new(
        api_token,
        config.inference.base_url.clone(),
        config.inference.model.clone(),
        config.inference.embedding_model.clone(),
        config.inference.max_tokens,
    );

    let pipeline = Pipeline::new(
        PdfExtractor::new(config.server.max_body_size as u64),
        TextSplitter::new(SplitterConfig {
            chunk_size: config.index.chunk_size,
            chunk_overlap: config.index.chunk_overlap,
        }),
        ArticleGenerator::new(config.article.max_input_chars),
        ChatResponder::new(config.index.top_k, config.index.max_context_chars),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    GatewayServer::new(
        &config.server.bind,
        config.server.port,
        provider,
        pipeline,
        shutdown_rx,
    )
    .with_max_body_size(config.server.max_body_size)
    .serve()
    .await?;

    Ok(())
}

/// Priority: `--config <path>` arg > `PRESSBOX_CONFIG` env > default path.
fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("PRESSBOX_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}
