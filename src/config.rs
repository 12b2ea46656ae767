use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub index: IndexConfig,
    pub article: ArticleConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct IndexConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub max_context_chars: usize,
}

#[derive(Debug, Deserialize)]
pub struct ArticleConfig {
    pub max_input_chars: usize,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PRESSBOX_BIND") {
            self.server.bind = v;
        }
        if let Ok(v) = std::env::var("PRESSBOX_PORT")
            && let Ok(port) = v.parse()
        {
            self.server.port = port;
        }
        if let Ok(v) = std::env::var("PRESSBOX_BASE_URL") {
            self.inference.base_url = v;
        }
        if let Ok(v) = std::env::var("PRESSBOX_MODEL") {
            self.inference.model = v;
        }
        if let Ok(v) = std::env::var("PRESSBOX_EMBEDDING_MODEL") {
            self.inference.embedding_model = v;
        }
    }

    /// # Errors
    ///
    /// Returns an error for parameter combinations the pipeline cannot
    /// honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.index.chunk_size == 0 {
            bail!("index.chunk_size must be at least 1");
        }
        if self.index.chunk_overlap >= self.index.chunk_size {
            bail!(
                "index.chunk_overlap ({}) must be smaller than index.chunk_size ({})",
                self.index.chunk_overlap,
                self.index.chunk_size
            );
        }
        if self.index.top_k == 0 {
            bail!("index.top_k must be at least 1");
        }
        Ok(())
    }

    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1".into(),
                port: 8080,
                max_body_size: 16 * 1024 * 1024,
            },
            inference: InferenceConfig {
                base_url: pressbox_llm::hf::DEFAULT_BASE_URL.into(),
                model: "meta-llama/Llama-3.1-8B-Instruct".into(),
                embedding_model: "sentence-transformers/all-MiniLM-L6-v2".into(),
                max_tokens: 1024,
            },
            index: IndexConfig {
                chunk_size: 1000,
                chunk_overlap: 200,
                top_k: 5,
                max_context_chars: 4000,
            },
            article: ArticleConfig {
                max_input_chars: 6000,
            },
        }
    }
}

/// The inference API token comes only from the environment, never from the
/// config file.
///
/// # Errors
///
/// Returns an error when neither `PRESSBOX_API_TOKEN` nor `HF_TOKEN` is
/// set.
pub fn api_token() -> anyhow::Result<String> {
    std::env::var("PRESSBOX_API_TOKEN")
        .or_else(|_| std::env::var("HF_TOKEN"))
        .context("PRESSBOX_API_TOKEN (or HF_TOKEN) must be set")
}
