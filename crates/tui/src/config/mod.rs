use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the HSA service.
    pub base_url: String,
    /// When set, tracing output is appended to this file. The terminal
    /// itself belongs to the UI, so nothing is ever logged there.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hsa_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("HSA_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    Ok(settings)
}
