// Configuration module: command line flags plus the environment (and an
// optional `.env` file). Everything is read once in `main` and handed down
// as plain values; nothing else in the crate touches the environment.

use crate::store::DEFAULT_MENU_FILE;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "menu-semanal")]
#[command(about = "Genera menús semanales y recetas con un modelo de lenguaje")]
pub struct Cli {
    /// File used by the save and load options
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Chat model name, overrides MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the chat-completion API, overrides API_BASE_URL
    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Settings for the remote completion service.
#[derive(Clone)]
pub struct ApiConfig {
    /// Sent as a bearer token. May be empty; the service rejects it then.
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub menu_file: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Load `.env` if present, then resolve settings from the process
    /// environment with command line flags taking precedence.
    pub fn load(cli: &Cli) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }
        Self::from_sources(cli, |key| std::env::var(key).ok())
    }

    /// Resolve settings from flags and an arbitrary variable lookup.
    pub fn from_sources<F>(cli: &Cli, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = cli
            .api_base
            .clone()
            .or_else(|| env("API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let config = Config {
            api: ApiConfig {
                api_key: env("API_KEY").unwrap_or_default(),
                api_base: api_base.trim_end_matches('/').to_string(),
                model: cli
                    .model
                    .clone()
                    .or_else(|| env("MODEL"))
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            menu_file: cli
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MENU_FILE)),
            verbose: cli.verbose,
        };
        debug!("Resolved config: {:?}", config);
        config
    }
}
