//! CLI command definitions for the `neurochat` binary.

pub mod check_key;
pub mod serve;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use neurochat_infra::config::resolve_data_dir;
use neurochat_infra::llm::ModelSettings;
use neurochat_infra::llm::gemini::client::DEFAULT_MODEL;

/// Personal chatbot server backed by Google Gemini.
#[derive(Parser)]
#[command(name = "neurochat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,neurochat_api=debug,neurochat_core=debug,neurochat_infra=debug",
            _ => "trace",
        }
    }

    pub fn otel_enabled(&self) -> bool {
        matches!(&self.command, Commands::Serve(args) if args.otel)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),

    /// Validate the configured Gemini API key and print the outcome.
    #[command(name = "check-key")]
    CheckKey(RuntimeArgs),

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Settings shared by every command that touches the data directory or the model.
#[derive(Args, Debug, Clone)]
pub struct RuntimeArgs {
    /// Directory holding the database, prompt.json and config.json.
    #[arg(long, env = "NEUROCHAT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Gemini model identifier.
    #[arg(long, env = "NEUROCHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Timeout for a single model call, in seconds.
    #[arg(long, env = "NEUROCHAT_REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Gemini endpoint override (proxies, regional endpoints).
    #[arg(long, env = "NEUROCHAT_GEMINI_BASE_URL")]
    pub base_url: Option<String>,
}

impl RuntimeArgs {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(resolve_data_dir)
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "NEUROCHAT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "NEUROCHAT_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Static web UI directory served for unknown paths.
    #[arg(long, env = "NEUROCHAT_WEB_DIR")]
    pub web_dir: Option<PathBuf>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long)]
    pub otel: bool,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}
