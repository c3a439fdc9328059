//! Neurochat CLI and REST API entry point.
//!
//! Binary name: `neurochat`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the requested
//! command. `serve` owns the HTTP server lifecycle.

mod cli;
mod http;
mod state;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "neurochat", &mut std::io::stdout());
        return Ok(());
    }

    neurochat_observe::tracing_setup::init_tracing(cli.otel_enabled(), cli.log_filter())
        .map_err(|e| anyhow::anyhow!(e))?;

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::serve(args).await,
        Commands::CheckKey(args) => cli::check_key::check_key(args).await,
        Commands::Completions { .. } => Ok(()),
    };

    neurochat_observe::tracing_setup::shutdown_tracing();
    result
}
