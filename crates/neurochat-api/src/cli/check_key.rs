//! `neurochat check-key` -- run the key validation once and report.

use neurochat_core::llm::registry::ModelRegistry;
use neurochat_infra::config::ConfigStore;
use neurochat_infra::llm::create_provider;
use neurochat_types::llm::ConfigureOutcome;

use crate::cli::RuntimeArgs;

pub async fn check_key(args: RuntimeArgs) -> anyhow::Result<()> {
    let config = ConfigStore::load(args.data_dir()).await;
    let provider = create_provider(&config.secrets(), &args.model_settings())?;
    let outcome = ModelRegistry::new().configure(provider).await;

    let (mark, detail) = match outcome {
        ConfigureOutcome::Ok => (console::style("ok").green(), "API key verified"),
        ConfigureOutcome::Unknown => (
            console::style("unknown").yellow(),
            "validation failed for a reason unrelated to the key; the model stays enabled",
        ),
        ConfigureOutcome::InvalidKey => (console::style("invalid").red(), "the provider rejected the API key"),
        ConfigureOutcome::Disabled => (
            console::style("disabled").dim(),
            "no API key configured",
        ),
    };

    println!(
        "  {} {} ({})",
        mark.bold(),
        detail,
        console::style(config.secrets_path().display()).dim()
    );

    if outcome == ConfigureOutcome::InvalidKey {
        anyhow::bail!("invalid Gemini API key");
    }
    Ok(())
}
