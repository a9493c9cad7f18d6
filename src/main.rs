use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use llm_poller::{
    init_tracing, targets_without_credentials, Credentials, DispatcherSet, FileStore,
    Orchestrator, PollerConfig, Provider, Registry, RunReport,
};

#[derive(Debug, Parser)]
#[command(
    name = "llm-poller",
    about = "Poll LLM providers and record their raw responses",
    version
)]
struct Cli {
    /// Root directory of the results tree
    #[arg(long, env = "LOGS_DIR", value_name = "DIR")]
    logs_dir: Option<PathBuf>,

    /// JSON registry file replacing the built-in target list
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Only poll targets of this provider (xai, openai, anthropic, gemini)
    #[arg(long, value_name = "PROVIDER")]
    provider: Option<Provider>,

    /// Restrict `--provider` to these models (repeatable)
    #[arg(long = "model", value_name = "MODEL", requires = "provider")]
    models: Vec<String>,

    /// Hours a successful result stays fresh
    #[arg(long, value_name = "HOURS")]
    recency_hours: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = PollerConfig::from_env().context("Invalid poller configuration")?;
    if let Some(dir) = cli.logs_dir {
        config.logs_dir = dir;
    }
    if let Some(hours) = cli.recency_hours {
        config.recency_window = PollerConfig::window_from_hours(hours)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }

    let credentials = Credentials::from_env();
    let registry = match &cli.registry {
        Some(path) => Registry::from_file(path, &credentials)?,
        None => Registry::builtin(&credentials),
    };
    targets_without_credentials(registry.targets());

    let orchestrator = Orchestrator::new(
        Arc::new(FileStore::from_config(&config)),
        DispatcherSet::from_config(&config)?,
    );

    let report = match cli.provider {
        Some(provider) => {
            let models = (!cli.models.is_empty()).then_some(cli.models.as_slice());
            orchestrator
                .run_for_provider(registry.targets(), provider, models)
                .await
        }
        None => orchestrator.run_all(registry.targets()).await,
    };

    print_summary(&report);

    if !report.is_clean() {
        bail!(
            "{} result(s) could not be saved under {}",
            report.persist_failures.len(),
            config.logs_dir.display()
        );
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    for (provider, model) in &report.skipped {
        println!("skipped  {provider}/{model}");
    }
    for result in &report.results {
        let target = &result.target;
        match result.error_code() {
            None => println!("ok       {}/{}", target.provider, target.model),
            Some(code) => println!("failed   {}/{} ({code})", target.provider, target.model),
        }
    }
    for failure in &report.persist_failures {
        eprintln!(
            "unsaved  {}/{}: {}",
            failure.provider, failure.model, failure.error
        );
    }
}
