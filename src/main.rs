use anyhow::Context;
use clap::Parser;
use contract_filler::adapters::http;
use contract_filler::utils::{logger, validation::Validate};
use contract_filler::{CliConfig, ContractFiller, LocalTemplateStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting contract-filler");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve().context("failed to load configuration")?;
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {} ({:?})", e, e.category());
        return Err(e.into());
    }

    let layouts = config.load_layouts().context("failed to load field layouts")?;
    tracing::info!("Layouts available for: {}", layouts.contract_ids().join(", "));

    let store = LocalTemplateStore::from_config(&config);
    store.ensure_dir()?;
    tracing::info!("Serving templates from {}", store.base_path().display());

    let filler = ContractFiller::new(Arc::new(store), Arc::new(layouts));
    http::serve(config.bind_addr()?, filler).await?;

    Ok(())
}
