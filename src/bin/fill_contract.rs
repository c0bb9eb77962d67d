use anyhow::{bail, Context};
use clap::Parser;
use contract_filler::config::toml_config::{DEFAULT_TEMPLATE_DIR, DEFAULT_TEMPLATE_EXTENSION};
use contract_filler::core::TemplateStore;
use contract_filler::utils::logger;
use contract_filler::{ContractFiller, LayoutRegistry, LocalTemplateStore};
use std::path::PathBuf;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

#[derive(Parser)]
#[command(name = "fill-contract")]
#[command(about = "Fill a contract template from an observation file without the HTTP server")]
struct Args {
    /// Contract identifier, e.g. 204
    #[arg(long, required_unless_present = "list")]
    contract: Option<String>,

    /// File holding the observation text; reads stdin when omitted
    #[arg(long)]
    observation_file: Option<PathBuf>,

    /// Where to write the filled PDF
    #[arg(short, long, default_value = "Contrato_Preenchido.pdf")]
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_TEMPLATE_DIR)]
    template_dir: String,

    #[arg(long, default_value = DEFAULT_TEMPLATE_EXTENSION)]
    template_extension: String,

    /// TOML file with field layouts, replacing the built-in ones
    #[arg(long)]
    layouts: Option<PathBuf>,

    /// List available contracts and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger(args.verbose, false);

    let store = LocalTemplateStore::new(&args.template_dir, args.template_extension.clone());

    if args.list {
        for contract in store.list_contracts().await? {
            println!("{}", contract);
        }
        return Ok(());
    }

    let Some(contract_id) = args.contract.as_deref() else {
        bail!("--contract is required");
    };

    let layouts = match &args.layouts {
        Some(path) => LayoutRegistry::from_file(path)
            .with_context(|| format!("failed to load layouts from {}", path.display()))?,
        None => LayoutRegistry::builtin()?,
    };

    let observation = match &args.observation_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
            buffer
        }
    };

    let observation: String = observation.nfc().collect();

    let filler = ContractFiller::new(Arc::new(store), Arc::new(layouts));
    let pdf = filler.generate(contract_id, &observation).await?;

    tokio::fs::write(&args.output, &pdf)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!("Wrote {} ({} bytes)", args.output.display(), pdf.len());
    println!("✅ Filled contract saved to {}", args.output.display());
    Ok(())
}
