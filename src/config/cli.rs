use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "contract-filler")]
#[command(about = "Fills PDF contract templates from observation text over HTTP")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding one template per contract
    #[arg(long)]
    pub template_dir: Option<String>,

    /// Template file extension, without the dot
    #[arg(long)]
    pub template_extension: Option<String>,

    /// Address the HTTP server listens on
    #[arg(long)]
    pub bind: Option<String>,

    /// TOML file with field layouts, replacing the built-in ones
    #[arg(long)]
    pub layouts: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Merge the optional config file with command-line overrides.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.template_dir {
            config.templates.dir = dir.clone();
        }
        if let Some(extension) = &self.template_extension {
            config.templates.extension = extension.clone();
        }
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(layouts) = &self.layouts {
            config.layouts.file = Some(layouts.clone());
        }

        Ok(config)
    }
}
