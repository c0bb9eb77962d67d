pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalTemplateStore;
pub use config::AppConfig;
pub use crate::core::{filler::ContractFiller, layout::LayoutRegistry};
pub use utils::error::{FillError, Result};
