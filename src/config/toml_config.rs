use crate::core::layout::LayoutRegistry;
use crate::core::ConfigProvider;
use crate::utils::error::{FillError, Result};
use crate::utils::validation::{
    validate_bind_address, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_TEMPLATE_DIR: &str = "./modelos_pdf";
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "pdf";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub layouts: LayoutsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_template_dir")]
    pub dir: String,
    #[serde(default = "default_template_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutsConfig {
    /// Replaces the built-in layouts when set.
    pub file: Option<String>,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_template_dir() -> String {
    DEFAULT_TEMPLATE_DIR.to_string()
}

fn default_template_extension() -> String {
    DEFAULT_TEMPLATE_EXTENSION.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_template_dir(),
            extension: default_template_extension(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string, expanding `${VAR}` references
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FillError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Unset variables are left as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validate_bind_address("server.bind", &self.server.bind)
    }

    pub fn load_layouts(&self) -> Result<LayoutRegistry> {
        match &self.layouts.file {
            Some(file) => {
                tracing::info!("Loading layouts from {}", file);
                LayoutRegistry::from_file(file)
            }
            None => LayoutRegistry::builtin(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn template_dir(&self) -> &str {
        &self.templates.dir
    }

    fn template_extension(&self) -> &str {
        &self.templates.extension
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        validate_path("templates.dir", &self.templates.dir)?;
        validate_non_empty_string("templates.extension", &self.templates.extension)?;
        if let Some(file) = &self.layouts.file {
            validate_path("layouts.file", file)?;
        }
        Ok(())
    }
}
