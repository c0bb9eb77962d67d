use crate::domain::ports::{ConfigProvider, TemplateStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Templates kept as `<contract>.<extension>` files in one directory.
#[derive(Debug, Clone)]
pub struct LocalTemplateStore {
    base_path: PathBuf,
    extension: String,
}

impl LocalTemplateStore {
    pub fn new(base_path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.template_dir(), config.template_extension())
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Create the template directory if it is missing.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.base_path.exists() {
            tracing::info!("Creating template directory {}", self.base_path.display());
            std::fs::create_dir_all(&self.base_path)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TemplateStore for LocalTemplateStore {
    fn template_path(&self, contract_id: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", contract_id, self.extension))
    }

    async fn exists(&self, contract_id: &str) -> bool {
        tokio::fs::metadata(self.template_path(contract_id))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn read_template(&self, contract_id: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.template_path(contract_id)).await?;
        Ok(data)
    }

    async fn list_contracts(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        let mut contracts = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if !matches_extension {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                contracts.push(stem.to_string());
            }
        }

        contracts.sort();
        Ok(contracts)
    }
}
