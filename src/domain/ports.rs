use crate::domain::model::Rgb;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Where contract templates live. One file per contract identifier.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    fn template_path(&self, contract_id: &str) -> PathBuf;
    async fn exists(&self, contract_id: &str) -> bool;
    async fn read_template(&self, contract_id: &str) -> Result<Vec<u8>>;
    /// Identifiers of every template in the store, sorted.
    async fn list_contracts(&self) -> Result<Vec<String>>;
}

/// A drawing surface for a single page.
pub trait PageCanvas {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn template_dir(&self) -> &str;
    fn template_extension(&self) -> &str;
}
