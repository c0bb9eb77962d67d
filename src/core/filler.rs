use crate::core::layout::LayoutRegistry;
use crate::core::observation::parse;
use crate::core::pdf::PdfPageCanvas;
use crate::core::renderer::render;
use crate::domain::model::RenderResult;
use crate::domain::ports::TemplateStore;
use crate::utils::error::{FillError, Result};
use crate::utils::validation::validate_contract_id;
use chrono::{Local, NaiveDate};
use lopdf::Document;
use std::sync::Arc;

/// Loads a contract template, draws the observation onto its first page and
/// hands back the finished document.
#[derive(Clone)]
pub struct ContractFiller {
    store: Arc<dyn TemplateStore>,
    layouts: Arc<LayoutRegistry>,
}

impl ContractFiller {
    pub fn new(store: Arc<dyn TemplateStore>, layouts: Arc<LayoutRegistry>) -> Self {
        Self { store, layouts }
    }

    pub fn store(&self) -> &dyn TemplateStore {
        self.store.as_ref()
    }

    /// Fill the template for `contract_id`, stamping today's date.
    pub async fn generate(&self, contract_id: &str, observation: &str) -> RenderResult {
        self.generate_on(contract_id, observation, Local::now().date_naive())
            .await
    }

    pub async fn generate_on(
        &self,
        contract_id: &str,
        observation: &str,
        date: NaiveDate,
    ) -> RenderResult {
        tracing::info!("Filling contract '{}'", contract_id);
        validate_contract_id(contract_id)?;

        let template_path = self.store.template_path(contract_id);
        tracing::debug!("Template path: {}", template_path.display());
        if !self.store.exists(contract_id).await {
            tracing::warn!("Template not found: {}", template_path.display());
            return Err(FillError::TemplateNotFoundError {
                contract_id: contract_id.to_string(),
                path: template_path.display().to_string(),
            });
        }

        let template = self.store.read_template(contract_id).await?;
        tracing::debug!("Read template ({} bytes)", template.len());

        let output = fill_document(&template, contract_id, observation, &self.layouts, date)?;
        tracing::info!(
            "Contract '{}' filled ({} bytes)",
            contract_id,
            output.len()
        );
        Ok(output)
    }
}

/// The synchronous part of [`ContractFiller::generate_on`]: everything after
/// the template bytes are in memory.
pub fn fill_document(
    template: &[u8],
    contract_id: &str,
    observation: &str,
    layouts: &LayoutRegistry,
    date: NaiveDate,
) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(template).map_err(|e| FillError::DocumentLoadError {
        message: e.to_string(),
    })?;

    let pages = doc.get_pages();
    tracing::debug!("Template has {} pages", pages.len());
    let Some(&page_id) = pages.values().next() else {
        return Err(FillError::EmptyDocumentError {
            contract_id: contract_id.to_string(),
        });
    };

    let layout = layouts
        .resolve(contract_id)
        .ok_or_else(|| FillError::LayoutNotFoundError {
            contract_id: contract_id.to_string(),
        })?;

    let fields = parse(observation);
    tracing::debug!(
        "Extracted {} fields, drawing with layout '{}'",
        fields.len(),
        layout.name
    );

    let mut canvas = PdfPageCanvas::new(&mut doc, page_id);
    render(&mut canvas, layout, &fields, date)?;
    canvas.finish()?;

    let mut output = Vec::new();
    doc.save_to(&mut output).map_err(FillError::rendering)?;
    Ok(output)
}
