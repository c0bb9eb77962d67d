use crate::domain::model::{DateStamp, FieldLayout, FieldSlot, Placement, Rgb};
use crate::utils::error::{FillError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

const BUILTIN_LAYOUTS: &str = include_str!("../../layouts/default.toml");
const DEFAULT_FONT_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub layouts: Vec<LayoutSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub name: String,
    pub contracts: Vec<String>,
    pub font_size: Option<f32>,
    pub color: Option<Rgb>,
    pub date_stamp: DateStampSpec,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<PositionSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateStampSpec {
    pub day: PositionSpec,
    pub month: PositionSpec,
    pub year: PositionSpec,
}

/// A position as written in the layout file; size and color fall back to
/// the layout-wide values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSpec {
    pub x: f32,
    pub y: f32,
    pub font_size: Option<f32>,
    pub color: Option<Rgb>,
}

impl PositionSpec {
    fn resolve(&self, font_size: f32, color: Rgb) -> Placement {
        Placement {
            x: self.x,
            y: self.y,
            font_size: self.font_size.unwrap_or(font_size),
            color: self.color.unwrap_or(color),
        }
    }
}

/// Read-only lookup from contract identifier to the layout its template uses.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    by_contract: HashMap<String, Arc<FieldLayout>>,
}

impl LayoutRegistry {
    /// Layouts shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_LAYOUTS)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LayoutFile = toml::from_str(content).map_err(|e| FillError::ConfigError {
            message: format!("Layout file parsing error: {}", e),
        })?;
        Self::from_specs(file.layouts)
    }

    pub fn from_specs(specs: Vec<LayoutSpec>) -> Result<Self> {
        let mut by_contract = HashMap::new();

        for spec in specs {
            let layout = Arc::new(build_layout(&spec)?);

            for contract in &spec.contracts {
                validate_non_empty_string(&format!("layouts.{}.contracts", spec.name), contract)?;
                if let Some(existing) = by_contract.insert(contract.clone(), layout.clone()) {
                    return Err(FillError::InvalidConfigValueError {
                        field: format!("layouts.{}.contracts", spec.name),
                        value: contract.clone(),
                        reason: format!("contract already assigned to layout '{}'", existing.name),
                    });
                }
            }
        }

        tracing::debug!("Loaded layouts for {} contracts", by_contract.len());
        Ok(Self { by_contract })
    }

    pub fn resolve(&self, contract_id: &str) -> Option<&FieldLayout> {
        self.by_contract.get(contract_id).map(Arc::as_ref)
    }

    /// Every contract identifier that has a layout, sorted.
    pub fn contract_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.by_contract.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn build_layout(spec: &LayoutSpec) -> Result<FieldLayout> {
    validate_non_empty_string("layouts.name", &spec.name)?;

    let font_size = spec.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let color = spec.color.unwrap_or_default();

    let mut fields = HashMap::new();
    for (slot_name, positions) in &spec.fields {
        let slot = FieldSlot::from_name(slot_name).ok_or_else(|| FillError::InvalidConfigValueError {
            field: format!("layouts.{}.fields", spec.name),
            value: slot_name.clone(),
            reason: "unknown field slot".to_string(),
        })?;
        let placements: Vec<Placement> = positions
            .iter()
            .map(|position| position.resolve(font_size, color))
            .collect();
        fields.insert(slot, placements);
    }

    let date_stamp = DateStamp {
        day: spec.date_stamp.day.resolve(font_size, color),
        month: spec.date_stamp.month.resolve(font_size, color),
        year: spec.date_stamp.year.resolve(font_size, color),
    };

    let layout = FieldLayout {
        name: spec.name.clone(),
        fields,
        date_stamp,
    };
    validate_placements(&layout)?;
    Ok(layout)
}

fn validate_placements(layout: &FieldLayout) -> Result<()> {
    let stamp = &layout.date_stamp;
    let all = layout
        .fields
        .values()
        .flatten()
        .chain([&stamp.day, &stamp.month, &stamp.year]);

    for placement in all {
        let field = format!("layouts.{}", layout.name);
        if placement.font_size <= 0.0 {
            return Err(FillError::InvalidConfigValueError {
                field: format!("{}.font_size", field),
                value: placement.font_size.to_string(),
                reason: "font size must be positive".to_string(),
            });
        }
        validate_range(&format!("{}.font_size", field), placement.font_size, 0.0, 200.0)?;
        for component in [placement.color.r, placement.color.g, placement.color.b] {
            validate_range(&format!("{}.color", field), component, 0.0, 1.0)?;
        }
    }
    Ok(())
}
