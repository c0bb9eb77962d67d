pub mod filler;
pub mod layout;
pub mod observation;
pub mod pdf;
pub mod renderer;
pub mod sanitizer;

pub use crate::domain::model::{ExtractedFields, FieldLayout, FieldSlot, Placement, RenderResult};
pub use crate::domain::ports::{ConfigProvider, PageCanvas, TemplateStore};
pub use crate::utils::error::Result;
