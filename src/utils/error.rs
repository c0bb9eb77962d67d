use thiserror::Error;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("PDF template ({path}) not found for contract '{contract_id}'")]
    TemplateNotFoundError { contract_id: String, path: String },

    #[error("Failed to load PDF document: {message}")]
    DocumentLoadError { message: String },

    #[error("The PDF template for contract '{contract_id}' has no pages")]
    EmptyDocumentError { contract_id: String },

    #[error("No field layout registered for contract '{contract_id}'")]
    LayoutNotFoundError { contract_id: String },

    #[error("Invalid contract identifier '{contract_id}': {reason}")]
    InvalidContractIdError { contract_id: String, reason: String },

    #[error("Failed to render PDF: {message}")]
    RenderingError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked for something that does not exist or is malformed.
    Request,
    /// The template on disk is unusable.
    Template,
    /// Drawing or serialization failed.
    Rendering,
    Configuration,
    System,
}

impl FillError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FillError::TemplateNotFoundError { .. }
            | FillError::LayoutNotFoundError { .. }
            | FillError::InvalidContractIdError { .. } => ErrorCategory::Request,
            FillError::DocumentLoadError { .. } | FillError::EmptyDocumentError { .. } => {
                ErrorCategory::Template
            }
            FillError::RenderingError { .. } => ErrorCategory::Rendering,
            FillError::ConfigError { .. } | FillError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            FillError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn rendering(err: impl std::fmt::Display) -> Self {
        FillError::RenderingError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FillError>;
