use crate::utils::error::{FillError, Result};
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_bind_address(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| FillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Contract identifiers are interpolated into a file name, so anything that
/// could step outside the template directory is refused.
pub fn validate_contract_id(contract_id: &str) -> Result<()> {
    let reason = if contract_id.trim().is_empty() {
        Some("identifier is empty")
    } else if contract_id.contains('/') || contract_id.contains('\\') {
        Some("identifier contains a path separator")
    } else if contract_id.contains("..") {
        Some("identifier contains '..'")
    } else if contract_id.contains('\0') {
        Some("identifier contains null bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FillError::InvalidContractIdError {
            contract_id: contract_id.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
