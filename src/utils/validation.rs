use crate::domain::model::OutputFormat;
use crate::utils::error::{AnalyzerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
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
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses format names, rejecting unknown ones and duplicates.
pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<Vec<OutputFormat>> {
    if formats.is_empty() {
        return Err(AnalyzerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(formats.len());
    for raw in formats {
        let format: OutputFormat = raw.parse().map_err(|reason| {
            AnalyzerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: raw.clone(),
                reason: format!(
                    "{}. Valid formats: {}",
                    reason,
                    OutputFormat::ALL.map(|f| f.as_str()).join(", ")
                ),
            }
        })?;
        if !seen.insert(format) {
            return Err(AnalyzerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: raw.clone(),
                reason: "Format listed more than once".to_string(),
            });
        }
        parsed.push(format);
    }
    Ok(parsed)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalyzerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
