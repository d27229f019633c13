use crate::utils::error::{ExtractError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ExtractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_unit_interval(field_name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(ExtractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be within [0, 1]".to_string(),
        });
    }
    Ok(())
}

/// Completeness weights must form a convex combination.
pub fn validate_weight_sum(field_name: &str, weights: &[f64]) -> Result<()> {
    for w in weights {
        if !(0.0..=1.0).contains(w) || w.is_nan() {
            return Err(ExtractError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: w.to_string(),
                reason: "Each weight must be within [0, 1]".to_string(),
            });
        }
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-6 {
        return Err(ExtractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: sum.to_string(),
            reason: "Weights must sum to 1.0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExtractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
