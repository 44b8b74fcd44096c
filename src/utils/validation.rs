use crate::utils::error::{PlannerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(PlannerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
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
    // NaN fails both comparisons, so reject it explicitly through partial_cmp
    if value.partial_cmp(&min).is_none() || value < min || value > max {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
        assert!(validate_path("export.output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("limits.max_parks", 20, 1).is_ok());
        assert!(validate_positive_number("limits.max_parks", 0, 1).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_allowed_values("export.formats", &formats, &["json", "csv"]).is_ok());

        let invalid = vec!["xml".to_string()];
        assert!(validate_allowed_values("export.formats", &invalid, &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("rates.food_per_day", 55.0, 0.0, 10_000.0).is_ok());
        assert!(validate_range("rates.food_per_day", -1.0, 0.0, 10_000.0).is_err());
        assert!(validate_range("rates.food_per_day", f64::NAN, 0.0, 10_000.0).is_err());
    }
}
