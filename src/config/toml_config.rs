use crate::core::cost_model::CostRates;
use crate::core::export::SUPPORTED_FORMATS;
use crate::core::trip_checks::TripLimits;
use crate::core::PlannerSettings;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{
    validate_allowed_values, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_RATE: f64 = 100_000.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub rates: CostRates,
    pub limits: TripLimits,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub zip: bool,
    pub optimize_route: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec!["json".to_string(), "csv".to_string()],
            zip: false,
            optimize_route: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `compact` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("export.output_path", &self.export.output_path)?;
        validate_allowed_values("export.formats", &self.export.formats, &SUPPORTED_FORMATS)?;
        validate_non_empty_string("logging.format", &self.logging.format)?;
        validate_allowed_values(
            "logging.format",
            std::slice::from_ref(&self.logging.format),
            &["compact", "json"],
        )?;

        let rates = &self.rates;
        validate_range("rates.nightly_lodging", rates.nightly_lodging, 0.0, MAX_RATE)?;
        validate_range("rates.flight_per_stop", rates.flight_per_stop, 0.0, MAX_RATE)?;
        validate_range("rates.driving_per_mile", rates.driving_per_mile, 0.0, MAX_RATE)?;
        validate_range("rates.park_entry_fee", rates.park_entry_fee, 0.0, MAX_RATE)?;
        validate_range("rates.food_per_day", rates.food_per_day, 0.0, MAX_RATE)?;

        validate_positive_number("limits.max_parks", self.limits.max_parks, 1)?;
        validate_positive_number("limits.max_trip_days", self.limits.max_trip_days as usize, 1)?;

        Ok(())
    }
}

impl PlannerSettings for PlannerConfig {
    fn cost_rates(&self) -> CostRates {
        self.rates
    }

    fn trip_limits(&self) -> TripLimits {
        self.limits
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_formats(&self) -> &[String] {
        &self.export.formats
    }

    fn zip_exports(&self) -> bool {
        self.export.zip
    }

    fn optimize_route(&self) -> bool {
        self.export.optimize_route
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
