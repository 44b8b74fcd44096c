pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use crate::config::toml_config::PlannerConfig;
    use crate::core::date_math::parse_calendar_date;
    use crate::core::export::SUPPORTED_FORMATS;
    use crate::utils::error::{PlannerError, Result};
    use crate::utils::validation::{validate_allowed_values, validate_path, Validate};
    use chrono::NaiveDate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "park-trip-planner")]
    #[command(about = "Builds a day-by-day itinerary and budget for a national park trip")]
    pub struct CliConfig {
        /// Path to the trip document (JSON)
        pub trip: String,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Directory exports are written to
        #[arg(long)]
        pub output_path: Option<String>,

        /// Export formats (json, csv, tsv)
        #[arg(long, value_delimiter = ',')]
        pub formats: Vec<String>,

        /// Bundle exports into a single ZIP archive
        #[arg(long)]
        pub zip: bool,

        /// Reorder stops to shorten the route before planning
        #[arg(long)]
        pub optimize_route: bool,

        /// Date used for "start date in the past" checks (YYYY-MM-DD)
        #[arg(long)]
        pub today: Option<String>,

        /// Print the plan as JSON instead of the text summary
        #[arg(long)]
        pub json: bool,

        /// Show the plan without writing any export
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Loads the TOML file when given, then lets command-line flags win.
        pub fn planner_config(&self) -> Result<PlannerConfig> {
            let mut config = match &self.config {
                Some(path) => PlannerConfig::from_file(path)?,
                None => PlannerConfig::default(),
            };

            if let Some(output_path) = &self.output_path {
                config.export.output_path = output_path.clone();
            }
            if !self.formats.is_empty() {
                config.export.formats = self.formats.clone();
            }
            if self.zip {
                config.export.zip = true;
            }
            if self.optimize_route {
                config.export.optimize_route = true;
            }

            Ok(config)
        }

        /// The `--today` override, or the local calendar date.
        pub fn today(&self) -> Result<NaiveDate> {
            match &self.today {
                Some(raw) => parse_calendar_date(Some(raw)).ok_or_else(|| {
                    PlannerError::InvalidConfigValueError {
                        field: "today".to_string(),
                        value: raw.clone(),
                        reason: "Expected a YYYY-MM-DD date".to_string(),
                    }
                }),
                None => Ok(chrono::Local::now().date_naive()),
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("trip", &self.trip)?;
            if let Some(output_path) = &self.output_path {
                validate_path("output_path", output_path)?;
            }
            validate_allowed_values("formats", &self.formats, &SUPPORTED_FORMATS)?;
            self.today()?;
            Ok(())
        }
    }

}
