pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::PlannerConfig};
pub use crate::core::{
    cost_model::{estimate_cost, estimate_cost_with, CostRates},
    date_math::{duration_in_days, format_for_display},
    itinerary::generate_itinerary,
    planner::{PlanReport, TripPlan, TripPlanner},
    templates::{create_trip_from_template, CatalogPark, TripTemplate},
};
pub use crate::domain::model::{
    Coordinates, CostBreakdown, ItineraryEntry, Stop, TransportationMode, Trip, TripSummary,
};
pub use crate::utils::error::{PlannerError, Result};
