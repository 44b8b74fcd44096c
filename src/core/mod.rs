pub mod aggregate;
pub mod analytics;
pub mod cost_model;
pub mod date_math;
pub mod export;
pub mod geo;
pub mod itinerary;
pub mod planner;
pub mod route;
pub mod templates;
pub mod trip_checks;

pub use crate::domain::model::{CostBreakdown, ItineraryEntry, Stop, TransportationMode, Trip};
pub use crate::domain::ports::{PlannerSettings, Storage};
pub use crate::utils::error::Result;
