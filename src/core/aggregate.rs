use crate::core::cost_model::{estimate_cost, estimate_cost_with, CostRates};
use crate::core::date_math::duration_in_days;
use crate::core::itinerary::generate_itinerary;
use crate::domain::model::{CostBreakdown, ItineraryEntry, Trip, TripSummary};

impl Trip {
    pub fn total_duration(&self) -> u32 {
        duration_in_days(self.start_date.as_deref(), self.end_date.as_deref())
    }

    pub fn nights(&self) -> u32 {
        self.total_duration().saturating_sub(1)
    }

    pub fn estimated_cost(&self) -> CostBreakdown {
        estimate_cost(self)
    }

    pub fn itinerary(&self) -> Vec<ItineraryEntry> {
        generate_itinerary(&self.parks, self.start_date.as_deref(), self.mode())
    }

    pub fn summary(&self) -> TripSummary {
        self.summary_with(&CostRates::default())
    }

    pub fn summary_with(&self, rates: &CostRates) -> TripSummary {
        TripSummary {
            duration_days: self.total_duration(),
            nights: self.nights(),
            stop_count: self.stop_count(),
            total_distance: self.total_distance.unwrap_or(0.0),
            transportation_mode: self.mode(),
            estimated_cost: estimate_cost_with(self, rates),
            itinerary_days: self.itinerary().len(),
        }
    }
}
