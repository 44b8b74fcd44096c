use crate::core::date_math::duration_in_days;
use crate::domain::model::{CostBreakdown, TransportationMode, Trip};
use serde::{Deserialize, Serialize};

/// Flat per-unit rates behind the budget estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    pub nightly_lodging: f64,
    pub flight_per_stop: f64,
    pub driving_per_mile: f64,
    pub park_entry_fee: f64,
    pub food_per_day: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            nightly_lodging: 85.0,
            flight_per_stop: 275.0,
            driving_per_mile: 0.20,
            park_entry_fee: 30.0,
            food_per_day: 55.0,
        }
    }
}

pub fn estimate_cost(trip: &Trip) -> CostBreakdown {
    estimate_cost_with(trip, &CostRates::default())
}

/// Each component is rounded on its own and `total` is the sum of the
/// rounded components.
pub fn estimate_cost_with(trip: &Trip, rates: &CostRates) -> CostBreakdown {
    let duration = f64::from(duration_in_days(
        trip.start_date.as_deref(),
        trip.end_date.as_deref(),
    ));
    let nights = (duration - 1.0).max(0.0);
    let stop_count = trip.stop_count() as f64;
    let distance = usable_distance(trip.total_distance);

    let accommodation = round_half_up(nights * rates.nightly_lodging);
    let transportation = match trip.mode() {
        TransportationMode::Flying => round_half_up(stop_count * rates.flight_per_stop),
        TransportationMode::Driving => round_half_up(distance * rates.driving_per_mile),
    };
    let park_fees = round_half_up(stop_count * rates.park_entry_fee);
    let food = round_half_up(duration * rates.food_per_day);

    tracing::trace!(duration, nights, stop_count, distance, "estimated trip cost");

    CostBreakdown {
        accommodation,
        transportation,
        park_fees,
        food,
        total: accommodation + transportation + park_fees + food,
    }
}

fn usable_distance(miles: Option<f64>) -> f64 {
    match miles {
        Some(m) if m.is_finite() && m > 0.0 => m,
        _ => 0.0,
    }
}

/// Rounds halves towards positive infinity; non-finite input is 0.
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Stop;

    fn flying_trip() -> Trip {
        Trip {
            start_date: Some("2024-08-10".to_string()),
            end_date: Some("2024-08-12".to_string()),
            transportation_mode: Some(TransportationMode::Flying),
            parks: vec![
                Stop::new("a", "A", "Utah").with_stay(2.0),
                Stop::new("b", "B", "Utah").with_stay(1.0),
            ],
            total_distance: Some(500.0),
            ..Trip::default()
        }
    }

    #[test]
    fn test_flying_scenario() {
        let cost = estimate_cost(&flying_trip());
        assert_eq!(
            cost,
            CostBreakdown {
                accommodation: 170,
                transportation: 550,
                park_fees: 60,
                food: 165,
                total: 945,
            }
        );
    }

    #[test]
    fn test_driving_uses_distance() {
        let mut trip = flying_trip();
        trip.transportation_mode = None;
        let cost = estimate_cost(&trip);
        assert_eq!(cost.transportation, 100);
        assert_eq!(cost.total, 170 + 100 + 60 + 165);
    }

    #[test]
    fn test_empty_trip_is_food_only() {
        let trip = Trip::default();
        let cost = estimate_cost(&trip);
        assert_eq!(cost.accommodation, 0);
        assert_eq!(cost.transportation, 0);
        assert_eq!(cost.park_fees, 0);
        assert_eq!(cost.total, 55);
    }

    #[test]
    fn test_components_round_before_summing() {
        let trip = Trip {
            total_distance: Some(12.5),
            ..Trip::default()
        };
        // 12.5 * 0.2 = 2.5 rounds up to 3
        assert_eq!(estimate_cost(&trip).transportation, 3);
    }

    #[test]
    fn test_negative_distance_is_ignored() {
        let trip = Trip {
            total_distance: Some(-400.0),
            ..Trip::default()
        };
        assert_eq!(estimate_cost(&trip).transportation, 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(f64::INFINITY), 0);
    }
}
