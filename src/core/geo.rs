use crate::domain::model::{Coordinates, Stop, TransportationMode};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Hours assumed for a leg when either end has no coordinates.
pub const DEFAULT_TRAVEL_HOURS: u32 = 4;

const DRIVING_MPH: f64 = 60.0;
const FLYING_MILES_PER_HOUR_WITH_AIRPORT: f64 = 500.0;

/// Great-circle distance in miles. A zero latitude or longitude marks an
/// unknown position and yields 0.
pub fn haversine_miles(from: Option<&Coordinates>, to: Option<&Coordinates>) -> f64 {
    let (Some(a), Some(b)) = (from, to) else {
        return 0.0;
    };
    if a.lat == 0.0 || a.lng == 0.0 || b.lat == 0.0 || b.lng == 0.0 {
        return 0.0;
    }

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Unrounded sum over consecutive stops that both carry coordinates.
pub fn raw_route_distance(stops: &[Stop]) -> f64 {
    stops
        .windows(2)
        .filter(|pair| pair[0].coordinates.is_some() && pair[1].coordinates.is_some())
        .map(|pair| haversine_miles(pair[0].coordinates.as_ref(), pair[1].coordinates.as_ref()))
        .sum()
}

/// Route mileage rounded to whole miles.
pub fn route_distance(stops: &[Stop]) -> f64 {
    raw_route_distance(stops).round()
}

pub fn estimate_travel_hours(from: &Stop, to: &Stop, mode: TransportationMode) -> u32 {
    if from.coordinates.is_none() || to.coordinates.is_none() {
        return DEFAULT_TRAVEL_HOURS;
    }

    let miles = haversine_miles(from.coordinates.as_ref(), to.coordinates.as_ref());
    let hours = match mode {
        TransportationMode::Flying => (miles / FLYING_MILES_PER_HOUR_WITH_AIRPORT).ceil().max(2.0),
        TransportationMode::Driving => (miles / DRIVING_MPH).ceil().max(1.0),
    };
    hours as u32
}
