use crate::core::date_math::{next_day, parse_calendar_date};
use crate::core::geo::estimate_travel_hours;
use crate::domain::model::{ItineraryEntry, Place, Stop, TransportationMode, TravelDay, VisitDay};

const ACTIVITIES_BY_STAY_DAY: [&[&str]; 4] = [
    &["Visitor Center", "Easy Scenic Drives", "Photography"],
    &["Moderate Hiking", "Wildlife Viewing", "Ranger Programs"],
    &["Challenging Hikes", "Backcountry Exploration", "Sunrise/Sunset Views"],
    &["Multi-day Activities", "Special Tours", "Rest and Reflection"],
];

/// Activity ideas for the n-th day at a park (1-based). Days past the
/// fourth reuse the fourth day's list.
pub fn suggested_activities(stay_day: u32) -> &'static [&'static str] {
    let index = stay_day.clamp(1, ACTIVITIES_BY_STAY_DAY.len() as u32) as usize - 1;
    ACTIVITIES_BY_STAY_DAY[index]
}

pub fn travel_suggestions(mode: TransportationMode) -> &'static [&'static str] {
    match mode {
        TransportationMode::Driving => &[
            "Plan scenic stops along the route",
            "Check road conditions and closures",
            "Book overnight stays if driving time > 6 hours",
        ],
        TransportationMode::Flying => &[
            "Book flights 2-3 months in advance",
            "Consider rental car at destination",
            "Check baggage restrictions for outdoor gear",
        ],
    }
}

const SUGGESTED_STAYS: [(&str, u32); 10] = [
    ("Yellowstone", 4),
    ("Grand Canyon", 3),
    ("Yosemite", 3),
    ("Glacier", 4),
    ("Olympic", 3),
    ("Great Smoky Mountains", 2),
    ("Zion", 2),
    ("Bryce Canyon", 2),
    ("Arches", 2),
    ("Canyonlands", 3),
];

/// Default stay length offered when a park is added to a trip. Large parks
/// come from a fixed table; otherwise a longer description suggests more to see.
pub fn suggest_park_duration(park_name: &str, description: Option<&str>) -> u32 {
    if let Some((_, days)) = SUGGESTED_STAYS
        .iter()
        .find(|(name, _)| park_name.contains(name))
    {
        return *days;
    }

    match description.map(|d| d.chars().count()) {
        Some(len) if len > 500 => 3,
        _ => 2,
    }
}

/// Expands the stops into one entry per calendar day.
///
/// Each stop contributes `stay_days()` visit days, followed by a single
/// travel day unless it is the last stop. An empty stop list or a missing
/// start date yields an empty itinerary.
pub fn generate_itinerary(
    stops: &[Stop],
    start_date: Option<&str>,
    mode: TransportationMode,
) -> Vec<ItineraryEntry> {
    let Some(start) = parse_calendar_date(start_date) else {
        return Vec::new();
    };
    if stops.is_empty() {
        return Vec::new();
    }

    let visit_days: usize = stops.iter().map(|s| s.stay_days() as usize).sum();
    let mut entries = Vec::with_capacity(visit_days + stops.len() - 1);
    let mut current = start;
    let mut day_number = 0;

    for (stop_index, stop) in stops.iter().enumerate() {
        let total_stay_days = stop.stay_days();

        for stay_day in 1..=total_stay_days {
            day_number += 1;
            entries.push(ItineraryEntry::Visit(VisitDay {
                date: current,
                day_number,
                stop_index,
                park_id: stop.park_id.clone(),
                park_name: stop.park_name.clone(),
                state: stop.state.clone(),
                stay_day,
                total_stay_days,
                coordinates: stop.coordinates,
                suggested_activities: suggested_activities(stay_day)
                    .iter()
                    .map(|a| a.to_string())
                    .collect(),
            }));
            current = next_day(current);
        }

        if let Some(next) = stops.get(stop_index + 1) {
            entries.push(ItineraryEntry::Travel(TravelDay {
                date: current,
                transportation_mode: mode,
                from: Place::from(stop),
                to: Place::from(next),
                estimated_hours: estimate_travel_hours(stop, next, mode),
                suggestions: travel_suggestions(mode).iter().map(|s| s.to_string()).collect(),
            }));
            current = next_day(current);
        }
    }

    tracing::debug!(
        stops = stops.len(),
        days = entries.len(),
        "generated itinerary"
    );
    entries
}
