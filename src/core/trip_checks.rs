use crate::core::date_math::{duration_in_days, parse_date, ParsedDate};
use crate::domain::model::Trip;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripLimits {
    pub max_trip_days: u32,
    pub max_parks: usize,
    /// Days the summed stays may run past the trip length before it is flagged.
    pub stay_slack_days: u32,
}

impl Default for TripLimits {
    fn default() -> Self {
        Self {
            max_trip_days: 180,
            max_parks: 20,
            stay_slack_days: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TripField {
    Title,
    StartDate,
    EndDate,
    Parks,
    TransportationMode,
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TripField::Title => "title",
            TripField::StartDate => "startDate",
            TripField::EndDate => "endDate",
            TripField::Parks => "parks",
            TripField::TransportationMode => "transportationMode",
        };
        f.write_str(name)
    }
}

/// One message per field; a later check on the same field replaces the earlier message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripValidation {
    pub errors: BTreeMap<TripField, String>,
}

impl TripValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: TripField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn flag(&mut self, field: TripField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

/// Checks a trip before it is saved. `today` is passed in so the check
/// stays deterministic.
pub fn validate_trip(trip: &Trip, today: NaiveDate, limits: &TripLimits) -> TripValidation {
    let mut report = TripValidation::default();

    if trip.title.trim().is_empty() {
        report.flag(TripField::Title, "Trip title is required");
    }

    let start = parse_date(trip.start_date.as_deref());
    let end = parse_date(trip.end_date.as_deref());

    match start {
        ParsedDate::Missing => report.flag(TripField::StartDate, "Start date is required"),
        ParsedDate::Invalid => report.flag(TripField::StartDate, "Start date is not a valid date"),
        ParsedDate::Valid(_) => {}
    }
    match end {
        ParsedDate::Missing => report.flag(TripField::EndDate, "End date is required"),
        ParsedDate::Invalid => report.flag(TripField::EndDate, "End date is not a valid date"),
        ParsedDate::Valid(_) => {}
    }

    let duration = duration_in_days(trip.start_date.as_deref(), trip.end_date.as_deref());

    if let (ParsedDate::Valid(start), ParsedDate::Valid(end)) = (start, end) {
        if start >= end {
            report.flag(TripField::EndDate, "End date must be after start date");
        }
        if start.date_naive() < today {
            report.flag(TripField::StartDate, "Start date cannot be in the past");
        }
        if duration > limits.max_trip_days {
            report.flag(
                TripField::EndDate,
                format!("Trip cannot be longer than {} days", limits.max_trip_days),
            );
        }
    }

    if trip.parks.is_empty() {
        report.flag(TripField::Parks, "Please select at least one park");
    } else if trip.parks.len() > limits.max_parks {
        report.flag(
            TripField::Parks,
            format!("Maximum {} parks allowed per trip", limits.max_parks),
        );
    } else {
        let mut seen = HashSet::new();
        if !trip.parks.iter().all(|p| seen.insert(p.park_id.as_str())) {
            report.flag(TripField::Parks, "Each park can only be added once");
        }
    }

    if trip.transportation_mode.is_none() {
        report.flag(
            TripField::TransportationMode,
            "Please select a transportation method",
        );
    }

    if !trip.parks.is_empty() {
        let total_stay: u64 = trip.parks.iter().map(|p| u64::from(p.stay_days())).sum();
        if total_stay > u64::from(duration) + u64::from(limits.stay_slack_days) {
            report.flag(TripField::Parks, "Total park stay days exceed trip duration");
        }
    }

    if !report.is_valid() {
        tracing::debug!(errors = report.errors.len(), "trip failed validation");
    }
    report
}

/// Whether every field the wizard asks for has been filled in.
pub fn is_trip_complete(trip: &Trip) -> bool {
    !trip.title.trim().is_empty()
        && trip.start_date.as_deref().is_some_and(|d| !d.trim().is_empty())
        && trip.end_date.as_deref().is_some_and(|d| !d.trim().is_empty())
        && !trip.parks.is_empty()
        && trip.transportation_mode.is_some()
}
