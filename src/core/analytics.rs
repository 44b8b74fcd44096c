//! Aggregate statistics across a user's saved trips.
//!
//! Costs and durations are recomputed from each trip, never read from stored
//! fields.

use crate::core::cost_model::{estimate_cost_with, round_half_up, CostRates};
use crate::core::date_math::{duration_in_days, parse_calendar_date};
use crate::domain::model::{TransportationMode, Trip};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// How many states `most_visited_states` reports.
pub const TOP_STATES: usize = 15;
/// How many parks `park_visit_frequency` reports.
pub const TOP_PARKS: usize = 20;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelStats {
    pub total_trips: usize,
    pub total_parks: usize,
    pub total_distance: i64,
    pub total_cost: i64,
    pub total_days: u64,
    pub avg_trip_length: i64,
    pub avg_trip_cost: i64,
    pub avg_parks_per_trip: f64,
    pub avg_cost_per_day: i64,
    pub avg_cost_per_park: i64,
    pub avg_distance_per_trip: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVisits {
    pub state: String,
    pub count: usize,
    pub percentage: i64,
    pub avg_days_per_visit: i64,
    pub unique_trips: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeBreakdown {
    pub mode: TransportationMode,
    pub count: usize,
    pub percentage: i64,
    pub avg_cost: i64,
    pub avg_distance: i64,
    pub avg_duration: i64,
    pub avg_parks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkVisits {
    pub name: String,
    pub state: String,
    pub visits: usize,
    pub avg_days_per_visit: i64,
    pub unique_trips: usize,
    pub last_visited: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Meteorological season for a zero-based month (0 = January).
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            8..=10 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStats {
    pub season: Season,
    pub count: usize,
    pub percentage: i64,
    pub avg_cost: i64,
    pub avg_parks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub month: &'static str,
    pub count: usize,
    pub avg_cost: i64,
    pub avg_parks: f64,
    /// Distinct calendar years with a trip starting in this month.
    pub years: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationBucket {
    pub key: &'static str,
    pub category: &'static str,
    pub count: usize,
    pub percentage: i64,
    pub avg_cost: i64,
    pub avg_parks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBucket {
    pub key: &'static str,
    pub category: &'static str,
    pub count: usize,
    pub percentage: i64,
    pub avg_cost: i64,
    pub avg_duration: i64,
    pub avg_parks: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyMetrics {
    pub avg_cost_per_day: i64,
    pub avg_cost_per_park: i64,
    pub avg_miles_per_day: i64,
    pub avg_parks_per_day: f64,
    /// 0..=100, starting from 50 and adjusted by cost, coverage and mileage.
    pub efficiency_score: i64,
    pub suggestions: Vec<String>,
}

/// Trip totals accumulated into one reporting bucket.
#[derive(Debug, Default)]
struct Bucket {
    count: usize,
    cost: i64,
    days: u64,
    parks: usize,
}

impl Bucket {
    fn add(&mut self, cost: i64, days: u64, parks: usize) {
        self.count += 1;
        self.cost += cost;
        self.days += days;
        self.parks += parks;
    }

    fn avg_cost(&self) -> i64 {
        ratio(self.cost as f64, self.count as f64)
    }

    fn avg_days(&self) -> i64 {
        ratio(self.days as f64, self.count as f64)
    }

    fn avg_parks(&self) -> f64 {
        one_decimal(self.parks as f64, self.count as f64)
    }
}

fn ratio(numerator: f64, denominator: f64) -> i64 {
    if denominator > 0.0 {
        round_half_up(numerator / denominator)
    } else {
        0
    }
}

fn one_decimal(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round_half_up(numerator / denominator * 10.0) as f64 / 10.0
    } else {
        0.0
    }
}

fn trip_distance(trip: &Trip) -> f64 {
    trip.total_distance.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0)
}

fn trip_days(trip: &Trip) -> u64 {
    u64::from(duration_in_days(trip.start_date.as_deref(), trip.end_date.as_deref()))
}

fn trip_start(trip: &Trip) -> Option<NaiveDate> {
    parse_calendar_date(trip.start_date.as_deref())
}

fn percentage_of(count: usize, total: usize) -> i64 {
    ratio(count as f64 * 100.0, total as f64)
}

pub fn travel_stats(trips: &[Trip], rates: &CostRates) -> TravelStats {
    if trips.is_empty() {
        return TravelStats::default();
    }

    let total_trips = trips.len();
    let total_parks: usize = trips.iter().map(Trip::stop_count).sum();
    let total_distance: f64 = trips.iter().map(trip_distance).sum();
    let total_cost: i64 = trips.iter().map(|t| estimate_cost_with(t, rates).total).sum();
    let total_days: u64 = trips.iter().map(trip_days).sum();

    let trips_f = total_trips as f64;
    let cost_f = total_cost as f64;

    TravelStats {
        total_trips,
        total_parks,
        total_distance: round_half_up(total_distance),
        total_cost,
        total_days,
        avg_trip_length: ratio(total_days as f64, trips_f),
        avg_trip_cost: ratio(cost_f, trips_f),
        avg_parks_per_trip: one_decimal(total_parks as f64, trips_f),
        avg_cost_per_day: ratio(cost_f, total_days as f64),
        avg_cost_per_park: ratio(cost_f, total_parks as f64),
        avg_distance_per_trip: ratio(total_distance, trips_f),
    }
}

/// States ranked by how many stops they account for, most visited first.
/// Ties keep alphabetical order.
pub fn most_visited_states(trips: &[Trip]) -> Vec<StateVisits> {
    #[derive(Default)]
    struct Tally {
        count: usize,
        days: u64,
        trips: HashSet<usize>,
    }

    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for (trip_index, trip) in trips.iter().enumerate() {
        for stop in trip.parks.iter().filter(|s| !s.state.trim().is_empty()) {
            let tally = tallies.entry(stop.state.as_str()).or_default();
            tally.count += 1;
            tally.days += u64::from(stop.stay_days());
            tally.trips.insert(trip_index);
        }
    }

    let total_parks: usize = trips.iter().map(Trip::stop_count).sum();
    let mut ranked: Vec<StateVisits> = tallies
        .into_iter()
        .map(|(state, tally)| StateVisits {
            state: state.to_string(),
            count: tally.count,
            percentage: ratio(tally.count as f64 * 100.0, total_parks as f64),
            avg_days_per_visit: ratio(tally.days as f64, tally.count as f64),
            unique_trips: tally.trips.len(),
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_STATES);
    ranked
}

/// Parks ranked by how often they appear across trips, keyed by park name.
/// Ties keep alphabetical order.
pub fn park_visit_frequency(trips: &[Trip]) -> Vec<ParkVisits> {
    struct Tally<'a> {
        state: &'a str,
        visits: usize,
        days: u64,
        trips: HashSet<usize>,
        last_visited: Option<NaiveDate>,
    }

    let mut tallies: BTreeMap<&str, Tally<'_>> = BTreeMap::new();
    for (trip_index, trip) in trips.iter().enumerate() {
        let start = trip_start(trip);
        for stop in trip.parks.iter().filter(|s| !s.park_name.trim().is_empty()) {
            let tally = tallies.entry(stop.park_name.as_str()).or_insert_with(|| Tally {
                state: stop.state.as_str(),
                visits: 0,
                days: 0,
                trips: HashSet::new(),
                last_visited: None,
            });
            tally.visits += 1;
            tally.days += u64::from(stop.stay_days());
            tally.trips.insert(trip_index);
            tally.last_visited = tally.last_visited.max(start);
        }
    }

    let mut ranked: Vec<ParkVisits> = tallies
        .into_iter()
        .map(|(name, tally)| ParkVisits {
            name: name.to_string(),
            state: tally.state.to_string(),
            visits: tally.visits,
            avg_days_per_visit: ratio(tally.days as f64, tally.visits as f64),
            unique_trips: tally.trips.len(),
            last_visited: tally.last_visited,
        })
        .collect();

    ranked.sort_by(|a, b| b.visits.cmp(&a.visits));
    ranked.truncate(TOP_PARKS);
    ranked
}

pub fn transportation_breakdown(trips: &[Trip], rates: &CostRates) -> Vec<ModeBreakdown> {
    #[derive(Default)]
    struct Tally {
        count: usize,
        cost: i64,
        distance: f64,
        days: u64,
        parks: usize,
    }

    let mut tallies: HashMap<TransportationMode, Tally> = HashMap::new();
    for trip in trips {
        let tally = tallies.entry(trip.mode()).or_default();
        tally.count += 1;
        tally.cost += estimate_cost_with(trip, rates).total;
        tally.distance += trip_distance(trip);
        tally.days += trip_days(trip);
        tally.parks += trip.stop_count();
    }

    let total = trips.len() as f64;
    [TransportationMode::Driving, TransportationMode::Flying]
        .into_iter()
        .filter_map(|mode| {
            let tally = tallies.get(&mode)?;
            let count = tally.count as f64;
            Some(ModeBreakdown {
                mode,
                count: tally.count,
                percentage: ratio(count * 100.0, total),
                avg_cost: ratio(tally.cost as f64, count),
                avg_distance: ratio(tally.distance, count),
                avg_duration: ratio(tally.days as f64, count),
                avg_parks: one_decimal(tally.parks as f64, count),
            })
        })
        .collect()
}

/// One row per season, by start month. Trips without a readable start date
/// still count toward the percentage denominator.
pub fn seasonal_preferences(trips: &[Trip], rates: &CostRates) -> Vec<SeasonStats> {
    if trips.is_empty() {
        return Vec::new();
    }

    let mut buckets: HashMap<Season, Bucket> = HashMap::new();
    for trip in trips {
        if let Some(start) = trip_start(trip) {
            buckets.entry(Season::from_month0(start.month0())).or_default().add(
                estimate_cost_with(trip, rates).total,
                trip_days(trip),
                trip.stop_count(),
            );
        }
    }

    Season::ALL
        .into_iter()
        .map(|season| {
            let bucket = buckets.remove(&season).unwrap_or_default();
            SeasonStats {
                season,
                count: bucket.count,
                percentage: percentage_of(bucket.count, trips.len()),
                avg_cost: bucket.avg_cost(),
                avg_parks: bucket.avg_parks(),
            }
        })
        .collect()
}

/// Twelve rows, January first, counting trips by start month.
pub fn monthly_trends(trips: &[Trip], rates: &CostRates) -> Vec<MonthlyTrend> {
    if trips.is_empty() {
        return Vec::new();
    }

    let mut buckets: [Bucket; 12] = Default::default();
    let mut years: [BTreeSet<i32>; 12] = Default::default();
    for trip in trips {
        if let Some(start) = trip_start(trip) {
            let month = start.month0() as usize;
            buckets[month].add(
                estimate_cost_with(trip, rates).total,
                trip_days(trip),
                trip.stop_count(),
            );
            years[month].insert(start.year());
        }
    }

    buckets
        .iter()
        .zip(years.iter())
        .zip(MONTH_NAMES)
        .map(|((bucket, years), month)| MonthlyTrend {
            month,
            count: bucket.count,
            avg_cost: bucket.avg_cost(),
            avg_parks: bucket.avg_parks(),
            years: years.len(),
        })
        .collect()
}

const DURATION_BUCKETS: [(&str, &str, u64); 4] = [
    ("weekend", "Weekend (1-3 days)", 3),
    ("short", "Short (4-7 days)", 7),
    ("medium", "Medium (8-14 days)", 14),
    ("extended", "Extended (15+ days)", u64::MAX),
];

pub fn duration_distribution(trips: &[Trip], rates: &CostRates) -> Vec<DurationBucket> {
    if trips.is_empty() {
        return Vec::new();
    }

    let mut buckets: [Bucket; 4] = Default::default();
    for trip in trips {
        let days = trip_days(trip);
        let index = DURATION_BUCKETS
            .iter()
            .position(|(_, _, max)| days <= *max)
            .unwrap_or(DURATION_BUCKETS.len() - 1);
        buckets[index].add(estimate_cost_with(trip, rates).total, days, trip.stop_count());
    }

    DURATION_BUCKETS
        .iter()
        .zip(buckets.iter())
        .map(|(&(key, category, _), bucket)| DurationBucket {
            key,
            category,
            count: bucket.count,
            percentage: percentage_of(bucket.count, trips.len()),
            avg_cost: bucket.avg_cost(),
            avg_parks: bucket.avg_parks(),
        })
        .collect()
}

const BUDGET_BUCKETS: [(&str, &str, i64); 4] = [
    ("budget", "Budget (< $1,000)", 999),
    ("moderate", "Moderate ($1,000 - $2,999)", 2_999),
    ("premium", "Premium ($3,000 - $4,999)", 4_999),
    ("luxury", "Luxury ($5,000+)", i64::MAX),
];

pub fn budget_distribution(trips: &[Trip], rates: &CostRates) -> Vec<BudgetBucket> {
    if trips.is_empty() {
        return Vec::new();
    }

    let mut buckets: [Bucket; 4] = Default::default();
    for trip in trips {
        let cost = estimate_cost_with(trip, rates).total;
        let index = BUDGET_BUCKETS
            .iter()
            .position(|(_, _, max)| cost <= *max)
            .unwrap_or(BUDGET_BUCKETS.len() - 1);
        buckets[index].add(cost, trip_days(trip), trip.stop_count());
    }

    BUDGET_BUCKETS
        .iter()
        .zip(buckets.iter())
        .map(|(&(key, category, _), bucket)| BudgetBucket {
            key,
            category,
            count: bucket.count,
            percentage: percentage_of(bucket.count, trips.len()),
            avg_cost: bucket.avg_cost(),
            avg_duration: bucket.avg_days(),
            avg_parks: bucket.avg_parks(),
        })
        .collect()
}

pub fn efficiency_metrics(trips: &[Trip], rates: &CostRates) -> EfficiencyMetrics {
    if trips.is_empty() {
        return EfficiencyMetrics::default();
    }

    let total_cost: i64 = trips.iter().map(|t| estimate_cost_with(t, rates).total).sum();
    let total_days = trips.iter().map(trip_days).sum::<u64>() as f64;
    let total_parks = trips.iter().map(Trip::stop_count).sum::<usize>() as f64;
    let total_miles: f64 = trips.iter().map(trip_distance).sum();

    let avg_cost_per_day = ratio(total_cost as f64, total_days);
    let avg_cost_per_park = ratio(total_cost as f64, total_parks);
    let avg_miles_per_day = ratio(total_miles, total_days);
    let avg_parks_per_day = ratio(total_parks * 100.0, total_days) as f64 / 100.0;

    let mut score: i64 = 50;
    if avg_cost_per_day < 200 {
        score += 10;
    } else if avg_cost_per_day > 400 {
        score -= 10;
    }
    if avg_parks_per_day > 0.3 {
        score += 15;
    } else if avg_parks_per_day < 0.2 {
        score -= 10;
    }
    if avg_miles_per_day < 200 {
        score += 10;
    } else if avg_miles_per_day > 500 {
        score -= 15;
    }

    let mut suggestions = Vec::new();
    if avg_cost_per_day > 350 {
        suggestions.push("Consider budget accommodations or camping to reduce daily costs");
    }
    if avg_parks_per_day < 0.25 {
        suggestions.push("Try visiting more parks per trip to maximize your time and budget");
    }
    if avg_miles_per_day > 400 {
        suggestions.push("Reduce daily driving distances by grouping nearby parks together");
    }
    if avg_cost_per_park > 500 {
        suggestions.push("Look for multi-park passes or consider shorter stays per park");
    }

    EfficiencyMetrics {
        avg_cost_per_day,
        avg_cost_per_park,
        avg_miles_per_day,
        avg_parks_per_day,
        efficiency_score: score.clamp(0, 100),
        suggestions: suggestions.into_iter().map(String::from).collect(),
    }
}
