use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses the `"lat, lng"` text form some park documents carry.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat, lng) = text.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportationMode {
    #[default]
    Driving,
    Flying,
}

impl TransportationMode {
    /// Only `flying` selects air travel; every other label drives.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("flying") {
            TransportationMode::Flying
        } else {
            TransportationMode::Driving
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportationMode::Driving => "driving",
            TransportationMode::Flying => "flying",
        }
    }
}

impl fmt::Display for TransportationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransportationMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(lenient::mode(deserializer)?.unwrap_or_default())
    }
}

/// One park visit within a trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub park_id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub park_name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub state: String,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub stay_duration: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Coordinates>,
}

impl Stop {
    pub fn new(
        park_id: impl Into<String>,
        park_name: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            park_id: park_id.into(),
            park_name: park_name.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    pub fn with_stay(mut self, days: f64) -> Self {
        self.stay_duration = Some(days);
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    /// Number of calendar days spent at this stop.
    pub fn stay_days(&self) -> u32 {
        clamp_stay(self.stay_duration)
    }
}

/// `max(1, floor(value))`, with absent or non-finite values reading as 1.
pub fn clamp_stay(value: Option<f64>) -> u32 {
    match value {
        Some(days) if days.is_finite() && days >= 1.0 => days.floor() as u32,
        _ => 1,
    }
}

/// The trip snapshot a caller assembles step by step.
///
/// Derived values (duration, cost, itinerary) are never stored here; see the
/// inherent methods added in `core::aggregate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub transportation_mode: Option<TransportationMode>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub parks: Vec<Stop>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_distance: Option<f64>,
}

impl Trip {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> TransportationMode {
        self.transportation_mode.unwrap_or_default()
    }

    pub fn stop_count(&self) -> usize {
        self.parks.len()
    }

    /// Appends a stop unless one with the same `park_id` is already present.
    pub fn add_park(&mut self, stop: Stop) -> bool {
        if self.parks.iter().any(|p| p.park_id == stop.park_id) {
            return false;
        }
        self.parks.push(stop);
        true
    }

    pub fn remove_park(&mut self, park_id: &str) -> Option<Stop> {
        let index = self.parks.iter().position(|p| p.park_id == park_id)?;
        Some(self.parks.remove(index))
    }

    /// Moves the stop at `from` so it ends up at position `to`. Out-of-range
    /// positions leave the order untouched.
    pub fn move_park(&mut self, from: usize, to: usize) -> bool {
        if from >= self.parks.len() || to >= self.parks.len() {
            return false;
        }
        let stop = self.parks.remove(from);
        self.parks.insert(to, stop);
        true
    }

    pub fn set_dates(&mut self, start: Option<&str>, end: Option<&str>) {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
    }

    pub fn set_transportation_mode(&mut self, mode: TransportationMode) {
        self.transportation_mode = Some(mode);
    }

    pub fn set_total_distance(&mut self, miles: f64) {
        self.total_distance = Some(miles);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub state: String,
}

impl From<&Stop> for Place {
    fn from(stop: &Stop) -> Self {
        Self {
            name: stop.park_name.clone(),
            state: stop.state.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDay {
    pub date: NaiveDate,
    /// Running count of visit days across the whole trip, starting at 1.
    pub day_number: u32,
    pub stop_index: usize,
    pub park_id: String,
    pub park_name: String,
    pub state: String,
    pub stay_day: u32,
    pub total_stay_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub suggested_activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelDay {
    pub date: NaiveDate,
    pub transportation_mode: TransportationMode,
    pub from: Place,
    pub to: Place,
    pub estimated_hours: u32,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// One calendar day of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItineraryEntry {
    Visit(VisitDay),
    Travel(TravelDay),
}

impl ItineraryEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            ItineraryEntry::Visit(visit) => visit.date,
            ItineraryEntry::Travel(travel) => travel.date,
        }
    }

    pub fn is_visit(&self) -> bool {
        matches!(self, ItineraryEntry::Visit(_))
    }

    pub fn is_travel(&self) -> bool {
        matches!(self, ItineraryEntry::Travel(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ItineraryEntry::Visit(_) => "visit",
            ItineraryEntry::Travel(_) => "travel",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub accommodation: i64,
    pub transportation: i64,
    pub park_fees: i64,
    pub food: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub duration_days: u32,
    pub nights: u32,
    pub stop_count: usize,
    pub total_distance: f64,
    pub transportation_mode: TransportationMode,
    pub estimated_cost: CostBreakdown,
    pub itinerary_days: usize,
}

/// Deserializers that substitute `None` for values the wizard may leave
/// half-entered instead of failing the whole document.
pub(crate) mod lenient {
    use super::{Coordinates, TransportationMode};
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberLike {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CoordinatesLike {
        Pair(Coordinates),
        Text(String),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LabelLike {
        Text(String),
        Other(IgnoredAny),
    }

    /// Explicit `null` reads the same as an absent field.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<NumberLike>::deserialize(deserializer)?;
        Ok(match value {
            Some(NumberLike::Number(n)) if n.is_finite() => Some(n),
            Some(NumberLike::Text(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        })
    }

    pub fn coordinates<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Coordinates>, D::Error> {
        let value = Option::<CoordinatesLike>::deserialize(deserializer)?;
        Ok(match value {
            Some(CoordinatesLike::Pair(c)) if c.lat.is_finite() && c.lng.is_finite() => Some(c),
            Some(CoordinatesLike::Text(text)) => Coordinates::parse(&text),
            _ => None,
        })
    }

    pub fn mode<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TransportationMode>, D::Error> {
        Ok(match Option::<LabelLike>::deserialize(deserializer)? {
            Some(LabelLike::Text(label)) if !label.trim().is_empty() => {
                Some(TransportationMode::from_label(&label))
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_stay() {
        assert_eq!(clamp_stay(None), 1);
        assert_eq!(clamp_stay(Some(0.0)), 1);
        assert_eq!(clamp_stay(Some(-3.0)), 1);
        assert_eq!(clamp_stay(Some(2.9)), 2);
        assert_eq!(clamp_stay(Some(f64::NAN)), 1);
        assert_eq!(clamp_stay(Some(400.0)), 400);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let trip: Trip = serde_json::from_str(r#"{"title": null, "parks": null}"#).unwrap();
        assert_eq!(trip.title, "");
        assert!(trip.parks.is_empty());

        let trip: Trip = serde_json::from_str(
            r#"{"transportationMode": 1, "parks": [{"parkId": null, "parkName": null, "state": null}]}"#,
        )
        .unwrap();
        assert_eq!(trip.transportation_mode, None);
        assert_eq!(trip.parks.len(), 1);
        assert_eq!(trip.parks[0], Stop::default());

        let trip: Trip = serde_json::from_str(r#"{"transportationMode": {"kind": "flying"}}"#).unwrap();
        assert_eq!(trip.mode(), TransportationMode::Driving);
    }

    #[test]
    fn test_trip_document_deserializes_leniently() {
        let json = r#"{
            "id": "abc",
            "title": "Utah loop",
            "startDate": "2024-07-01",
            "endDate": "",
            "transportationMode": "",
            "parks": [
                {"parkId": "zion", "parkName": "Zion", "state": "Utah", "stayDuration": "3", "coordinates": "37.3, -113.0"},
                {"parkId": "arch", "parkName": "Arches", "state": "Utah", "stayDuration": "lots"}
            ],
            "totalDistance": null,
            "preferences": {"budget": "moderate"}
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.transportation_mode, None);
        assert_eq!(trip.mode(), TransportationMode::Driving);
        assert_eq!(trip.parks[0].stay_duration, Some(3.0));
        assert_eq!(trip.parks[0].coordinates, Some(Coordinates::new(37.3, -113.0)));
        assert_eq!(trip.parks[1].stay_duration, None);
        assert_eq!(trip.parks[1].stay_days(), 1);
        assert_eq!(trip.total_distance, None);
    }

    #[test]
    fn test_unknown_mode_reads_as_driving() {
        assert_eq!(TransportationMode::from_label("Flying"), TransportationMode::Flying);
        assert_eq!(TransportationMode::from_label("train"), TransportationMode::Driving);
    }

    #[test]
    fn test_wizard_mutations_keep_order() {
        let mut trip = Trip::new("Test");
        assert!(trip.add_park(Stop::new("a", "A", "Utah")));
        assert!(trip.add_park(Stop::new("b", "B", "Utah")));
        assert!(trip.add_park(Stop::new("c", "C", "Utah")));
        assert!(!trip.add_park(Stop::new("a", "A again", "Utah")));

        assert!(trip.move_park(2, 0));
        let ids: Vec<&str> = trip.parks.iter().map(|p| p.park_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        assert!(!trip.move_park(5, 0));
        assert_eq!(trip.remove_park("a").map(|s| s.park_name), Some("A".to_string()));
        assert!(trip.remove_park("missing").is_none());
        assert_eq!(trip.stop_count(), 2);
    }

    #[test]
    fn test_itinerary_entry_serializes_with_type_tag() {
        let entry = ItineraryEntry::Travel(TravelDay {
            date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
            transportation_mode: TransportationMode::Driving,
            from: Place { name: "A".into(), state: "Utah".into() },
            to: Place { name: "B".into(), state: "Utah".into() },
            estimated_hours: 4,
            suggestions: vec![],
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "travel");
        assert_eq!(value["date"], "2024-07-03");
        assert_eq!(value["transportationMode"], "driving");
    }
}
