use crate::core::export::{export_bundle, render_exports, ExportFormat, BUNDLE_FILENAME};
use crate::core::geo::route_distance;
use crate::core::route::optimize_route;
use crate::core::trip_checks::{validate_trip, TripValidation};
use crate::core::{PlannerSettings, Storage};
use crate::domain::model::{ItineraryEntry, Trip, TripSummary};
use crate::utils::error::{PlannerError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Everything derived from one trip snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub summary: TripSummary,
    pub itinerary: Vec<ItineraryEntry>,
    pub validation: TripValidation,
}

#[derive(Debug, Clone)]
pub struct PlanReport {
    pub trip: Trip,
    pub plan: TripPlan,
    pub written: Vec<String>,
}

/// Loads a trip document, derives its plan and writes the configured exports.
pub struct TripPlanner<S: Storage, C: PlannerSettings> {
    source: S,
    sink: S,
    settings: C,
}

impl<S: Storage, C: PlannerSettings> TripPlanner<S, C> {
    pub fn new(source: S, sink: S, settings: C) -> Self {
        Self {
            source,
            sink,
            settings,
        }
    }

    pub async fn load_trip(&self, path: &str) -> Result<Trip> {
        let bytes = self
            .source
            .read_file(path)
            .await
            .map_err(|e| PlannerError::TripFileError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| PlannerError::TripFileError {
            path: path.to_string(),
            message: format!("invalid trip document: {}", e),
        })
    }

    /// Applies route optimization and fills in a missing `totalDistance`
    /// from stop coordinates. A supplied distance is never overwritten.
    pub fn prepare(&self, mut trip: Trip) -> Trip {
        if self.settings.optimize_route() && trip.parks.len() > 2 {
            trip.parks = optimize_route(&trip.parks);
            tracing::info!("Reordered {} stops for a shorter route", trip.parks.len());
        }

        if trip.total_distance.is_none() {
            let miles = route_distance(&trip.parks);
            if miles > 0.0 {
                tracing::debug!("Derived total distance of {} miles from coordinates", miles);
                trip.total_distance = Some(miles);
            }
        }

        trip
    }

    pub fn plan(&self, trip: &Trip, today: NaiveDate) -> TripPlan {
        let rates = self.settings.cost_rates();
        TripPlan {
            summary: trip.summary_with(&rates),
            itinerary: trip.itinerary(),
            validation: validate_trip(trip, today, &self.settings.trip_limits()),
        }
    }

    /// Writes the configured formats to the sink and returns the written names.
    pub async fn export(&self, trip: &Trip, exported_at: DateTime<Utc>) -> Result<Vec<String>> {
        let formats = self
            .settings
            .export_formats()
            .iter()
            .map(|name| ExportFormat::parse(name))
            .collect::<Result<Vec<_>>>()?;

        if formats.is_empty() {
            tracing::warn!("No export formats configured, skipping export");
            return Ok(Vec::new());
        }

        let files = render_exports(trip, &formats, exported_at, &self.settings.cost_rates())?;

        if self.settings.zip_exports() {
            let bundle = export_bundle(&files)?;
            tracing::debug!("Writing ZIP bundle ({} bytes) to storage", bundle.len());
            self.sink.write_file(BUNDLE_FILENAME, &bundle).await?;
            return Ok(vec![format!("{}/{}", self.settings.output_path(), BUNDLE_FILENAME)]);
        }

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            self.sink.write_file(&file.name, &file.contents).await?;
            written.push(format!("{}/{}", self.settings.output_path(), file.name));
        }
        Ok(written)
    }

    pub async fn run(
        &self,
        trip_path: &str,
        today: NaiveDate,
        exported_at: DateTime<Utc>,
        write_exports: bool,
    ) -> Result<PlanReport> {
        tracing::info!("Loading trip from {}", trip_path);
        let trip = self.prepare(self.load_trip(trip_path).await?);
        tracing::info!("Loaded trip '{}' with {} stops", trip.title, trip.stop_count());

        let plan = self.plan(&trip, today);
        tracing::info!(
            "Planned {} itinerary days, estimated total ${}",
            plan.itinerary.len(),
            plan.summary.estimated_cost.total
        );
        for (field, message) in &plan.validation.errors {
            tracing::warn!("{}: {}", field, message);
        }

        let written = if write_exports {
            self.export(&trip, exported_at).await?
        } else {
            Vec::new()
        };
        for path in &written {
            tracing::info!("Export saved to: {}", path);
        }

        Ok(PlanReport {
            trip,
            plan,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cost_model::CostRates;
    use crate::core::trip_checks::TripLimits;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MemoryStorage {
        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get(path).await.ok_or_else(|| {
                PlannerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.put(path, data).await;
            Ok(())
        }
    }

    struct TestSettings {
        formats: Vec<String>,
        zip: bool,
        optimize: bool,
    }

    impl PlannerSettings for TestSettings {
        fn cost_rates(&self) -> CostRates {
            CostRates::default()
        }
        fn trip_limits(&self) -> TripLimits {
            TripLimits::default()
        }
        fn output_path(&self) -> &str {
            "out"
        }
        fn export_formats(&self) -> &[String] {
            &self.formats
        }
        fn zip_exports(&self) -> bool {
            self.zip
        }
        fn optimize_route(&self) -> bool {
            self.optimize
        }
    }

    fn settings(formats: &[&str], zip: bool, optimize: bool) -> TestSettings {
        TestSettings {
            formats: formats.iter().map(|f| f.to_string()).collect(),
            zip,
            optimize,
        }
    }

    const TRIP_JSON: &str = r#"{
        "title": "Southwest",
        "startDate": "2024-07-01",
        "endDate": "2024-07-06",
        "transportationMode": "driving",
        "parks": [
            {"parkId": "a", "parkName": "A", "state": "Utah", "stayDuration": 2, "coordinates": {"lat": 30.0, "lng": -100.0}},
            {"parkId": "c", "parkName": "C", "state": "Utah", "stayDuration": 1, "coordinates": {"lat": 32.0, "lng": -100.0}},
            {"parkId": "b", "parkName": "B", "state": "Utah", "stayDuration": 1, "coordinates": {"lat": 31.0, "lng": -100.0}}
        ]
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_separate_files() {
        let source = MemoryStorage::default();
        source.put("trip.json", TRIP_JSON.as_bytes()).await;
        let sink = MemoryStorage::default();
        let planner = TripPlanner::new(source, sink.clone(), settings(&["json", "csv"], false, false));

        let report = planner.run("trip.json", today(), Utc::now(), true).await.unwrap();

        assert_eq!(report.written, vec!["out/trip.json", "out/itinerary.csv"]);
        assert!(sink.get("trip.json").await.is_some());
        assert!(sink.get("itinerary.csv").await.is_some());
        assert_eq!(report.plan.itinerary.len(), 6);
        assert!(report.plan.validation.is_valid(), "{:?}", report.plan.validation.errors);
        // distance was derived from coordinates
        assert!(report.trip.total_distance.is_some_and(|d| d > 0.0));
    }

    #[tokio::test]
    async fn test_run_bundles_when_zip_enabled() {
        let source = MemoryStorage::default();
        source.put("trip.json", TRIP_JSON.as_bytes()).await;
        let sink = MemoryStorage::default();
        let planner = TripPlanner::new(source, sink.clone(), settings(&["json", "tsv"], true, false));

        let report = planner.run("trip.json", today(), Utc::now(), true).await.unwrap();

        assert_eq!(report.written, vec![format!("out/{}", BUNDLE_FILENAME)]);
        let bundle = sink.get(BUNDLE_FILENAME).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bundle)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[tokio::test]
    async fn test_optimization_reorders_stops() {
        let source = MemoryStorage::default();
        source.put("trip.json", TRIP_JSON.as_bytes()).await;
        let planner = TripPlanner::new(source, MemoryStorage::default(), settings(&[], false, true));

        let report = planner.run("trip.json", today(), Utc::now(), false).await.unwrap();
        let ids: Vec<&str> = report.trip.parks.iter().map(|p| p.park_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(report.written.is_empty());
    }

    #[tokio::test]
    async fn test_missing_trip_file() {
        let planner = TripPlanner::new(
            MemoryStorage::default(),
            MemoryStorage::default(),
            settings(&["json"], false, false),
        );
        let err = planner.load_trip("nope.json").await.unwrap_err();
        assert!(matches!(err, PlannerError::TripFileError { .. }));
    }

    #[tokio::test]
    async fn test_supplied_distance_is_kept() {
        let planner = TripPlanner::new(
            MemoryStorage::default(),
            MemoryStorage::default(),
            settings(&[], false, false),
        );
        let mut trip: Trip = serde_json::from_str(TRIP_JSON).unwrap();
        trip.total_distance = Some(1234.0);
        let prepared = planner.prepare(trip);
        assert_eq!(prepared.total_distance, Some(1234.0));
    }
}
