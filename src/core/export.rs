use crate::core::cost_model::{estimate_cost_with, CostRates};
use crate::core::date_math::duration_in_days;
use crate::core::itinerary::generate_itinerary;
use crate::domain::model::{Coordinates, CostBreakdown, ItineraryEntry, TransportationMode, Trip};
use crate::utils::error::{PlannerError, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const EXPORT_VERSION: &str = "2.0";
pub const EXPORT_SOURCE: &str = "National Parks Explorer";
pub const BUNDLE_FILENAME: &str = "trip_export.zip";

pub const SUPPORTED_FORMATS: [&str; 3] = ["json", "csv", "tsv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(PlannerError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: other.to_string(),
                reason: format!("Supported formats: {}", SUPPORTED_FORMATS.join(", ")),
            }),
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => "trip.json",
            ExportFormat::Csv => "itinerary.csv",
            ExportFormat::Tsv => "itinerary.tsv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripExport {
    pub metadata: ExportMetadata,
    pub trip: TripHeader,
    pub itinerary: Vec<ItineraryEntry>,
    pub parks: Vec<ParkExport>,
    pub budget: BudgetExport,
    pub logistics: Logistics,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub exported_at: String,
    pub version: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripHeader {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub transportation_mode: TransportationMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkExport {
    pub name: String,
    pub state: String,
    pub stay_duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetExport {
    pub estimated_cost: i64,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    pub total_distance: f64,
    pub total_duration: u32,
    pub transportation_mode: TransportationMode,
}

pub fn build_trip_export(trip: &Trip, exported_at: DateTime<Utc>, rates: &CostRates) -> TripExport {
    let breakdown = estimate_cost_with(trip, rates);

    TripExport {
        metadata: ExportMetadata {
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: EXPORT_VERSION,
            source: EXPORT_SOURCE,
        },
        trip: TripHeader {
            title: trip.title.clone(),
            description: trip.description.clone(),
            start_date: trip.start_date.clone(),
            end_date: trip.end_date.clone(),
            transportation_mode: trip.mode(),
        },
        itinerary: generate_itinerary(&trip.parks, trip.start_date.as_deref(), trip.mode()),
        parks: trip
            .parks
            .iter()
            .map(|stop| ParkExport {
                name: stop.park_name.clone(),
                state: stop.state.clone(),
                stay_duration: stop.stay_days(),
                coordinates: stop.coordinates,
            })
            .collect(),
        budget: BudgetExport {
            estimated_cost: breakdown.total,
            breakdown,
        },
        logistics: Logistics {
            total_distance: trip.total_distance.unwrap_or(0.0),
            total_duration: duration_in_days(trip.start_date.as_deref(), trip.end_date.as_deref()),
            transportation_mode: trip.mode(),
        },
    }
}

pub fn export_trip_json(trip: &Trip, exported_at: DateTime<Utc>, rates: &CostRates) -> Result<String> {
    let export = build_trip_export(trip, exported_at, rates);
    Ok(serde_json::to_string_pretty(&export)?)
}

#[derive(Debug, Serialize)]
struct ItineraryRow<'a> {
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: &'static str,
    day_number: Option<u32>,
    park: &'a str,
    state: &'a str,
    details: String,
}

impl<'a> From<&'a ItineraryEntry> for ItineraryRow<'a> {
    fn from(entry: &'a ItineraryEntry) -> Self {
        match entry {
            ItineraryEntry::Visit(visit) => ItineraryRow {
                date: visit.date,
                kind: entry.kind(),
                day_number: Some(visit.day_number),
                park: &visit.park_name,
                state: &visit.state,
                details: format!("Day {} of {}", visit.stay_day, visit.total_stay_days),
            },
            ItineraryEntry::Travel(travel) => ItineraryRow {
                date: travel.date,
                kind: entry.kind(),
                day_number: None,
                park: &travel.to.name,
                state: &travel.to.state,
                details: format!(
                    "{} from {} (~{}h)",
                    travel.transportation_mode, travel.from.name, travel.estimated_hours
                ),
            },
        }
    }
}

/// Renders the itinerary as a delimited table with a header row.
pub fn itinerary_table(entries: &[ItineraryEntry], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for entry in entries {
        writer.serialize(ItineraryRow::from(entry))?;
    }
    if entries.is_empty() {
        writer.write_record(["date", "type", "day_number", "park", "state", "details"])?;
    }

    let bytes = writer.into_inner().map_err(|e| PlannerError::ExportError {
        message: format!("Failed to flush itinerary table: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| PlannerError::ExportError {
        message: format!("Itinerary table is not UTF-8: {}", e),
    })
}

pub fn render_exports(
    trip: &Trip,
    formats: &[ExportFormat],
    exported_at: DateTime<Utc>,
    rates: &CostRates,
) -> Result<Vec<ExportFile>> {
    let itinerary = generate_itinerary(&trip.parks, trip.start_date.as_deref(), trip.mode());
    let mut files = Vec::with_capacity(formats.len());

    for format in formats {
        let contents = match format {
            ExportFormat::Json => export_trip_json(trip, exported_at, rates)?,
            ExportFormat::Csv => itinerary_table(&itinerary, b',')?,
            ExportFormat::Tsv => itinerary_table(&itinerary, b'\t')?,
        };
        files.push(ExportFile {
            name: format.filename().to_string(),
            contents: contents.into_bytes(),
        });
    }

    Ok(files)
}

/// Packs rendered files into a single in-memory ZIP archive.
pub fn export_bundle(files: &[ExportFile]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for file in files {
        zip.start_file::<_, ()>(file.name.as_str(), FileOptions::default())?;
        zip.write_all(&file.contents)?;
    }

    let cursor = zip.finish()?;
    tracing::debug!("Bundled {} export files", files.len());
    Ok(cursor.into_inner())
}
