//! Building a ready-made trip from a curated template and the park catalog.

use crate::domain::model::{Coordinates, Stop, TransportationMode, Trip};
use chrono::{Days, NaiveDate};
use serde::Deserialize;

/// Days between "today" and the start of a trip created from a template.
pub const TEMPLATE_LEAD_DAYS: u64 = 30;
/// Stay used when a template park does not name one.
pub const DEFAULT_TEMPLATE_STAY: f64 = 2.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripTemplate {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Nights between the start and end date.
    pub duration: u32,
    #[serde(default)]
    pub transportation: Option<TemplateTransportation>,
    #[serde(default, deserialize_with = "crate::domain::model::lenient::or_default")]
    pub parks: Vec<TemplatePark>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateTransportation {
    #[serde(default, deserialize_with = "crate::domain::model::lenient::mode")]
    pub mode: Option<TransportationMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplatePark {
    pub name: String,
    #[serde(default, deserialize_with = "crate::domain::model::lenient::or_default")]
    pub state: String,
    #[serde(default, deserialize_with = "crate::domain::model::lenient::number")]
    pub days: Option<f64>,
}

/// A park as listed in the catalog the templates are matched against.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPark {
    #[serde(alias = "parkId")]
    pub id: String,
    #[serde(alias = "fullName")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::domain::model::lenient::or_default")]
    pub state: String,
    #[serde(default, deserialize_with = "crate::domain::model::lenient::coordinates")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub description: Option<String>,
}

fn first_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or_default()
}

/// Finds the catalog park a template entry refers to.
///
/// Tried in order: case-insensitive exact name, then either name containing
/// the other's first word, then any "national" park in the same state.
pub fn find_best_park_match<'a>(
    template_park: &TemplatePark,
    catalog: &'a [CatalogPark],
) -> Option<&'a CatalogPark> {
    let wanted = template_park.name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    let named = move || {
        catalog
            .iter()
            .filter(|park| !park.name.trim().is_empty())
            .map(|park| (park, park.name.trim().to_lowercase()))
    };

    if let Some((park, _)) = named().find(|(_, name)| *name == wanted) {
        return Some(park);
    }

    if let Some((park, _)) = named()
        .find(|(_, name)| name.contains(first_word(&wanted)) || wanted.contains(first_word(name)))
    {
        return Some(park);
    }

    named()
        .find(|(park, name)| park.state == template_park.state && name.contains("national"))
        .map(|(park, _)| park)
}

/// Creates a trip starting `TEMPLATE_LEAD_DAYS` after `today` and ending
/// `template.duration` days later.
///
/// Template parks without a catalog match are dropped, as are repeat
/// matches of a park already on the trip.
pub fn create_trip_from_template(
    template: &TripTemplate,
    catalog: &[CatalogPark],
    today: NaiveDate,
) -> Trip {
    let start = today
        .checked_add_days(Days::new(TEMPLATE_LEAD_DAYS))
        .unwrap_or(today);
    let end = start
        .checked_add_days(Days::new(u64::from(template.duration)))
        .unwrap_or(start);

    let mut trip = Trip {
        id: None,
        title: template.title.clone(),
        description: template.description.clone(),
        ..Trip::default()
    };
    let start = start.format("%Y-%m-%d").to_string();
    let end = end.format("%Y-%m-%d").to_string();
    trip.set_dates(Some(&start), Some(&end));
    trip.set_transportation_mode(
        template
            .transportation
            .as_ref()
            .and_then(|t| t.mode)
            .unwrap_or_default(),
    );

    for template_park in &template.parks {
        let Some(park) = find_best_park_match(template_park, catalog) else {
            tracing::debug!("No catalog park matches template park '{}'", template_park.name);
            continue;
        };

        let state = if template_park.state.trim().is_empty() {
            park.state.clone()
        } else {
            template_park.state.clone()
        };
        let mut stop = Stop::new(park.id.clone(), park.name.clone(), state)
            .with_stay(template_park.days.unwrap_or(DEFAULT_TEMPLATE_STAY));
        stop.coordinates = park.coordinates;

        if !trip.add_park(stop) {
            tracing::debug!("Template park '{}' matched '{}' twice", template_park.name, park.id);
        }
    }

    tracing::info!(
        "Created trip '{}' from template with {} of {} parks",
        trip.title,
        trip.stop_count(),
        template.parks.len()
    );
    trip
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park(id: &str, name: &str, state: &str) -> CatalogPark {
        CatalogPark {
            id: id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            ..CatalogPark::default()
        }
    }

    fn catalog() -> Vec<CatalogPark> {
        vec![
            park("zion-overlook", "Zion Canyon Overlook", "Utah"),
            CatalogPark {
                coordinates: Some(Coordinates::new(37.2982, -113.0263)),
                ..park("zion", "Zion National Park", "Utah")
            },
            park("yose", "Yosemite National Park", "California"),
            park("blca", "Black Canyon of the Gunnison National Park", "Colorado"),
        ]
    }

    fn wanted(name: &str, state: &str) -> TemplatePark {
        TemplatePark {
            name: name.to_string(),
            state: state.to_string(),
            days: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_exact_name_wins_over_first_word() {
        let catalog = catalog();
        let found = find_best_park_match(&wanted("zion national park", "Utah"), &catalog);
        assert_eq!(found.map(|p| p.id.as_str()), Some("zion"));
    }

    #[test]
    fn test_first_word_match() {
        let catalog = catalog();
        let found = find_best_park_match(&wanted("Yosemite", "California"), &catalog);
        assert_eq!(found.map(|p| p.id.as_str()), Some("yose"));
    }

    #[test]
    fn test_state_fallback_requires_national_park() {
        let catalog = catalog();
        let found = find_best_park_match(&wanted("Mighty Gorge", "Colorado"), &catalog);
        assert_eq!(found.map(|p| p.id.as_str()), Some("blca"));

        assert!(find_best_park_match(&wanted("Acadia", "Maine"), &catalog).is_none());
        assert!(find_best_park_match(&wanted("  ", "Utah"), &catalog).is_none());
    }

    #[test]
    fn test_create_trip_from_template() {
        let template = TripTemplate {
            id: Some("southwest".to_string()),
            title: "Southwest Sampler".to_string(),
            description: Some("Canyons and granite".to_string()),
            duration: 7,
            transportation: Some(TemplateTransportation {
                mode: Some(TransportationMode::Flying),
            }),
            parks: vec![
                TemplatePark {
                    days: Some(3.0),
                    ..wanted("Zion National Park", "")
                },
                wanted("Acadia", "Maine"),
                wanted("Yosemite", "California"),
            ],
        };

        let trip = create_trip_from_template(&template, &catalog(), today());

        assert_eq!(trip.title, "Southwest Sampler");
        assert_eq!(trip.start_date.as_deref(), Some("2024-06-09"));
        assert_eq!(trip.end_date.as_deref(), Some("2024-06-16"));
        assert_eq!(trip.mode(), TransportationMode::Flying);

        let ids: Vec<&str> = trip.parks.iter().map(|p| p.park_id.as_str()).collect();
        assert_eq!(ids, vec!["zion", "yose"]);
        assert_eq!(trip.parks[0].state, "Utah");
        assert_eq!(trip.parks[0].stay_days(), 3);
        assert!(trip.parks[0].coordinates.is_some());
        assert_eq!(trip.parks[1].stay_days(), 2);
    }

    #[test]
    fn test_template_document_shape() {
        let json = r#"{
            "id": "utah",
            "title": "Utah Big Five",
            "duration": 4,
            "parks": [{"name": "Zion", "state": "Utah", "days": "2"}]
        }"#;
        let template: TripTemplate = serde_json::from_str(json).unwrap();
        let catalog: Vec<CatalogPark> = serde_json::from_str(
            r#"[{"parkId": "zion", "fullName": "Zion National Park", "state": "Utah", "coordinates": "37.3, -113.0"}]"#,
        )
        .unwrap();

        let trip = create_trip_from_template(&template, &catalog, today());
        assert_eq!(trip.mode(), TransportationMode::Driving);
        assert_eq!(trip.end_date.as_deref(), Some("2024-06-13"));
        assert_eq!(trip.parks.len(), 1);
        assert_eq!(trip.parks[0].coordinates, Some(Coordinates::new(37.3, -113.0)));
    }
}
