use chrono::NaiveDate;
use park_trip_planner::{
    duration_in_days, estimate_cost, format_for_display, generate_itinerary, CostBreakdown,
    ItineraryEntry, Stop, TransportationMode, Trip,
};

fn stop(id: &str, stay: f64) -> Stop {
    Stop::new(id, id.to_uppercase(), "Utah").with_stay(stay)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_duration_properties() {
    for d in ["2024-01-01", "2024-02-29", "2030-12-31"] {
        assert_eq!(duration_in_days(Some(d), Some(d)), 1);
    }
    assert_eq!(duration_in_days(None, None), 1);
    assert_eq!(duration_in_days(Some("2024-06-01"), Some("2024-06-03")), 3);
}

#[test]
fn test_empty_parks_cost_is_food_and_lodging_only() {
    for (start, end) in [("2024-06-01", "2024-06-01"), ("2024-06-01", "2024-06-05")] {
        let trip = Trip {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
            ..Trip::default()
        };
        let duration = i64::from(duration_in_days(Some(start), Some(end)));
        let cost = estimate_cost(&trip);

        assert_eq!(cost.transportation, 0);
        assert_eq!(cost.park_fees, 0);
        assert_eq!(cost.food, duration * 55);
        assert_eq!(cost.total, duration * 55 + (duration - 1) * 85);
    }
}

#[test]
fn test_flying_scenario_breakdown() {
    let trip = Trip {
        start_date: Some("2024-08-10".to_string()),
        end_date: Some("2024-08-12".to_string()),
        transportation_mode: Some(TransportationMode::Flying),
        parks: vec![stop("a", 2.0), stop("b", 1.0)],
        total_distance: Some(500.0),
        ..Trip::default()
    };

    assert_eq!(trip.total_duration(), 3);
    assert_eq!(
        estimate_cost(&trip),
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
fn test_itinerary_scenario() {
    let stops = vec![stop("a", 2.0), stop("b", 1.0)];
    let entries = generate_itinerary(&stops, Some("2024-07-01"), TransportationMode::Driving);

    let expected = [
        ("visit", Some("A"), date(2024, 7, 1)),
        ("visit", Some("A"), date(2024, 7, 2)),
        ("travel", None, date(2024, 7, 3)),
        ("visit", Some("B"), date(2024, 7, 4)),
    ];
    assert_eq!(entries.len(), expected.len());
    for (entry, (kind, park, day)) in entries.iter().zip(expected) {
        assert_eq!(entry.kind(), kind);
        assert_eq!(entry.date(), day);
        if let ItineraryEntry::Visit(visit) = entry {
            assert_eq!(Some(visit.park_name.as_str()), park);
        }
    }
    assert!(generate_itinerary(&[], Some("2024-07-01"), TransportationMode::Driving).is_empty());
}

#[test]
fn test_itinerary_length_formula() {
    let stops = vec![stop("a", 3.0), stop("b", 1.0), stop("c", 2.0), stop("d", 1.0)];
    let entries = generate_itinerary(&stops, Some("2024-07-01"), TransportationMode::Flying);
    let stays: usize = stops.iter().map(|s| s.stay_days() as usize).sum();
    assert_eq!(entries.len(), stays + stops.len() - 1);

    // one calendar day per entry, no gaps
    for pair in entries.windows(2) {
        assert_eq!(pair[0].date().succ_opt(), Some(pair[1].date()));
    }
}

#[test]
fn test_derivations_are_idempotent() {
    let mut trip = Trip::new("Repeat");
    trip.set_dates(Some("2024-09-01"), Some("2024-09-06"));
    trip.add_park(stop("a", 2.0).with_coordinates(37.3, -113.0));
    trip.add_park(stop("b", 2.0).with_coordinates(38.7, -109.6));
    trip.set_total_distance(240.0);

    let cost = trip.estimated_cost();
    let itinerary = trip.itinerary();
    for _ in 0..3 {
        assert_eq!(trip.itinerary(), itinerary);
        assert_eq!(trip.estimated_cost(), cost);
    }
    assert_eq!(
        serde_json::to_string(&trip.estimated_cost()).unwrap(),
        serde_json::to_string(&cost).unwrap()
    );
}

#[test]
fn test_concurrent_callers_agree() {
    let trip = Trip {
        start_date: Some("2024-07-01".to_string()),
        end_date: Some("2024-07-04".to_string()),
        parks: vec![stop("a", 2.0), stop("b", 1.0)],
        total_distance: Some(320.0),
        ..Trip::default()
    };
    let expected = (trip.estimated_cost(), trip.itinerary());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| (trip.estimated_cost(), trip.itinerary())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_display_labels_distinguish_missing_and_invalid() {
    let missing = format_for_display(None);
    let invalid = format_for_display(Some("31/31/2024"));
    let valid = format_for_display(Some("2024-07-04"));

    assert_ne!(missing, invalid);
    assert_ne!(valid, missing);
    assert_ne!(valid, invalid);
    assert_eq!(valid, "Thu, Jul 4");
}
