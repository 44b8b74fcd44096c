use chrono::Utc;
use clap::Parser;
use park_trip_planner::core::date_math::format_for_display;
use park_trip_planner::utils::error::ErrorSeverity;
use park_trip_planner::utils::format::{format_currency, format_date_range, format_duration};
use park_trip_planner::utils::{logger, validation::Validate};
use park_trip_planner::{CliConfig, ItineraryEntry, LocalStorage, PlanReport, TripPlanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let config = match cli.planner_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(&config.logging.format, cli.verbose);
    tracing::info!("Starting park-trip-planner");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let today = cli.today()?;
    let source = LocalStorage::new(".".to_string());
    let sink = LocalStorage::new(config.export.output_path.clone());
    let planner = TripPlanner::new(source, sink, config);

    match planner.run(&cli.trip, today, Utc::now(), !cli.dry_run).await {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.plan)?);
            } else {
                print_report(&report);
            }
            if cli.dry_run {
                println!("🔍 Dry run: no exports written");
            }
        }
        Err(e) => {
            tracing::error!(
                "Planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn print_report(report: &PlanReport) {
    let trip = &report.trip;
    let summary = &report.plan.summary;
    let cost = &summary.estimated_cost;

    let title = if trip.title.trim().is_empty() {
        "Untitled trip"
    } else {
        trip.title.as_str()
    };
    println!("🏞️  {}", title);
    println!(
        "  {} ({}, {} nights)",
        format_date_range(trip.start_date.as_deref(), trip.end_date.as_deref()),
        format_duration(summary.duration_days),
        summary.nights
    );
    println!(
        "  {} stops by {}, {} miles",
        summary.stop_count, summary.transportation_mode, summary.total_distance
    );
    println!();

    println!("💰 Budget:");
    println!("  Accommodation:  {}", format_currency(cost.accommodation));
    println!("  Transportation: {}", format_currency(cost.transportation));
    println!("  Park fees:      {}", format_currency(cost.park_fees));
    println!("  Food:           {}", format_currency(cost.food));
    println!("  Total:          {}", format_currency(cost.total));
    println!();

    println!("🗓️  Itinerary:");
    if report.plan.itinerary.is_empty() {
        println!("  Add a start date and at least one park to see the itinerary");
    }
    for entry in &report.plan.itinerary {
        let date = entry.date().format("%Y-%m-%d").to_string();
        let label = format_for_display(Some(&date));
        match entry {
            ItineraryEntry::Visit(visit) => println!(
                "  {}  {} ({}) day {}/{}",
                label, visit.park_name, visit.state, visit.stay_day, visit.total_stay_days
            ),
            ItineraryEntry::Travel(travel) => println!(
                "  {}  {} {} → {} (~{}h)",
                label,
                travel.transportation_mode,
                travel.from.name,
                travel.to.name,
                travel.estimated_hours
            ),
        }
    }

    if !report.plan.validation.is_valid() {
        println!();
        println!("⚠️  Before saving:");
        for (field, message) in &report.plan.validation.errors {
            println!("  {}: {}", field, message);
        }
    }

    for path in &report.written {
        println!("📁 Export saved to: {}", path);
    }
}
