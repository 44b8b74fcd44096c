use anyhow::Context;
use clap::Parser;
use park_trip_planner::core::analytics::{
    budget_distribution, duration_distribution, efficiency_metrics, monthly_trends,
    most_visited_states, park_visit_frequency, seasonal_preferences, transportation_breakdown,
    travel_stats,
};
use park_trip_planner::utils::format::format_currency;
use park_trip_planner::utils::logger;
use park_trip_planner::{PlannerConfig, Trip};
use serde_json::json;

#[derive(Parser)]
#[command(name = "trip-stats")]
#[command(about = "Aggregate statistics across saved trip documents")]
struct Args {
    /// Trip documents (JSON), or a JSON array of trips per file
    #[arg(required = true)]
    trips: Vec<String>,

    /// Path to a TOML configuration file for cost rates
    #[arg(short, long)]
    config: Option<String>,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_trips(path: &str) -> anyhow::Result<Vec<Trip>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?;

    let trips = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|trip: Trip| vec![trip])
    };
    trips.with_context(|| format!("{} is not a trip document", path))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = match &args.config {
        Some(path) => PlannerConfig::from_file(path).context("loading configuration")?,
        None => PlannerConfig::default(),
    };

    let mut trips = Vec::new();
    for path in &args.trips {
        let loaded = load_trips(path)?;
        tracing::debug!("Loaded {} trips from {}", loaded.len(), path);
        trips.extend(loaded);
    }
    tracing::info!("Analyzing {} trips", trips.len());

    let stats = travel_stats(&trips, &config.rates);
    let states = most_visited_states(&trips);
    let modes = transportation_breakdown(&trips, &config.rates);
    let parks = park_visit_frequency(&trips);
    let seasons = seasonal_preferences(&trips, &config.rates);
    let months = monthly_trends(&trips, &config.rates);
    let durations = duration_distribution(&trips, &config.rates);
    let budgets = budget_distribution(&trips, &config.rates);
    let efficiency = efficiency_metrics(&trips, &config.rates);

    if args.json {
        let report = json!({
            "travelStats": stats,
            "mostVisitedStates": states,
            "parkVisitFrequency": parks,
            "transportation": modes,
            "seasonalPreferences": seasons,
            "monthlyTrends": months,
            "durationDistribution": durations,
            "budgetDistribution": budgets,
            "efficiency": efficiency,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📊 Travel Stats:");
    println!("  Trips: {}", stats.total_trips);
    println!("  Parks: {}", stats.total_parks);
    println!("  Days: {}", stats.total_days);
    println!("  Distance: {} miles", stats.total_distance);
    println!("  Estimated spend: {}", format_currency(stats.total_cost));
    println!("  Avg trip: {} days, {}", stats.avg_trip_length, format_currency(stats.avg_trip_cost));
    println!("  Avg parks per trip: {}", stats.avg_parks_per_trip);
    println!();

    println!("🗺️  Most visited states:");
    for state in &states {
        println!(
            "  {:<20} {:>3} stops ({}%), {} trips",
            state.state, state.count, state.percentage, state.unique_trips
        );
    }
    println!();

    println!("🚗 Transportation:");
    for mode in &modes {
        println!(
            "  {:<8} {:>3} trips ({}%), avg {}",
            mode.mode.as_str(),
            mode.count,
            mode.percentage,
            format_currency(mode.avg_cost)
        );
    }
    println!();

    println!("🏞️  Most visited parks:");
    for park in &parks {
        println!(
            "  {:<28} {:>3} visits, ~{} days each, {} trips",
            park.name, park.visits, park.avg_days_per_visit, park.unique_trips
        );
    }
    println!();

    println!("🍂 Seasons:");
    for season in &seasons {
        println!(
            "  {:<8} {:>3} trips ({}%), avg {}",
            format!("{:?}", season.season),
            season.count,
            season.percentage,
            format_currency(season.avg_cost)
        );
    }
    println!();

    println!("📅 Busiest months:");
    for month in months.iter().filter(|m| m.count > 0) {
        println!(
            "  {}  {:>3} trips across {} years, avg {}",
            month.month,
            month.count,
            month.years,
            format_currency(month.avg_cost)
        );
    }
    println!();

    println!("⏱️  Trip length:");
    for bucket in &durations {
        println!("  {:<22} {:>3} trips ({}%)", bucket.category, bucket.count, bucket.percentage);
    }
    println!();

    println!("💵 Budget:");
    for bucket in &budgets {
        println!(
            "  {:<28} {:>3} trips ({}%), avg {} days",
            bucket.category, bucket.count, bucket.percentage, bucket.avg_duration
        );
    }
    println!();

    println!("⚡ Efficiency score: {}/100", efficiency.efficiency_score);
    println!(
        "  {} per day, {} per park, {} miles per day",
        format_currency(efficiency.avg_cost_per_day),
        format_currency(efficiency.avg_cost_per_park),
        efficiency.avg_miles_per_day
    );
    for suggestion in &efficiency.suggestions {
        println!("  💡 {}", suggestion);
    }

    Ok(())
}
