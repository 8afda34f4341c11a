//! Command-line driver for the clean-air route planner.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cleanroute_core::{haversine_distance_m, RoutePlan, TravelMode};
use cleanroute_engine::{Config, RoutePlanner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cleanroute", about = "Air-quality aware route planning", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fastest alternatives, ranked by travel time only
    Fast {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// car, bike, or walk (anything else falls back to car)
        #[arg(long, default_value = "car")]
        mode: String,
        /// Print the raw plan as JSON
        #[arg(long)]
        json: bool,
        /// Print turn-by-turn instructions for the recommended route
        #[arg(long)]
        steps: bool,
    },
    /// Full flow: alternatives enriched with air quality, combined ranking
    Navigate {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// car, bike, or walk (anything else falls back to car)
        #[arg(long, default_value = "car")]
        mode: String,
        /// Print the raw plan as JSON
        #[arg(long)]
        json: bool,
        /// Print turn-by-turn instructions for the recommended route
        #[arg(long)]
        steps: bool,
    },
    /// Resolve a place description to a coordinate
    Geocode { place: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cleanroute_engine=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let planner = RoutePlanner::new(&Config::from_env());

    match cli.command {
        Command::Fast {
            start,
            end,
            mode,
            json,
            steps,
        } => {
            let plan = planner
                .fast_routes(&start, &end, TravelMode::from_name(&mode))
                .await?;
            print_plan(&plan, json, steps)?;
        }
        Command::Navigate {
            start,
            end,
            mode,
            json,
            steps,
        } => {
            let plan = planner
                .full_route(&start, &end, TravelMode::from_name(&mode))
                .await?;
            print_plan(&plan, json, steps)?;
        }
        Command::Geocode { place } => {
            let coord = planner.resolver().resolve(&place).await?;
            println!("{} -> lat {:.5}, lon {:.5}", place, coord.lat, coord.lon);
        }
    }

    Ok(())
}

fn print_plan(plan: &RoutePlan, json: bool, steps: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    let crow_flies_km = haversine_distance_m(plan.start, plan.end) / 1000.0;
    println!(
        "from lat {:.5}, lon {:.5} to lat {:.5}, lon {:.5} ({crow_flies_km:.1} km crow-flies)",
        plan.start.lat, plan.start.lon, plan.end.lat, plan.end.lon
    );

    if plan.routes.is_empty() {
        println!("no route found");
        return Ok(());
    }

    for (i, route) in plan.routes.iter().enumerate() {
        let marker = if i == plan.recommended_index { "*" } else { " " };
        let quality = match route.avg_aqi {
            Some(avg) => format!("avg AQI {avg:.0} [{:?}]", route.aqi_band),
            None => "AQI n/a".to_string(),
        };
        println!(
            "{marker} {}. {:.1} km, {:.0} min, {quality}, {} steps",
            i + 1,
            route.distance_m / 1000.0,
            route.duration_s / 60.0,
            route.steps.len()
        );
    }

    if steps {
        let route = &plan.routes[plan.recommended_index];
        println!();
        for (i, step) in route.steps.iter().enumerate() {
            println!("  {:>3}. {} ({:.0} m)", i + 1, step.instruction, step.distance_m);
        }
    }

    Ok(())
}
