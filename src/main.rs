//! ELD Planner - HOS-compliant trip planning and log generation
//!
//! Computes trip plans with mandatory breaks, rests, and cycle
//! restarts, materializes the route waypoints, and generates one ELD
//! log sheet per trip day.

mod cli;
mod config;
mod error;
mod services;
mod types;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::PlanError;
use crate::services::estimator::create_estimator;
use crate::services::planner::plan_trip;
use crate::types::{TripPlan, TripRequest};

fn main() -> Result<()> {
    // Keep the appender guard alive so buffered log lines flush on exit
    let _guard = init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let result = match cli.command {
        Some(Command::Plan {
            current,
            pickup,
            dropoff,
            cycle_hours,
            start,
            summary,
        }) => run_plan(&config, current, pickup, dropoff, cycle_hours, start, summary),
        Some(Command::Segments { from, to }) => run_segments(&config, &from, &to),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = result {
        match e.downcast_ref::<PlanError>() {
            Some(plan_error) => error!("Planning failed [{}]: {:#}", plan_error.code(), e),
            None => error!("Planning failed: {:#}", e),
        }
        return Err(e);
    }

    Ok(())
}

/// Initialize logging - stderr always, plus a daily-rotated file when
/// LOGS_DIR is set
///
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing() -> Option<WorkerGuard> {
    let env_filter = || {
        tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,eld_planner=debug".into()),
        )
    };

    match std::env::var("LOGS_DIR") {
        Ok(logs_dir) if !logs_dir.is_empty() => {
            std::fs::create_dir_all(&logs_dir).ok();

            let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "planner.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    }
}

fn run_plan(
    config: &Config,
    current: String,
    pickup: String,
    dropoff: String,
    cycle_hours: f64,
    start: Option<DateTime<Utc>>,
    summary: bool,
) -> Result<()> {
    let estimator = create_estimator(config);
    info!("Planning trip with '{}' estimator", estimator.name());

    let request = TripRequest {
        current_location: current,
        pickup_location: pickup,
        dropoff_location: dropoff,
        current_cycle_hours: cycle_hours,
    };
    let start_time = start.unwrap_or_else(Utc::now);

    let plan = plan_trip(
        &request,
        estimator.as_ref(),
        start_time,
        &config.driver_name,
        &config.truck_number,
    )?;

    if summary {
        print_summary(&plan);
    } else {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }

    Ok(())
}

fn run_segments(config: &Config, from: &str, to: &str) -> Result<()> {
    let estimator = create_estimator(config);

    let segment = estimator.segment(from, to)?;
    let origin = estimator.geocode(from)?;
    let destination = estimator.geocode(to)?;

    println!("Estimator: {}", estimator.name());
    println!(
        "  {} ({:.4}, {:.4})",
        segment.from_location, origin.lat, origin.lng
    );
    println!(
        "  {} ({:.4}, {:.4})",
        segment.to_location, destination.lat, destination.lng
    );
    println!("  Distance: {:.1} miles", segment.distance_miles);
    println!(
        "  Driving:  {} minutes ({:.1} h)",
        segment.driving_minutes,
        segment.driving_hours()
    );

    Ok(())
}

fn print_summary(plan: &TripPlan) {
    println!("Trip {}", plan.id);
    println!(
        "  {} -> {} -> {}",
        plan.current_location, plan.pickup_location, plan.dropoff_location
    );
    println!("  Distance:     {:.1} miles", plan.total_distance_miles);
    println!("  Driving time: {:.1} h", plan.total_driving_hours);
    println!("  Trip time:    {:.1} h", plan.total_trip_hours);
    println!(
        "  Departs:      {}",
        plan.start_time.format("%b %d, %Y %-I:%M %p")
    );
    println!(
        "  Arrives:      {}",
        plan.end_time.format("%b %d, %Y %-I:%M %p")
    );
    println!("  Fuel stops:   {}", plan.fuel_stops);
    println!("  Rest stops:   {}", plan.rest_stops);

    println!();
    println!("Waypoints:");
    for waypoint in &plan.waypoints {
        println!(
            "  {:>2}. {:<8} {:<32} arrive {:>8}  depart {:>8}",
            waypoint.sequence + 1,
            waypoint.kind.as_str(),
            waypoint.location,
            waypoint.arrival_time.format("%-I:%M %p").to_string(),
            waypoint.departure_time.format("%-I:%M %p").to_string(),
        );
    }

    println!();
    println!("Log sheets: {} day(s)", plan.log_sheets.len());
    for sheet in &plan.log_sheets {
        println!(
            "  {}: driving {:.1} h, on-duty {:.1} h, off-duty {:.1} h, sleeper {:.1} h",
            sheet.date.format("%b %d, %Y"),
            sheet.total_driving_hours,
            sheet.total_on_duty_hours,
            sheet.total_off_duty_hours,
            sheet.total_sleeper_hours,
        );
    }
}
