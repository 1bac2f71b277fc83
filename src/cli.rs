//! CLI argument parsing for the eld-planner binary.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eld-planner", about = "HOS-compliant trip planner and ELD log generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan a trip and print the full plan as JSON
    Plan {
        /// Where the driver is now
        #[arg(long)]
        current: String,
        /// Pickup location
        #[arg(long)]
        pickup: String,
        /// Dropoff location
        #[arg(long)]
        dropoff: String,
        /// Hours already used in the 70-hour/8-day cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_hours: f64,
        /// Trip start time, RFC 3339 (defaults to now)
        #[arg(long, value_parser = parse_utc_datetime)]
        start: Option<DateTime<Utc>>,
        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Estimate a single segment (for inspecting the estimator backend)
    Segments {
        /// Origin location
        #[arg(long)]
        from: String,
        /// Destination location
        #[arg(long)]
        to: String,
    },
}

fn parse_utc_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 datetime '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;

    #[test]
    fn test_cli_plan_command_parses() {
        let cli = Cli::parse_from([
            "eld-planner",
            "plan",
            "--current",
            "Chicago, IL",
            "--pickup",
            "St. Louis, MO",
            "--dropoff",
            "Dallas, TX",
            "--cycle-hours",
            "12.5",
        ]);

        match cli.command {
            Some(Command::Plan {
                current,
                pickup,
                dropoff,
                cycle_hours,
                start,
                summary,
            }) => {
                assert_eq!(current, "Chicago, IL");
                assert_eq!(pickup, "St. Louis, MO");
                assert_eq!(dropoff, "Dallas, TX");
                assert_eq!(cycle_hours, 12.5);
                assert!(start.is_none());
                assert!(!summary);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_cli_plan_cycle_hours_defaults_to_zero() {
        let cli = Cli::parse_from([
            "eld-planner",
            "plan",
            "--current",
            "A",
            "--pickup",
            "B",
            "--dropoff",
            "C",
        ]);

        match cli.command {
            Some(Command::Plan { cycle_hours, .. }) => assert_eq!(cycle_hours, 0.0),
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_cli_plan_start_accepts_rfc3339() {
        let cli = Cli::parse_from([
            "eld-planner",
            "plan",
            "--current",
            "A",
            "--pickup",
            "B",
            "--dropoff",
            "C",
            "--start",
            "2024-03-04T06:00:00Z",
        ]);

        match cli.command {
            Some(Command::Plan { start, .. }) => {
                let expected = Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap();
                assert_eq!(start, Some(expected));
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_cli_plan_start_rejects_garbage() {
        let result = Cli::try_parse_from([
            "eld-planner",
            "plan",
            "--current",
            "A",
            "--pickup",
            "B",
            "--dropoff",
            "C",
            "--start",
            "yesterday",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_segments_command_parses() {
        let cli = Cli::parse_from([
            "eld-planner",
            "segments",
            "--from",
            "Chicago, IL",
            "--to",
            "Dallas, TX",
        ]);

        match cli.command {
            Some(Command::Segments { from, to }) => {
                assert_eq!(from, "Chicago, IL");
                assert_eq!(to, "Dallas, TX");
            }
            _ => panic!("expected segments command"),
        }
    }

    #[test]
    fn test_cli_no_command_defaults_to_none() {
        let cli = Cli::parse_from(["eld-planner"]);
        assert!(cli.command.is_none());
    }
}
