//! Daily ELD log sheet synthesis
//!
//! Compiles a planned trip into one log sheet per calendar day. Each
//! day follows a fixed duty template (first day, middle days, last
//! day) whose entries tile 00:00 to 24:00 exactly. Times are integer
//! minutes within the day, rendered "HH:MM" with a literal "24:00"
//! closing the final entry.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::types::{DutyStatus, LogEntry, LogSheet, Waypoint, WaypointKind};

const MINUTES_PER_DAY: i64 = 1440;

/// One duty period within a day, in minutes since midnight
struct Span {
    start: i64,
    end: i64,
    status: DutyStatus,
    location: String,
    remarks: &'static str,
}

impl Span {
    fn new(
        start: i64,
        end: i64,
        status: DutyStatus,
        location: impl Into<String>,
        remarks: &'static str,
    ) -> Self {
        Self {
            start,
            end,
            status,
            location: location.into(),
            remarks,
        }
    }
}

/// Generate one log sheet per day of the trip
///
/// `day_count = ceil(total_trip_minutes / 1440)`; a trip with no
/// elapsed time produces no sheets. The template for each day is
/// picked by its index: day 0 runs the departure template (which also
/// covers single-day trips), the final day runs the arrival template,
/// and every day between runs the line-haul template.
pub fn generate_log_sheets(
    total_trip_minutes: i64,
    waypoints: &[Waypoint],
    start_time: DateTime<Utc>,
    driver_name: &str,
    truck_number: &str,
) -> Vec<LogSheet> {
    if total_trip_minutes <= 0 {
        return Vec::new();
    }

    let day_count = (total_trip_minutes + MINUTES_PER_DAY - 1) / MINUTES_PER_DAY;

    let start_location = waypoints
        .first()
        .map(|w| w.location.as_str())
        .unwrap_or("Origin");
    let pickup_location = waypoints
        .iter()
        .find(|w| w.kind == WaypointKind::Pickup)
        .map(|w| w.location.as_str())
        .unwrap_or("destination");
    let dropoff_location = waypoints
        .iter()
        .find(|w| w.kind == WaypointKind::Dropoff)
        .map(|w| w.location.as_str())
        .unwrap_or("destination");

    (0..day_count)
        .map(|day| {
            let spans = if day == 0 {
                first_day_spans(start_location, pickup_location)
            } else if day == day_count - 1 {
                last_day_spans(dropoff_location)
            } else {
                middle_day_spans()
            };

            let date = (start_time + Duration::days(day)).date_naive();
            build_sheet(date, driver_name, truck_number, spans)
        })
        .collect()
}

/// Departure day: pre-trip at the origin, drive toward the pickup with
/// the 30-minute break between stints, sleeper for the night
fn first_day_spans(start_location: &str, pickup_location: &str) -> Vec<Span> {
    let en_route = format!("En route to {}", pickup_location);
    vec![
        Span::new(0, 30, DutyStatus::OnDuty, start_location, "Pre-trip inspection"),
        Span::new(30, 270, DutyStatus::Driving, en_route.clone(), "Driving"),
        Span::new(
            270,
            300,
            DutyStatus::OffDuty,
            "Rest area",
            "Required 30-minute break",
        ),
        Span::new(300, 660, DutyStatus::Driving, en_route, "Driving"),
        Span::new(660, 1440, DutyStatus::Sleeper, "Truck stop", "Rest period"),
    ]
}

/// Arrival day: short sleeper carry-over, final drive, delivery and
/// post-trip at the dropoff, off duty for the rest of the day
fn last_day_spans(dropoff_location: &str) -> Vec<Span> {
    let en_route = format!("En route to {}", dropoff_location);
    vec![
        Span::new(0, 120, DutyStatus::Sleeper, "Truck stop", "Rest period"),
        Span::new(120, 150, DutyStatus::OnDuty, "Truck stop", "Pre-trip inspection"),
        Span::new(150, 450, DutyStatus::Driving, en_route, "Driving"),
        Span::new(
            450,
            510,
            DutyStatus::OnDuty,
            dropoff_location,
            "Unloading/delivery",
        ),
        Span::new(
            510,
            540,
            DutyStatus::OnDuty,
            dropoff_location,
            "Post-trip inspection",
        ),
        Span::new(540, 1440, DutyStatus::OffDuty, dropoff_location, "Off duty"),
    ]
}

/// Line-haul day: full sleeper night, two five-hour driving stints
/// split by fueling and the 30-minute break
fn middle_day_spans() -> Vec<Span> {
    vec![
        Span::new(0, 360, DutyStatus::Sleeper, "Truck stop", "Rest period"),
        Span::new(360, 390, DutyStatus::OnDuty, "Truck stop", "Pre-trip inspection"),
        Span::new(390, 690, DutyStatus::Driving, "En route", "Driving"),
        Span::new(690, 720, DutyStatus::OnDuty, "Fuel station", "Fueling"),
        Span::new(
            720,
            750,
            DutyStatus::OffDuty,
            "Fuel station",
            "Required 30-minute break",
        ),
        Span::new(750, 1050, DutyStatus::Driving, "En route", "Driving"),
        Span::new(1050, 1440, DutyStatus::Sleeper, "Truck stop", "Rest period"),
    ]
}

fn build_sheet(
    date: NaiveDate,
    driver_name: &str,
    truck_number: &str,
    spans: Vec<Span>,
) -> LogSheet {
    let mut driving_minutes = 0i64;
    let mut on_duty_minutes = 0i64;
    let mut off_duty_minutes = 0i64;
    let mut sleeper_minutes = 0i64;

    for span in &spans {
        let minutes = span.end - span.start;
        match span.status {
            DutyStatus::Driving => driving_minutes += minutes,
            DutyStatus::OnDuty => on_duty_minutes += minutes,
            DutyStatus::OffDuty => off_duty_minutes += minutes,
            DutyStatus::Sleeper => sleeper_minutes += minutes,
        }
    }

    let entries: Vec<LogEntry> = spans
        .into_iter()
        .map(|span| LogEntry {
            start_time: format_day_minutes(span.start),
            end_time: format_day_minutes(span.end),
            status: span.status,
            location: span.location,
            remarks: span.remarks.to_string(),
        })
        .collect();

    let start_location = entries
        .first()
        .map(|e| e.location.clone())
        .unwrap_or_default();
    let end_location = entries
        .last()
        .map(|e| e.location.clone())
        .unwrap_or_default();

    LogSheet {
        date,
        driver_name: driver_name.to_string(),
        truck_number: truck_number.to_string(),
        start_location,
        end_location,
        entries,
        total_driving_hours: round_tenths(driving_minutes),
        total_on_duty_hours: round_tenths(on_duty_minutes),
        total_off_duty_hours: round_tenths(off_duty_minutes),
        total_sleeper_hours: round_tenths(sleeper_minutes),
    }
}

/// Render minutes-since-midnight as "HH:MM", with midnight at the end
/// of the day as the literal "24:00"
fn format_day_minutes(minutes: i64) -> String {
    if minutes >= MINUTES_PER_DAY {
        return "24:00".to_string();
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn round_tenths(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;
    use chrono::TimeZone;

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap()
    }

    fn sample_waypoints() -> Vec<Waypoint> {
        let coords = Coordinates {
            lat: 41.88,
            lng: -87.63,
        };
        let locations = [
            (WaypointKind::Start, "Chicago, IL"),
            (WaypointKind::Pickup, "St. Louis, MO"),
            (WaypointKind::Dropoff, "Dallas, TX"),
            (WaypointKind::End, "Dallas, TX"),
        ];

        locations
            .iter()
            .enumerate()
            .map(|(i, (kind, location))| Waypoint {
                sequence: i as u32,
                kind: *kind,
                location: location.to_string(),
                coordinates: coords,
                arrival_time: start_time(),
                departure_time: start_time(),
                duration_minutes: 0,
            })
            .collect()
    }

    fn sheets_for(total_trip_minutes: i64) -> Vec<LogSheet> {
        generate_log_sheets(
            total_trip_minutes,
            &sample_waypoints(),
            start_time(),
            "John Doe",
            "TR-12345",
        )
    }

    fn minutes_of(time: &str) -> i64 {
        if time == "24:00" {
            return MINUTES_PER_DAY;
        }
        let (hours, minutes) = time.split_once(':').unwrap();
        hours.parse::<i64>().unwrap() * 60 + minutes.parse::<i64>().unwrap()
    }

    fn hours_from_entries(sheet: &LogSheet, status: DutyStatus) -> f64 {
        let minutes: i64 = sheet
            .entries
            .iter()
            .filter(|e| e.status == status)
            .map(|e| minutes_of(&e.end_time) - minutes_of(&e.start_time))
            .sum();
        minutes as f64 / 60.0
    }

    // ==========================================================================
    // Day counts
    // ==========================================================================

    #[test]
    fn zero_trip_time_produces_no_sheets() {
        assert!(sheets_for(0).is_empty());
        assert!(sheets_for(-30).is_empty());
    }

    #[test]
    fn day_count_rounds_up() {
        assert_eq!(sheets_for(1).len(), 1);
        assert_eq!(sheets_for(1440).len(), 1);
        assert_eq!(sheets_for(1441).len(), 2);
        assert_eq!(sheets_for(2700).len(), 2);
        assert_eq!(sheets_for(4320).len(), 3);
    }

    #[test]
    fn sheet_dates_advance_daily() {
        let sheets = sheets_for(4320);

        assert_eq!(sheets[0].date, start_time().date_naive());
        assert_eq!(sheets[1].date, start_time().date_naive() + Duration::days(1));
        assert_eq!(sheets[2].date, start_time().date_naive() + Duration::days(2));
    }

    // ==========================================================================
    // Template selection
    // ==========================================================================

    #[test]
    fn single_day_trip_uses_the_departure_template() {
        let sheets = sheets_for(540);

        assert_eq!(sheets.len(), 1);
        let sheet = &sheets[0];
        assert_eq!(sheet.entries.len(), 5);
        assert_eq!(sheet.entries[0].status, DutyStatus::OnDuty);
        assert_eq!(sheet.entries[0].location, "Chicago, IL");
        assert_eq!(sheet.entries[0].remarks, "Pre-trip inspection");
        assert_eq!(sheet.entries[1].location, "En route to St. Louis, MO");
    }

    #[test]
    fn two_day_trip_uses_departure_then_arrival_templates() {
        let sheets = sheets_for(1500);

        assert_eq!(sheets.len(), 2);

        let first = &sheets[0];
        assert_eq!(first.entries.len(), 5);
        assert_eq!(first.start_location, "Chicago, IL");
        assert_eq!(first.end_location, "Truck stop");

        let last = &sheets[1];
        assert_eq!(last.entries.len(), 6);
        assert_eq!(last.entries[0].status, DutyStatus::Sleeper);
        assert_eq!(last.entries[0].end_time, "02:00");
        assert_eq!(last.entries[2].location, "En route to Dallas, TX");
        assert_eq!(last.end_location, "Dallas, TX");
    }

    #[test]
    fn long_trip_fills_middle_days_with_line_haul_template() {
        let sheets = sheets_for(4320);

        let middle = &sheets[1];
        assert_eq!(middle.entries.len(), 7);
        assert!(middle
            .entries
            .iter()
            .any(|e| e.location == "Fuel station" && e.remarks == "Fueling"));
        assert_eq!(middle.start_location, "Truck stop");
        assert_eq!(middle.end_location, "Truck stop");
    }

    // ==========================================================================
    // Tiling
    // ==========================================================================

    #[test]
    fn entries_tile_midnight_to_midnight() {
        for sheet in sheets_for(5760) {
            assert_eq!(sheet.entries.first().unwrap().start_time, "00:00");
            assert_eq!(sheet.entries.last().unwrap().end_time, "24:00");

            for pair in sheet.entries.windows(2) {
                assert_eq!(
                    pair[0].end_time, pair[1].start_time,
                    "gap between '{}' and '{}' on {}",
                    pair[0].remarks, pair[1].remarks, sheet.date
                );
            }

            for entry in &sheet.entries {
                assert!(
                    minutes_of(&entry.start_time) < minutes_of(&entry.end_time),
                    "entry '{}' has no duration",
                    entry.remarks
                );
            }
        }
    }

    // ==========================================================================
    // Totals
    // ==========================================================================

    #[test]
    fn status_totals_sum_to_twenty_four_hours() {
        for sheet in sheets_for(5760) {
            let total = sheet.total_driving_hours
                + sheet.total_on_duty_hours
                + sheet.total_off_duty_hours
                + sheet.total_sleeper_hours;
            assert!(
                (total - 24.0).abs() < 1e-9,
                "totals sum to {} on {}",
                total,
                sheet.date
            );
        }
    }

    #[test]
    fn departure_day_totals_match_the_template() {
        let sheet = &sheets_for(540)[0];

        assert_eq!(sheet.total_driving_hours, 10.0);
        assert_eq!(sheet.total_on_duty_hours, 0.5);
        assert_eq!(sheet.total_off_duty_hours, 0.5);
        assert_eq!(sheet.total_sleeper_hours, 13.0);
    }

    #[test]
    fn arrival_day_totals_match_the_template() {
        let sheet = &sheets_for(1500)[1];

        assert_eq!(sheet.total_driving_hours, 5.0);
        assert_eq!(sheet.total_on_duty_hours, 2.0);
        assert_eq!(sheet.total_off_duty_hours, 15.0);
        assert_eq!(sheet.total_sleeper_hours, 2.0);
    }

    #[test]
    fn line_haul_day_totals_match_the_template() {
        let sheet = &sheets_for(4320)[1];

        assert_eq!(sheet.total_driving_hours, 10.0);
        assert_eq!(sheet.total_on_duty_hours, 1.0);
        assert_eq!(sheet.total_off_duty_hours, 0.5);
        assert_eq!(sheet.total_sleeper_hours, 12.5);
    }

    #[test]
    fn stored_totals_match_recomputation_from_entry_times() {
        // One-day, two-day, three-day, and week-long trips together
        // exercise every template position
        for total in [540, 1500, 2700, 4320, 10080] {
            for sheet in sheets_for(total) {
                let cases = [
                    (DutyStatus::Driving, sheet.total_driving_hours),
                    (DutyStatus::OnDuty, sheet.total_on_duty_hours),
                    (DutyStatus::OffDuty, sheet.total_off_duty_hours),
                    (DutyStatus::Sleeper, sheet.total_sleeper_hours),
                ];
                for (status, stored) in cases {
                    let recomputed = hours_from_entries(&sheet, status);
                    assert!(
                        (stored - recomputed).abs() < 0.05,
                        "{} stored as {} h but entries sum to {} h on {}",
                        status.as_str(),
                        stored,
                        recomputed,
                        sheet.date
                    );
                }
            }
        }
    }

    // ==========================================================================
    // Identity
    // ==========================================================================

    #[test]
    fn sheets_carry_the_driver_identity() {
        let sheets = generate_log_sheets(
            2700,
            &sample_waypoints(),
            start_time(),
            "Jane Smith",
            "TR-99001",
        );

        for sheet in sheets {
            assert_eq!(sheet.driver_name, "Jane Smith");
            assert_eq!(sheet.truck_number, "TR-99001");
        }
    }

    #[test]
    fn missing_waypoints_fall_back_to_placeholder_names() {
        let sheets = generate_log_sheets(540, &[], start_time(), "John Doe", "TR-12345");

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].entries[0].location, "Origin");
        assert_eq!(sheets[0].entries[1].location, "En route to destination");
    }
}
