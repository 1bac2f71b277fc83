//! ELD log sheet types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Duty status for a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DutyStatus {
    Driving,
    OnDuty,
    OffDuty,
    Sleeper,
}

impl DutyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on-duty",
            DutyStatus::OffDuty => "off-duty",
            DutyStatus::Sleeper => "sleeper",
        }
    }
}

/// One duty-status span within a log day.
///
/// Times are "HH:MM" clock strings within the day; the final entry of a
/// day ends at the sentinel "24:00". Entries of a sheet are contiguous and
/// tile the full day with no gap or overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub start_time: String,
    pub end_time: String,
    pub status: DutyStatus,
    pub location: String,
    pub remarks: String,
}

/// One day of the driver's ELD log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSheet {
    pub date: NaiveDate,
    pub driver_name: String,
    pub truck_number: String,
    pub start_location: String,
    pub end_location: String,
    pub entries: Vec<LogEntry>,
    /// Per-status totals in hours, rounded to the nearest 0.1
    pub total_driving_hours: f64,
    pub total_on_duty_hours: f64,
    pub total_off_duty_hours: f64,
    pub total_sleeper_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_status_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&DutyStatus::OnDuty).unwrap(), "\"on-duty\"");
        assert_eq!(serde_json::to_string(&DutyStatus::Sleeper).unwrap(), "\"sleeper\"");
        assert_eq!(DutyStatus::OffDuty.as_str(), "off-duty");
    }

    #[test]
    fn test_log_sheet_serializes_totals_camel_case() {
        let sheet = LogSheet {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            driver_name: "John Doe".to_string(),
            truck_number: "TR-12345".to_string(),
            start_location: "Chicago, IL".to_string(),
            end_location: "Truck stop".to_string(),
            entries: vec![],
            total_driving_hours: 10.0,
            total_on_duty_hours: 0.5,
            total_off_duty_hours: 0.5,
            total_sleeper_hours: 13.0,
        };
        let json = serde_json::to_string(&sheet).unwrap();
        assert!(json.contains("\"totalDrivingHours\":10.0"));
        assert!(json.contains("\"truckNumber\":\"TR-12345\""));
    }
}
