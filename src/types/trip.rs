//! Trip request/plan types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LogSheet, Waypoint};

/// Coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Request to plan a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Where the driver currently is
    pub current_location: String,
    /// Pickup location (1 hour loading dwell)
    pub pickup_location: String,
    /// Dropoff location (1 hour unloading dwell)
    pub dropoff_location: String,
    /// Hours already used in the rolling 70-hour/8-day duty cycle
    pub current_cycle_hours: f64,
}

/// One driving leg between two named locations, as estimated by the
/// segment estimator. Read-only to the planning core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingSegment {
    pub from_location: String,
    pub to_location: String,
    /// Driving distance in miles
    pub distance_miles: f64,
    /// Driving time in whole minutes
    pub driving_minutes: i64,
}

impl DrivingSegment {
    /// Driving time in hours (display boundary only).
    pub fn driving_hours(&self) -> f64 {
        self.driving_minutes as f64 / 60.0
    }
}

/// Fully computed trip plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: Uuid,

    // Echo of the request
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,

    /// Total driving distance in miles
    pub total_distance_miles: f64,
    /// Total driving time in hours
    pub total_driving_hours: f64,
    /// Total trip time in hours (driving + mandatory stops + fuel stops)
    pub total_trip_hours: f64,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Number of fuel stops across both legs
    pub fuel_stops: u32,
    /// Number of mandatory duty stops (breaks + rests + cycle resets)
    pub rest_stops: u32,

    pub waypoints: Vec<Waypoint>,
    pub log_sheets: Vec<LogSheet>,

    /// Route polyline as GeoJSON coordinates [[lng, lat], ...]
    #[serde(default)]
    pub geometry: Vec<[f64; 2]>,

    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_request_deserializes_camel_case() {
        let json = r#"{
            "currentLocation": "Chicago, IL",
            "pickupLocation": "Indianapolis, IN",
            "dropoffLocation": "Atlanta, GA",
            "currentCycleHours": 20.5
        }"#;
        let req: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.current_location, "Chicago, IL");
        assert_eq!(req.current_cycle_hours, 20.5);
    }

    #[test]
    fn test_driving_segment_hours_conversion() {
        let segment = DrivingSegment {
            from_location: "A".to_string(),
            to_location: "B".to_string(),
            distance_miles: 330.0,
            driving_minutes: 360,
        };
        assert_eq!(segment.driving_hours(), 6.0);
    }
}
