//! Waypoint types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Kind of waypoint along the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    Start,
    Pickup,
    Dropoff,
    Fuel,
    Rest,
    Break,
    End,
}

impl WaypointKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            WaypointKind::Start => "start",
            WaypointKind::Pickup => "pickup",
            WaypointKind::Dropoff => "dropoff",
            WaypointKind::Fuel => "fuel",
            WaypointKind::Rest => "rest",
            WaypointKind::Break => "break",
            WaypointKind::End => "end",
        }
    }
}

/// A timestamped point on the planned route.
///
/// Immutable once created; `sequence` defines the total order. For
/// zero-duration waypoints (start, end) arrival and departure are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// Position in the route (0-based)
    pub sequence: u32,
    #[serde(rename = "type")]
    pub kind: WaypointKind,
    /// Display label ("Chicago, IL", "Fuel Stop 1", ...)
    pub location: String,
    pub coordinates: Coordinates,
    pub arrival_time: DateTime<Utc>,
    /// Always `arrival_time + duration_minutes`
    pub departure_time: DateTime<Utc>,
    /// Dwell time at this waypoint in minutes
    pub duration_minutes: i64,
}
