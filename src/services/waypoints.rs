//! Waypoint materialization along a planned route
//!
//! Expands the simulator's stop list into an ordered, clocked waypoint
//! sequence: start → stops → pickup → stops → dropoff → end. Stops are
//! placed by straight-line interpolation between the leg endpoints, and
//! clock times accumulate driving sub-segments plus stop dwell times,
//! so each leg's driving time is conserved to the minute.

use chrono::{DateTime, Duration, Utc};

use crate::services::geo::interpolate;
use crate::services::hos::StopEvent;
use crate::types::{Coordinates, Waypoint, WaypointKind};

/// Time allotted for loading at pickup and unloading at dropoff
pub const DWELL_MINUTES: i64 = 60;

/// Route facts the materializer needs, assembled by the planner
#[derive(Debug, Clone)]
pub struct WaypointInput {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_coordinates: Coordinates,
    pub pickup_coordinates: Coordinates,
    pub dropoff_coordinates: Coordinates,
    /// Driving minutes from the current location to the pickup
    pub to_pickup_minutes: i64,
    /// Driving minutes from the pickup to the dropoff
    pub to_dropoff_minutes: i64,
    pub fuel_stops_to_pickup: u32,
    pub fuel_stops_to_dropoff: u32,
}

/// Materialize the full waypoint sequence for a trip
///
/// Duty stops are split between the legs in proportion to each leg's
/// share of driving time (floor division, remainder to the second leg).
/// Fuel stops are per-leg inputs and not part of that split. Labels
/// number each stop family continuously across both legs.
pub fn generate_waypoints(
    input: &WaypointInput,
    duty_stops: &[StopEvent],
    start_time: DateTime<Utc>,
) -> Vec<Waypoint> {
    let mut waypoints = Vec::new();
    let mut clock = start_time;

    push_stop(
        &mut waypoints,
        &mut clock,
        WaypointKind::Start,
        input.current_location.clone(),
        input.current_coordinates,
        0,
    );

    let total_driving = input.to_pickup_minutes + input.to_dropoff_minutes;
    let duty_on_leg1 = if total_driving > 0 {
        ((duty_stops.len() as i64 * input.to_pickup_minutes) / total_driving) as usize
    } else {
        0
    };
    let (leg1_duty, leg2_duty) = duty_stops.split_at(duty_on_leg1);

    walk_leg(
        &mut waypoints,
        &mut clock,
        &LegPlan {
            from: input.current_coordinates,
            to: input.pickup_coordinates,
            driving_minutes: input.to_pickup_minutes,
            fuel_stops: input.fuel_stops_to_pickup,
            fuel_label_offset: 0,
            duty_stops: leg1_duty,
            duty_label_offset: 0,
        },
    );

    push_stop(
        &mut waypoints,
        &mut clock,
        WaypointKind::Pickup,
        input.pickup_location.clone(),
        input.pickup_coordinates,
        DWELL_MINUTES,
    );

    walk_leg(
        &mut waypoints,
        &mut clock,
        &LegPlan {
            from: input.pickup_coordinates,
            to: input.dropoff_coordinates,
            driving_minutes: input.to_dropoff_minutes,
            fuel_stops: input.fuel_stops_to_dropoff,
            fuel_label_offset: input.fuel_stops_to_pickup,
            duty_stops: leg2_duty,
            duty_label_offset: duty_on_leg1,
        },
    );

    push_stop(
        &mut waypoints,
        &mut clock,
        WaypointKind::Dropoff,
        input.dropoff_location.clone(),
        input.dropoff_coordinates,
        DWELL_MINUTES,
    );

    push_stop(
        &mut waypoints,
        &mut clock,
        WaypointKind::End,
        input.dropoff_location.clone(),
        input.dropoff_coordinates,
        0,
    );

    waypoints
}

/// Everything needed to materialize one driving leg
struct LegPlan<'a> {
    from: Coordinates,
    to: Coordinates,
    driving_minutes: i64,
    fuel_stops: u32,
    fuel_label_offset: u32,
    duty_stops: &'a [StopEvent],
    duty_label_offset: usize,
}

/// Emit one leg's fuel stops, then its duty stops, then the remainder
/// drive to the leg endpoint
///
/// Each stop family divides the leg into equal driving sub-segments
/// (integer minutes, truncating). The closing remainder absorbs the
/// truncation loss so the leg's driving time stays exact.
fn walk_leg(waypoints: &mut Vec<Waypoint>, clock: &mut DateTime<Utc>, leg: &LegPlan) {
    let fuel_count = i64::from(leg.fuel_stops);
    let fuel_sub = if leg.fuel_stops > 0 {
        leg.driving_minutes / (fuel_count + 1)
    } else {
        0
    };
    for i in 0..leg.fuel_stops {
        let progress = f64::from(i + 1) / f64::from(leg.fuel_stops + 1);
        let coordinates = interpolate(&leg.from, &leg.to, progress);
        *clock += Duration::minutes(fuel_sub);
        push_stop(
            waypoints,
            clock,
            WaypointKind::Fuel,
            format!("Fuel Stop {}", leg.fuel_label_offset + i + 1),
            coordinates,
            StopEvent::Fuel.duration_minutes(),
        );
    }

    let duty_count = leg.duty_stops.len() as i64;
    let duty_sub = if leg.duty_stops.is_empty() {
        0
    } else {
        leg.driving_minutes / (duty_count + 1)
    };
    for (j, stop) in leg.duty_stops.iter().enumerate() {
        let progress = (j + 1) as f64 / (leg.duty_stops.len() + 1) as f64;
        let coordinates = interpolate(&leg.from, &leg.to, progress);
        *clock += Duration::minutes(duty_sub);

        let (kind, prefix) = match stop {
            StopEvent::Break => (WaypointKind::Break, "Break"),
            StopEvent::Rest => (WaypointKind::Rest, "Rest"),
            StopEvent::Reset => (WaypointKind::Rest, "Reset"),
            StopEvent::Fuel => (WaypointKind::Fuel, "Fuel"),
        };
        push_stop(
            waypoints,
            clock,
            kind,
            format!("{} Stop {}", prefix, leg.duty_label_offset + j + 1),
            coordinates,
            stop.duration_minutes(),
        );
    }

    let consumed = fuel_count * fuel_sub + duty_count * duty_sub;
    let remainder = (leg.driving_minutes - consumed).max(0);
    *clock += Duration::minutes(remainder);
}

/// Append a waypoint at the current clock and advance past its dwell
fn push_stop(
    waypoints: &mut Vec<Waypoint>,
    clock: &mut DateTime<Utc>,
    kind: WaypointKind,
    location: String,
    coordinates: Coordinates,
    duration_minutes: i64,
) {
    let arrival_time = *clock;
    let departure_time = arrival_time + Duration::minutes(duration_minutes);

    waypoints.push(Waypoint {
        sequence: waypoints.len() as u32,
        kind,
        location,
        coordinates,
        arrival_time,
        departure_time,
        duration_minutes,
    });

    *clock = departure_time;
}
