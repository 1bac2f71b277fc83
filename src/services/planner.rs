//! Trip planning orchestration
//!
//! Validates the request, estimates both legs through the injected
//! estimator, runs the duty-cycle simulation, and assembles the full
//! trip plan: waypoints, route geometry, and daily log sheets. The
//! simulation start time is a parameter so identical requests always
//! produce identical plans.

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::PlanError;
use crate::services::estimator::SegmentEstimator;
use crate::services::geo::route_geometry;
use crate::services::hos::simulate_duty_cycle;
use crate::services::log_sheets::generate_log_sheets;
use crate::services::waypoints::{generate_waypoints, WaypointInput};
use crate::types::{TripPlan, TripRequest};

/// Miles a full tank covers: 150 gallons at 6.5 mpg
pub const MAX_DISTANCE_PER_TANK_MILES: f64 = 975.0;

/// Cycle hours a driver may carry into a trip
pub const MAX_CYCLE_HOURS: f64 = 70.0;

/// Compute a complete trip plan for one request
///
/// `start_time` anchors every clock in the plan; wall-clock time is
/// only read for the `created_at` stamp.
pub fn plan_trip(
    request: &TripRequest,
    estimator: &dyn SegmentEstimator,
    start_time: DateTime<Utc>,
    driver_name: &str,
    truck_number: &str,
) -> Result<TripPlan, PlanError> {
    validate_request(request)?;

    let to_pickup = estimate_leg(estimator, &request.current_location, &request.pickup_location)?;
    let to_dropoff = estimate_leg(estimator, &request.pickup_location, &request.dropoff_location)?;

    let geocode = |location: &str| {
        estimator
            .geocode(location)
            .map_err(|source| PlanError::Geocoding {
                location: location.to_string(),
                source,
            })
    };
    let current_coordinates = geocode(&request.current_location)?;
    let pickup_coordinates = geocode(&request.pickup_location)?;
    let dropoff_coordinates = geocode(&request.dropoff_location)?;

    let fuel_stops_to_pickup = fuel_stops_for(to_pickup.distance_miles);
    let fuel_stops_to_dropoff = fuel_stops_for(to_dropoff.distance_miles);
    let fuel_stops = fuel_stops_to_pickup + fuel_stops_to_dropoff;

    let total_distance_miles =
        ((to_pickup.distance_miles + to_dropoff.distance_miles) * 10.0).round() / 10.0;
    let total_driving_minutes = to_pickup.driving_minutes + to_dropoff.driving_minutes;
    let starting_cycle_minutes = (request.current_cycle_hours * 60.0).round() as i64;

    info!(
        total_distance_miles,
        total_driving_minutes, fuel_stops, "estimated trip legs"
    );

    let simulation = simulate_duty_cycle(total_driving_minutes, starting_cycle_minutes, fuel_stops)?;

    info!(
        duty_stops = simulation.stops.len(),
        total_trip_minutes = simulation.total_trip_minutes,
        "simulated duty cycle"
    );

    let waypoint_input = WaypointInput {
        current_location: request.current_location.clone(),
        pickup_location: request.pickup_location.clone(),
        dropoff_location: request.dropoff_location.clone(),
        current_coordinates,
        pickup_coordinates,
        dropoff_coordinates,
        to_pickup_minutes: to_pickup.driving_minutes,
        to_dropoff_minutes: to_dropoff.driving_minutes,
        fuel_stops_to_pickup,
        fuel_stops_to_dropoff,
    };
    let waypoints = generate_waypoints(&waypoint_input, &simulation.stops, start_time);
    let geometry = route_geometry(&waypoints);

    let log_sheets = generate_log_sheets(
        simulation.total_trip_minutes,
        &waypoints,
        start_time,
        driver_name,
        truck_number,
    );

    Ok(TripPlan {
        id: Uuid::new_v4(),
        current_location: request.current_location.clone(),
        pickup_location: request.pickup_location.clone(),
        dropoff_location: request.dropoff_location.clone(),
        current_cycle_hours: request.current_cycle_hours,
        total_distance_miles,
        total_driving_hours: to_hours(total_driving_minutes),
        total_trip_hours: to_hours(simulation.total_trip_minutes),
        start_time,
        end_time: start_time + Duration::minutes(simulation.total_trip_minutes),
        fuel_stops,
        rest_stops: simulation.stops.len() as u32,
        waypoints,
        log_sheets,
        geometry,
        created_at: Utc::now(),
    })
}

/// Reject malformed requests before any estimation or simulation runs
fn validate_request(request: &TripRequest) -> Result<(), PlanError> {
    let locations = [
        ("current_location", &request.current_location),
        ("pickup_location", &request.pickup_location),
        ("dropoff_location", &request.dropoff_location),
    ];
    for (field, value) in locations {
        if value.trim().is_empty() {
            return Err(PlanError::InvalidInput {
                field,
                reason: "must not be empty".to_string(),
            });
        }
    }

    let cycle = request.current_cycle_hours;
    if !cycle.is_finite() || !(0.0..=MAX_CYCLE_HOURS).contains(&cycle) {
        return Err(PlanError::InvalidInput {
            field: "current_cycle_hours",
            reason: format!("must be between 0 and {}, got {}", MAX_CYCLE_HOURS, cycle),
        });
    }

    Ok(())
}

fn estimate_leg(
    estimator: &dyn SegmentEstimator,
    from: &str,
    to: &str,
) -> Result<crate::types::DrivingSegment, PlanError> {
    let segment = estimator
        .segment(from, to)
        .map_err(|source| PlanError::Estimation {
            from: from.to_string(),
            to: to.to_string(),
            source,
        })?;

    // Stop placement assumes non-negative leg distance and time
    if !segment.distance_miles.is_finite() || segment.distance_miles < 0.0 {
        return Err(PlanError::Estimation {
            from: from.to_string(),
            to: to.to_string(),
            source: anyhow::anyhow!("unusable distance: {} miles", segment.distance_miles),
        });
    }
    if segment.driving_minutes < 0 {
        return Err(PlanError::Estimation {
            from: from.to_string(),
            to: to.to_string(),
            source: anyhow::anyhow!(
                "negative driving time: {} minutes",
                segment.driving_minutes
            ),
        });
    }

    Ok(segment)
}

fn fuel_stops_for(distance_miles: f64) -> u32 {
    (distance_miles / MAX_DISTANCE_PER_TANK_MILES).floor() as u32
}

fn to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}
