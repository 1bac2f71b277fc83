//! Geographic calculations

use crate::types::{Coordinates, Waypoint};

/// Earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Calculate Haversine distance between two points in miles
pub fn haversine_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}

/// Straight-line interpolation between two coordinates.
///
/// `progress` is the fraction of the way from `start` to `end` (0.0..=1.0).
/// Not road-accurate: stop positions are estimates along the direct line.
pub fn interpolate(start: &Coordinates, end: &Coordinates, progress: f64) -> Coordinates {
    Coordinates {
        lat: start.lat + (end.lat - start.lat) * progress,
        lng: start.lng + (end.lng - start.lng) * progress,
    }
}

/// Route polyline as GeoJSON coordinates [[lng, lat], ...] drawn through
/// every waypoint in sequence order.
pub fn route_geometry(waypoints: &[Waypoint]) -> Vec<[f64; 2]> {
    waypoints
        .iter()
        .map(|w| [w.coordinates.lng, w.coordinates.lat])
        .collect()
}
