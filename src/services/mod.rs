//! Business logic services

pub mod estimator;
pub mod geo;
pub mod hos;
pub mod log_sheets;
pub mod planner;
pub mod waypoints;
