//! Configuration management

use anyhow::{self, Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Driver name printed on generated log sheets
    pub driver_name: String,

    /// Truck/tractor number printed on generated log sheets
    pub truck_number: String,

    /// Segment estimator backend ("mock" or "haversine")
    pub estimator_backend: String,

    /// Average highway speed in mph used to convert distance to driving time
    pub avg_speed_mph: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let driver_name = std::env::var("DRIVER_NAME")
            .unwrap_or_else(|_| "John Doe".to_string());

        let truck_number = std::env::var("TRUCK_NUMBER")
            .unwrap_or_else(|_| "TR-12345".to_string());

        let estimator_backend = std::env::var("ESTIMATOR_BACKEND")
            .unwrap_or_else(|_| "mock".to_string());

        let avg_speed_mph = match std::env::var("AVG_SPEED_MPH") {
            Ok(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("AVG_SPEED_MPH must be a number, got '{}'", raw))?,
            Err(_) => 55.0,
        };

        if !avg_speed_mph.is_finite() || avg_speed_mph <= 0.0 {
            anyhow::bail!(
                "AVG_SPEED_MPH must be a positive number (current: {})",
                avg_speed_mph
            );
        }

        Ok(Self {
            driver_name,
            truck_number,
            estimator_backend,
            avg_speed_mph,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver_name: "John Doe".to_string(),
            truck_number: "TR-12345".to_string(),
            estimator_backend: "mock".to_string(),
            avg_speed_mph: 55.0,
        }
    }
}
