//! Trip planning error taxonomy.

use thiserror::Error;

/// Errors surfaced by the trip planning core.
///
/// Validation failures (`InvalidInput`) are rejected before the simulator
/// runs and always name the offending request field. `InvariantViolation`
/// marks a defensive internal fault: the computation aborts rather than
/// emitting a malformed schedule.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    #[error("computation invariant violated: {0}")]
    InvariantViolation(String),

    #[error("segment estimation failed for {from} -> {to}")]
    Estimation {
        from: String,
        to: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("geocoding failed for {location}")]
    Geocoding {
        location: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PlanError {
    /// Short machine-readable code for this error kind.
    pub const fn code(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { .. } => "INVALID_INPUT",
            PlanError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            PlanError::Estimation { .. } => "ESTIMATION_ERROR",
            PlanError::Geocoding { .. } => "GEOCODING_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_the_field() {
        let err = PlanError::InvalidInput {
            field: "pickup_location",
            reason: "must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "invalid pickup_location: must not be empty");
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn estimation_error_names_the_pair() {
        let err = PlanError::Estimation {
            from: "Chicago, IL".to_string(),
            to: "Gary, IN".to_string(),
            source: anyhow::anyhow!("backend offline"),
        };
        assert!(err.to_string().contains("Chicago, IL -> Gary, IN"));
        assert_eq!(err.code(), "ESTIMATION_ERROR");
    }

    #[test]
    fn every_error_kind_carries_a_stable_code() {
        let invariant = PlanError::InvariantViolation("step stalled".to_string());
        assert_eq!(invariant.code(), "INVARIANT_VIOLATION");

        let geocoding = PlanError::Geocoding {
            location: "Nowhere, KS".to_string(),
            source: anyhow::anyhow!("no match"),
        };
        assert_eq!(geocoding.code(), "GEOCODING_ERROR");
    }
}
