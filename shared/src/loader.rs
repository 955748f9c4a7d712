//! Startup load of the flight collection.

use thiserror::Error;

use crate::capabilities::{HttpError, HttpResult};
use crate::model::{Flight, FlightStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("transport failed: {0}")]
    Transport(#[from] HttpError),

    #[error("unexpected response status {0}")]
    Status(u16),

    #[error("malformed flight collection: {0}")]
    Parse(String),
}

/// The two sample records used whenever the data source cannot be read.
pub fn fallback_flights() -> Vec<Flight> {
    vec![
        Flight::new(1, "2026-02-10", "Mavic 3", 25, FlightStatus::completed()),
        Flight::new(2, "2026-02-11", "Phantom 4", 42, FlightStatus::in_air()),
    ]
}

/// Turn the shell's answer into a flight collection, preserving source order.
pub fn parse_response(result: HttpResult) -> Result<Vec<Flight>, LoadError> {
    let response = result?;
    if !response.is_success() {
        return Err(LoadError::Status(response.status()));
    }
    serde_json::from_slice(response.body()).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Like [`parse_response`] but never fails: errors are logged and `fallback`
/// is returned instead.
pub fn flights_or_fallback(result: HttpResult, fallback: &[Flight]) -> Vec<Flight> {
    match parse_response(result) {
        Ok(flights) => {
            tracing::info!(count = flights.len(), "flights loaded");
            flights
        }
        Err(error) => {
            tracing::error!(%error, "using fallback data");
            fallback.to_vec()
        }
    }
}
