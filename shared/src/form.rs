//! The "add flight" form: raw field values, validation and feedback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Flight, FlightId, FlightStatus};

pub const FLIGHT_ADDED_MESSAGE: &str = "✅ Flight added! (demo)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Drone,
    Date,
    Duration,
    Status,
}

/// Raw form values exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightForm {
    pub drone: String,
    pub date: String,
    pub duration: String,
    pub status: FlightStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FormError {
    #[error("❌ All fields required")]
    MissingFields,
    #[error("❌ Duration must be positive")]
    NonPositiveDuration,
}

/// A validated submission, still waiting for its identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewFlight {
    pub date: String,
    pub drone: String,
    pub duration: i64,
    pub status: FlightStatus,
}

impl NewFlight {
    pub fn into_flight(self, id: FlightId) -> Flight {
        Flight {
            id,
            date: self.date,
            drone: self.drone,
            duration: self.duration,
            status: self.status,
        }
    }
}

impl FlightForm {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Drone => self.drone = value,
            FormField::Date => self.date = value,
            FormField::Duration => self.duration = value,
            FormField::Status => self.status = FlightStatus::new(value),
        }
    }

    pub fn validate(&self) -> Result<NewFlight, FormError> {
        let missing = |value: &str| value.is_empty();
        if missing(&self.drone) || missing(&self.date) || missing(&self.duration) {
            return Err(FormError::MissingFields);
        }

        let duration = match parse_leading_int(&self.duration) {
            Some(minutes) if minutes > 0 => minutes,
            _ => return Err(FormError::NonPositiveDuration),
        };

        Ok(NewFlight {
            date: self.date.clone(),
            drone: self.drone.clone(),
            duration,
            status: self.status.clone(),
        })
    }
}

/// Integer prefix of `input`: leading whitespace, an optional sign, then as
/// many decimal digits as follow. `"12.5"` is 12, `"abc"` is `None`.
///
/// Digit runs too long for an `i64` saturate, so an oversized positive entry
/// is still positive.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Success,
    Error,
}

/// The single feedback line under the form; each submission overwrites it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn error(error: FormError) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: error.to_string(),
        }
    }
}
