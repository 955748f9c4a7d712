use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::form::{Feedback, FlightForm};
use crate::navigation::PageId;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(pub u64);

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle tag of a flight.
///
/// Opaque on purpose: the data source may supply tags beyond the two the form
/// offers, and those are displayed and filtered on verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightStatus(String);

impl FlightStatus {
    pub const COMPLETED: &'static str = "completed";
    pub const IN_AIR: &'static str = "in-air";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn completed() -> Self {
        Self::new(Self::COMPLETED)
    }

    pub fn in_air() -> Self {
        Self::new(Self::IN_AIR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FlightStatus {
    fn default() -> Self {
        Self::completed()
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub date: String,
    pub drone: String,
    /// Minutes. Trusted as-is when it comes from the data source.
    pub duration: i64,
    pub status: FlightStatus,
}

impl Flight {
    pub fn new(
        id: u64,
        date: impl Into<String>,
        drone: impl Into<String>,
        duration: i64,
        status: FlightStatus,
    ) -> Self {
        Self {
            id: FlightId(id),
            date: date.into(),
            drone: drone.into(),
            duration,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("flight store was already installed with {count} records")]
    AlreadyInstalled { count: usize },
}

/// Ordered flights plus the "still loading" flag.
///
/// Starts empty and loading. [`FlightStore::install`] replaces the sequence
/// once and clears the flag; afterwards records are only ever appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightStore {
    flights: Vec<Flight>,
    loading: bool,
}

impl Default for FlightStore {
    fn default() -> Self {
        Self {
            flights: Vec::new(),
            loading: true,
        }
    }
}

impl FlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn install(&mut self, flights: Vec<Flight>) -> Result<(), StoreError> {
        if !self.loading {
            return Err(StoreError::AlreadyInstalled {
                count: self.flights.len(),
            });
        }
        self.flights = flights;
        self.loading = false;
        Ok(())
    }

    /// Identifier for the next appended record: current count + 1.
    ///
    /// Not collision-safe if records were ever removed; they never are.
    pub fn next_id(&self) -> FlightId {
        FlightId(self.flights.len() as u64 + 1)
    }

    pub fn append(&mut self, flight: Flight) {
        self.flights.push(flight);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Status(FlightStatus),
}

impl Filter {
    pub const ALL: &'static str = "all";

    pub fn parse(token: &str) -> Self {
        if token == Self::ALL {
            Filter::All
        } else {
            Filter::Status(FlightStatus::new(token))
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            Filter::All => Self::ALL,
            Filter::Status(status) => status.as_str(),
        }
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        match self {
            Filter::All => true,
            Filter::Status(status) => &flight.status == status,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub store: FlightStore,
    pub active_filter: Filter,
    pub active_page: PageId,
    pub theme: Theme,
    /// OS-level dark scheme signal reported by the shell at startup.
    pub prefers_dark: bool,
    pub menu_open: bool,
    pub form: FlightForm,
    pub feedback: Option<Feedback>,
    pub load_requested: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            store: FlightStore::new(),
            active_filter: Filter::All,
            active_page: PageId::new(crate::DEFAULT_PAGE),
            theme: Theme::Light,
            prefers_dark: false,
            menu_open: false,
            form: FlightForm::default(),
            feedback: None,
            load_requested: false,
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }
}
