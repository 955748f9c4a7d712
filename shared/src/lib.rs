#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod event;
pub mod form;
pub mod loader;
pub mod model;
pub mod navigation;
pub mod render;
pub mod theme;
pub mod view;

pub use app::{App, AppConfig};
pub use capabilities::{Capabilities, Effect, Request};
pub use event::{ClickTarget, Event};
pub use form::{Feedback, FeedbackKind, FlightForm, FormError, FormField};
pub use model::{Filter, Flight, FlightId, FlightStatus, FlightStore, Model};
pub use navigation::{PageId, Pages};
pub use render::{paint, ListContainer, RenderTarget};
pub use theme::Theme;
pub use view::ViewModel;

/// Flight collection, relative to the dashboard root.
pub const FLIGHTS_PATH: &str = "data/flights.json";
/// Preference key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";
pub const RECENT_FLIGHTS_LIMIT: usize = 3;
pub const DEFAULT_PAGE: &str = "dashboard";
