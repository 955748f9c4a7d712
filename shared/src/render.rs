//! Presentation seam between a [`ViewModel`] and whatever draws it.

use crate::form::{Feedback, FlightForm};
use crate::theme::Theme;
use crate::view::{FilterChip, FlightListView, PageTab, StatTile, ViewModel};

/// Named list containers of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListContainer {
    RecentFlights,
    Flights,
}

impl ListContainer {
    pub fn element_id(self) -> &'static str {
        match self {
            ListContainer::RecentFlights => "recentFlightsList",
            ListContainer::Flights => "flightsList",
        }
    }
}

/// Something that can display the dashboard.
pub trait RenderTarget {
    fn summary(&mut self, tiles: &[StatTile]);
    fn flight_list(&mut self, container: ListContainer, list: &FlightListView);
    fn filters(&mut self, chips: &[FilterChip]);
    fn pages(&mut self, tabs: &[PageTab], fragment: &str);
    fn theme(&mut self, theme: Theme, toggle_checked: bool);
    fn menu(&mut self, open: bool);
    /// Current form inputs; a reset draft clears them.
    fn form(&mut self, draft: &FlightForm);
    fn feedback(&mut self, feedback: Option<&Feedback>);
}

/// Push a full view into `target`.
///
/// A missing summary leaves the summary container untouched.
pub fn paint<T: RenderTarget + ?Sized>(target: &mut T, view: &ViewModel) {
    if let Some(tiles) = &view.summary {
        target.summary(tiles);
    }
    target.flight_list(ListContainer::RecentFlights, &view.recent_flights);
    target.flight_list(ListContainer::Flights, &view.flights);
    target.filters(&view.filters);
    target.pages(&view.pages, &view.fragment);
    target.theme(view.theme, view.dark_mode_toggle);
    target.menu(view.menu_open);
    target.form(&view.form);
    target.feedback(view.feedback.as_ref());
}
