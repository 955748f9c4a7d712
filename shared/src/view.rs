//! View rendering: pure functions from model state to view data.
//!
//! Nothing here holds state. Each function can be called any number of times
//! with the same inputs and produces the same output.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroUsize;

use crate::form::{Feedback, FlightForm};
use crate::model::{Filter, Flight, FlightId, FlightStore, Model};
use crate::navigation::Pages;
use crate::theme::Theme;

pub const LOADING_PLACEHOLDER: &str = "Loading flights...";
pub const EMPTY_PLACEHOLDER: &str = "No flights found";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub total_flights: usize,
    pub total_minutes: i64,
    /// `total_minutes / total_flights`, rounded half up.
    pub average_minutes: i64,
    pub distinct_drones: usize,
}

impl FlightSummary {
    #[allow(clippy::cast_precision_loss)]
    pub fn flight_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }

    pub fn tiles(&self) -> Vec<StatTile> {
        vec![
            StatTile::new("Total Flights", self.total_flights.to_string()),
            StatTile::new("Flight Time", format!("{:.1} h", self.flight_hours())),
            StatTile::new("Active Drones", self.distinct_drones.to_string()),
            StatTile::new("Avg. Duration", format!("{} min", self.average_minutes)),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTile {
    pub label: String,
    pub value: String,
}

impl StatTile {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Summary statistics, or `None` for an empty sequence. An empty sequence
/// renders nothing at all: whatever was shown before stays.
pub fn summarize(flights: &[Flight]) -> Option<FlightSummary> {
    if flights.is_empty() {
        return None;
    }

    let count = flights.len();
    let total: i128 = flights.iter().map(|f| i128::from(f.duration)).sum();
    let count_wide = i128::try_from(count).ok()?;
    // Half-up rounding of total / count in exact integer arithmetic.
    let average = (2 * total + count_wide).div_euclid(2 * count_wide);
    let distinct_drones = flights
        .iter()
        .map(|f| f.drone.as_str())
        .collect::<HashSet<_>>()
        .len();

    Some(FlightSummary {
        total_flights: count,
        total_minutes: clamp_i64(total),
        average_minutes: clamp_i64(average),
        distinct_drones,
    })
}

fn clamp_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRow {
    pub id: FlightId,
    pub date: String,
    pub drone: String,
    pub duration: String,
    pub status: String,
}

impl From<&Flight> for FlightRow {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id,
            date: flight.date.clone(),
            drone: flight.drone.clone(),
            duration: format!("{} min", flight.duration),
            status: flight.status.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlightListView {
    Loading,
    Empty,
    Rows { rows: Vec<FlightRow> },
}

impl FlightListView {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            FlightListView::Loading => Some(LOADING_PLACEHOLDER),
            FlightListView::Empty => Some(EMPTY_PLACEHOLDER),
            FlightListView::Rows { .. } => None,
        }
    }

    pub fn rows(&self) -> &[FlightRow] {
        match self {
            FlightListView::Rows { rows } => rows,
            _ => &[],
        }
    }
}

/// Filter, then keep at most `limit` leading records. Order is preserved.
pub fn resolve_flights<'a>(
    flights: &'a [Flight],
    filter: &Filter,
    limit: Option<NonZeroUsize>,
) -> Vec<&'a Flight> {
    let matching = flights.iter().filter(|f| filter.matches(f));
    match limit {
        Some(limit) => matching.take(limit.get()).collect(),
        None => matching.collect(),
    }
}

pub fn render_list(
    store: &FlightStore,
    filter: &Filter,
    limit: Option<NonZeroUsize>,
) -> FlightListView {
    if store.is_loading() {
        return FlightListView::Loading;
    }

    let resolved = resolve_flights(store.flights(), filter, limit);
    if resolved.is_empty() {
        return FlightListView::Empty;
    }

    FlightListView::Rows {
        rows: resolved.into_iter().map(FlightRow::from).collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub filter: Filter,
    pub label: String,
}

impl FilterOption {
    pub fn new(filter: Filter, label: impl Into<String>) -> Self {
        Self {
            filter,
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub token: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTab {
    pub id: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub summary: Option<Vec<StatTile>>,
    pub recent_flights: FlightListView,
    pub flights: FlightListView,
    pub filters: Vec<FilterChip>,
    pub pages: Vec<PageTab>,
    /// Address fragment mirroring the active page, without the `#`.
    pub fragment: String,
    pub theme: Theme,
    pub dark_mode_toggle: bool,
    pub menu_open: bool,
    pub form: FlightForm,
    pub feedback: Option<Feedback>,
}

/// Full refresh: everything the shell needs to repaint.
pub fn build(
    model: &Model,
    pages: &Pages,
    filters: &[FilterOption],
    recent_limit: Option<NonZeroUsize>,
) -> ViewModel {
    ViewModel {
        summary: summarize(model.store.flights()).map(|s| s.tiles()),
        recent_flights: render_list(&model.store, &Filter::All, recent_limit),
        flights: render_list(&model.store, &model.active_filter, None),
        filters: filters
            .iter()
            .map(|option| FilterChip {
                token: option.filter.as_token().to_string(),
                label: option.label.clone(),
                selected: option.filter == model.active_filter,
            })
            .collect(),
        pages: pages
            .ids()
            .iter()
            .map(|id| PageTab {
                id: id.to_string(),
                active: *id == model.active_page,
            })
            .collect(),
        fragment: model.active_page.to_string(),
        theme: model.theme,
        dark_mode_toggle: model.theme.is_dark(),
        menu_open: model.menu_open,
        form: model.form.clone(),
        feedback: model.feedback.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlightStatus;
    use proptest::prelude::*;

    fn flights() -> Vec<Flight> {
        vec![
            Flight::new(1, "2026-02-10", "Mavic 3", 25, FlightStatus::completed()),
            Flight::new(2, "2026-02-11", "Phantom 4", 42, FlightStatus::in_air()),
            Flight::new(3, "2026-02-12", "Mavic 3", 30, FlightStatus::completed()),
            Flight::new(4, "2026-02-13", "Avata", 12, FlightStatus::new("grounded")),
            Flight::new(5, "2026-02-14", "mavic 3", 8, FlightStatus::completed()),
        ]
    }

    fn loaded(flights: Vec<Flight>) -> FlightStore {
        let mut store = FlightStore::new();
        store.install(flights).unwrap();
        store
    }

    fn limit(n: usize) -> Option<NonZeroUsize> {
        NonZeroUsize::new(n)
    }

    #[test]
    fn summary_of_two_sample_flights() {
        let summary = summarize(&flights()[..2]).unwrap();
        assert_eq!(
            summary,
            FlightSummary {
                total_flights: 2,
                total_minutes: 67,
                average_minutes: 34,
                distinct_drones: 2,
            }
        );
        let values: Vec<_> = summary.tiles().into_iter().map(|t| t.value).collect();
        assert_eq!(values, vec!["2", "1.1 h", "2", "34 min"]);
    }

    #[test]
    fn summary_tile_labels() {
        let labels: Vec<_> = summarize(&flights())
            .unwrap()
            .tiles()
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(
            labels,
            vec!["Total Flights", "Flight Time", "Active Drones", "Avg. Duration"]
        );
    }

    #[test]
    fn summary_counts_drones_case_sensitively() {
        // "Mavic 3" twice, "mavic 3" once.
        assert_eq!(summarize(&flights()).unwrap().distinct_drones, 4);
    }

    #[test]
    fn summary_of_empty_is_none() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn average_rounds_half_up() {
        let one_and_two = vec![
            Flight::new(1, "d", "a", 1, FlightStatus::completed()),
            Flight::new(2, "d", "a", 2, FlightStatus::completed()),
        ];
        assert_eq!(summarize(&one_and_two).unwrap().average_minutes, 2);

        let negative_half = vec![
            Flight::new(1, "d", "a", -1, FlightStatus::completed()),
            Flight::new(2, "d", "a", -2, FlightStatus::completed()),
        ];
        // -1.5 rounds toward +inf.
        assert_eq!(summarize(&negative_half).unwrap().average_minutes, -1);
    }

    #[test]
    fn list_all_unlimited_keeps_everything_in_order() {
        let store = loaded(flights());
        let view = render_list(&store, &Filter::All, None);
        let ids: Vec<u64> = view.rows().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn list_rows_carry_display_text() {
        let store = loaded(flights());
        let view = render_list(&store, &Filter::parse("grounded"), None);
        assert_eq!(
            view.rows(),
            &[FlightRow {
                id: FlightId(4),
                date: "2026-02-13".into(),
                drone: "Avata".into(),
                duration: "12 min".into(),
                status: "grounded".into(),
            }]
        );
    }

    #[test]
    fn list_filter_then_limit() {
        let store = loaded(flights());
        let view = render_list(&store, &Filter::parse("completed"), limit(2));
        let ids: Vec<u64> = view.rows().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn zero_limit_means_unlimited() {
        let store = loaded(flights());
        assert_eq!(render_list(&store, &Filter::All, limit(0)).rows().len(), 5);
    }

    #[test]
    fn loading_overrides_everything() {
        let mut store = FlightStore::new();
        store.append(flights().remove(0));
        for filter in [Filter::All, Filter::parse("completed"), Filter::parse("none")] {
            for lim in [None, limit(1)] {
                assert_eq!(render_list(&store, &filter, lim), FlightListView::Loading);
            }
        }
    }

    #[test]
    fn empty_result_is_distinct_from_loading() {
        let store = loaded(flights());
        let view = render_list(&store, &Filter::parse("crashed"), None);
        assert_eq!(view, FlightListView::Empty);
        assert_eq!(view.placeholder(), Some(EMPTY_PLACEHOLDER));
        assert_ne!(view.placeholder(), FlightListView::Loading.placeholder());

        let empty = loaded(Vec::new());
        assert_eq!(render_list(&empty, &Filter::All, None), FlightListView::Empty);
    }

    #[test]
    fn build_marks_exactly_one_filter_and_page() {
        let mut model = Model::new();
        model.store.install(flights()).unwrap();
        model.active_filter = Filter::parse("in-air");

        let options = vec![
            FilterOption::new(Filter::All, "All"),
            FilterOption::new(Filter::parse("completed"), "Completed"),
            FilterOption::new(Filter::parse("in-air"), "In Air"),
        ];
        let view = build(&model, &Pages::default(), &options, limit(3));

        let selected: Vec<_> = view.filters.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].token, "in-air");

        let active: Vec<_> = view.pages.iter().filter(|p| p.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "dashboard");
        assert_eq!(view.fragment, "dashboard");

        assert_eq!(view.recent_flights.rows().len(), 3);
        assert_eq!(view.flights.rows().len(), 1);
        assert!(view.summary.is_some());
    }

    #[test]
    fn build_is_idempotent() {
        let mut model = Model::new();
        model.store.install(flights()).unwrap();
        let pages = Pages::default();
        let first = build(&model, &pages, &[], limit(3));
        let second = build(&model, &pages, &[], limit(3));
        assert_eq!(first, second);
    }

    fn arb_flights() -> impl Strategy<Value = Vec<Flight>> {
        let status = prop_oneof![
            Just(FlightStatus::completed()),
            Just(FlightStatus::in_air()),
            "[a-z]{1,6}".prop_map(FlightStatus::new),
        ];
        prop::collection::vec(("[A-Za-z ]{0,6}", 1i64..600, status), 0..40).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (drone, duration, status))| {
                    Flight::new(i as u64 + 1, "2026-01-01", drone, duration, status)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_summary_totals(flights in arb_flights()) {
            match summarize(&flights) {
                None => prop_assert!(flights.is_empty()),
                Some(summary) => {
                    let total: i64 = flights.iter().map(|f| f.duration).sum();
                    prop_assert_eq!(summary.total_minutes, total);
                    prop_assert_eq!(summary.total_flights, flights.len());
                    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                    let expected = (total as f64 / flights.len() as f64 + 0.5).floor() as i64;
                    prop_assert_eq!(summary.average_minutes, expected);
                }
            }
        }

        #[test]
        fn prop_distinct_drones_match_sort_dedup(flights in arb_flights()) {
            let mut labels: Vec<&str> = flights.iter().map(|f| f.drone.as_str()).collect();
            labels.sort_unstable();
            labels.dedup();
            let counted = summarize(&flights).map_or(0, |s| s.distinct_drones);
            prop_assert_eq!(counted, labels.len());
        }

        #[test]
        fn prop_status_filter_is_exact_subset(flights in arb_flights(), pick in 0usize..3) {
            let token = ["completed", "in-air", "abc"][pick];
            let filter = Filter::parse(token);
            let store = loaded(flights.clone());
            let expected: Vec<FlightId> = flights
                .iter()
                .filter(|f| f.status.as_str() == token)
                .map(|f| f.id)
                .collect();
            let got: Vec<FlightId> = render_list(&store, &filter, None)
                .rows()
                .iter()
                .map(|r| r.id)
                .collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn prop_limit_keeps_leading_items(flights in arb_flights(), n in 1usize..10) {
            let resolved = resolve_flights(&flights, &Filter::All, NonZeroUsize::new(n));
            prop_assert!(resolved.len() <= n);
            let expected: Vec<&Flight> = flights.iter().take(n).collect();
            prop_assert_eq!(resolved, expected);
        }
    }
}
