use std::num::NonZeroUsize;

use crate::capabilities::{Capabilities, HttpResult, KvResult, ResourcePath};
use crate::event::{ClickTarget, Event};
use crate::form::{Feedback, FlightForm, FLIGHT_ADDED_MESSAGE};
use crate::loader;
use crate::model::{Filter, Flight, Model};
use crate::navigation::{fragment_token, Pages};
use crate::theme::Theme;
use crate::view::{self, FilterOption, ViewModel};

/// Static wiring of the dashboard: where data lives, which pages and filters
/// exist, and the fallback fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub flights_path: String,
    pub theme_key: String,
    pub pages: Pages,
    pub filters: Vec<FilterOption>,
    pub recent_limit: Option<NonZeroUsize>,
    pub fallback_flights: Vec<Flight>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flights_path: crate::FLIGHTS_PATH.to_string(),
            theme_key: crate::THEME_KEY.to_string(),
            pages: Pages::default(),
            filters: vec![
                FilterOption::new(Filter::All, "All"),
                FilterOption::new(Filter::parse("completed"), "Completed"),
                FilterOption::new(Filter::parse("in-air"), "In Air"),
            ],
            recent_limit: NonZeroUsize::new(crate::RECENT_FLIGHTS_LIMIT),
            fallback_flights: loader::fallback_flights(),
        }
    }
}

#[derive(Debug, Default)]
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let _span = tracing::debug_span!("update", event = event.name()).entered();
        if event.is_user_initiated() {
            tracing::debug!("user action");
        }

        match event {
            Event::AppStarted {
                fragment,
                prefers_dark,
            } => self.start(&fragment, prefers_dark, model, caps),

            Event::NavigateTo { page } => {
                self.config.pages.activate(&mut model.active_page, &page);
                model.menu_open = false;
                caps.render.render();
            }

            Event::FragmentChanged { fragment } => {
                let changed = self.config.pages.activate(&mut model.active_page, &fragment);
                // An unknown or stale fragment still needs a render so the
                // shell rewrites the address to the active page.
                if changed || fragment_token(&fragment) != model.active_page.as_str() {
                    caps.render.render();
                }
            }

            Event::MenuToggled => {
                model.menu_open = !model.menu_open;
                caps.render.render();
            }

            Event::PointerClicked { target } => {
                if target == ClickTarget::Elsewhere && model.menu_open {
                    model.menu_open = false;
                    caps.render.render();
                }
            }

            Event::FilterSelected { filter } => {
                model.active_filter = Filter::parse(&filter);
                caps.render.render();
            }

            Event::FormFieldEdited { field, value } => {
                model.form.set(field, value);
            }

            Event::FormSubmitted => Self::submit_form(model, caps),

            Event::ThemeToggled { dark } => self.apply_theme(Theme::from_dark(dark), model, caps),

            Event::FlightsLoaded(result) => self.install_flights(*result, model, caps),

            Event::ThemeRestored(result) => {
                let stored = Self::stored_theme(*result);
                self.apply_theme(Theme::resolve(stored, model.prefers_dark), model, caps);
            }

            Event::ThemePersisted(result) => {
                if let Err(error) = *result {
                    tracing::warn!(%error, "could not persist theme preference");
                }
            }
        }
    }

    /// Full refresh.
    fn view(&self, model: &Model) -> ViewModel {
        view::build(
            model,
            &self.config.pages,
            &self.config.filters,
            self.config.recent_limit,
        )
    }
}

impl App {
    fn start(&self, fragment: &str, prefers_dark: bool, model: &mut Model, caps: &Capabilities) {
        if model.load_requested {
            tracing::warn!("startup already handled, not loading flights again");
            return;
        }
        model.load_requested = true;
        model.prefers_dark = prefers_dark;
        self.config.pages.activate(&mut model.active_page, fragment);

        // First paint shows the loading placeholders.
        caps.render.render();

        match ResourcePath::new(self.config.flights_path.clone()) {
            Ok(path) => caps
                .http
                .get(path, |result| Event::FlightsLoaded(Box::new(result))),
            Err(error) => self.install_flights(Err(error), model, caps),
        }

        caps.kv.get(self.config.theme_key.clone(), |result| {
            Event::ThemeRestored(Box::new(result))
        });
    }

    fn install_flights(&self, result: HttpResult, model: &mut Model, caps: &Capabilities) {
        if !model.store.is_loading() {
            tracing::warn!("flights already installed, ignoring late response");
            return;
        }

        let flights = loader::flights_or_fallback(result, &self.config.fallback_flights);
        if let Err(error) = model.store.install(flights) {
            tracing::warn!(%error, "flight store rejected install");
        }
        caps.render.render();
    }

    fn stored_theme(result: KvResult) -> Option<Theme> {
        match result {
            Ok(Some(bytes)) => {
                let theme = Theme::from_stored(&bytes);
                if theme.is_none() {
                    tracing::debug!("ignoring unrecognised stored theme");
                }
                theme
            }
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "could not read theme preference");
                None
            }
        }
    }

    /// Mark, sync and persist: the view carries the marker and toggle state,
    /// the preference store gets the token.
    fn apply_theme(&self, theme: Theme, model: &mut Model, caps: &Capabilities) {
        model.theme = theme;
        caps.kv.set(
            self.config.theme_key.clone(),
            theme.as_token().as_bytes().to_vec(),
            |result| Event::ThemePersisted(Box::new(result)),
        );
        caps.render.render();
    }

    fn submit_form(model: &mut Model, caps: &Capabilities) {
        match model.form.validate() {
            Ok(new_flight) => {
                let id = model.store.next_id();
                model.store.append(new_flight.into_flight(id));
                tracing::info!(%id, "flight added");
                model.feedback = Some(Feedback::success(FLIGHT_ADDED_MESSAGE));
                model.form = FlightForm::default();
            }
            Err(error) => {
                tracing::debug!(%error, "form rejected");
                model.feedback = Some(Feedback::error(error));
            }
        }
        caps.render.render();
    }
}
