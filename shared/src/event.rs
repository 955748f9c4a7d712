use serde::{Deserialize, Serialize};

use crate::capabilities::{HttpResult, KvResult};
use crate::form::FormField;

/// Where a pointer event landed, relative to the navigation menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    Menu,
    MenuToggle,
    Elsewhere,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Lifecycle
    AppStarted {
        /// Address fragment at startup, with or without the leading `#`.
        fragment: String,
        /// OS-level dark colour scheme signal.
        prefers_dark: bool,
    },

    // Navigation
    NavigateTo {
        page: String,
    },
    FragmentChanged {
        fragment: String,
    },
    MenuToggled,
    PointerClicked {
        target: ClickTarget,
    },

    // Flights
    FilterSelected {
        filter: String,
    },
    FormFieldEdited {
        field: FormField,
        value: String,
    },
    FormSubmitted,

    // Theme
    ThemeToggled {
        dark: bool,
    },

    // Capability responses (boxed to keep the enum small)
    FlightsLoaded(Box<HttpResult>),
    ThemeRestored(Box<KvResult>),
    ThemePersisted(Box<KvResult>),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::AppStarted { .. } => "app_started",
            Event::NavigateTo { .. } => "navigate_to",
            Event::FragmentChanged { .. } => "fragment_changed",
            Event::MenuToggled => "menu_toggled",
            Event::PointerClicked { .. } => "pointer_clicked",
            Event::FilterSelected { .. } => "filter_selected",
            Event::FormFieldEdited { .. } => "form_field_edited",
            Event::FormSubmitted => "form_submitted",
            Event::ThemeToggled { .. } => "theme_toggled",
            Event::FlightsLoaded(_) => "flights_loaded",
            Event::ThemeRestored(_) => "theme_restored",
            Event::ThemePersisted(_) => "theme_persisted",
        }
    }

    pub fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Event::NavigateTo { .. }
                | Event::FragmentChanged { .. }
                | Event::MenuToggled
                | Event::PointerClicked { .. }
                | Event::FilterSelected { .. }
                | Event::FormFieldEdited { .. }
                | Event::FormSubmitted
                | Event::ThemeToggled { .. }
        )
    }
}
