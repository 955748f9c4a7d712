//! Static HTML rendition of the dashboard.

use std::fmt::Write as _;

use skylog_shared::render::{ListContainer, RenderTarget};
use skylog_shared::view::{FilterChip, FlightListView, PageTab, StatTile};
use skylog_shared::{Feedback, FeedbackKind, FlightForm, FlightStatus, Theme};

/// Keeps the latest content of every container; [`HtmlTarget::document`]
/// stitches them into a page.
#[derive(Debug, Default)]
pub struct HtmlTarget {
    stats: String,
    recent: String,
    flights: String,
    filters: String,
    nav: String,
    pages: Vec<PageTab>,
    fragment: String,
    dark: bool,
    toggle_checked: bool,
    menu_open: bool,
    draft: FlightForm,
    feedback: String,
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn active(flag: bool) -> &'static str {
    if flag {
        " active"
    } else {
        ""
    }
}

fn flight_list(list: &FlightListView) -> String {
    if let Some(placeholder) = list.placeholder() {
        return format!("<div class=\"loading\">{}</div>", escape(placeholder));
    }
    let mut html = String::new();
    for row in list.rows() {
        let _ = write!(
            html,
            "<div class=\"flight-item\"><div class=\"flight-info\">\
             <span class=\"flight-date\">{date}</span>\
             <span class=\"flight-drone\">{drone}</span></div>\
             <span class=\"flight-duration\">{duration}</span>\
             <span class=\"status {status}\">{status}</span></div>",
            date = escape(&row.date),
            drone = escape(&row.drone),
            duration = escape(&row.duration),
            status = escape(&row.status),
        );
    }
    html
}

impl RenderTarget for HtmlTarget {
    fn summary(&mut self, tiles: &[StatTile]) {
        self.stats.clear();
        for tile in tiles {
            let _ = write!(
                self.stats,
                "<div class=\"stat-card\"><h3>{}</h3><p>{}</p></div>",
                escape(&tile.label),
                escape(&tile.value)
            );
        }
    }

    fn flight_list(&mut self, container: ListContainer, list: &FlightListView) {
        let html = flight_list(list);
        match container {
            ListContainer::RecentFlights => self.recent = html,
            ListContainer::Flights => self.flights = html,
        }
    }

    fn filters(&mut self, chips: &[FilterChip]) {
        self.filters.clear();
        for chip in chips {
            let _ = write!(
                self.filters,
                "<button class=\"filter-btn{}\" data-filter=\"{}\">{}</button>",
                active(chip.selected),
                escape(&chip.token),
                escape(&chip.label)
            );
        }
    }

    fn pages(&mut self, tabs: &[PageTab], fragment: &str) {
        self.nav.clear();
        for tab in tabs {
            let id = escape(&tab.id);
            let _ = write!(
                self.nav,
                "<a href=\"#{id}\" class=\"nav-link{}\" data-page=\"{id}\">{id}</a>",
                active(tab.active)
            );
        }
        self.pages = tabs.to_vec();
        self.fragment = fragment.to_string();
    }

    fn theme(&mut self, theme: Theme, toggle_checked: bool) {
        self.dark = theme.is_dark();
        self.toggle_checked = toggle_checked;
    }

    fn menu(&mut self, open: bool) {
        self.menu_open = open;
    }

    fn form(&mut self, draft: &FlightForm) {
        self.draft = draft.clone();
    }

    fn feedback(&mut self, feedback: Option<&Feedback>) {
        self.feedback = match feedback {
            Some(feedback) => {
                let class = match feedback.kind {
                    FeedbackKind::Success => "success",
                    FeedbackKind::Error => "error",
                };
                format!(
                    "<p id=\"formMessage\" class=\"{class}\">{}</p>",
                    escape(&feedback.message)
                )
            }
            None => "<p id=\"formMessage\"></p>".to_string(),
        };
    }
}

impl HtmlTarget {
    /// Address the document would be shown at.
    pub fn location(&self) -> String {
        format!("#{}", self.fragment)
    }

    pub fn document(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Skylog</title></head>\n");
        let _ = writeln!(
            html,
            "<body{}>",
            if self.dark { " class=\"dark\"" } else { "" }
        );
        let _ = writeln!(
            html,
            "<nav><button class=\"hamburger\">&#9776;</button><div class=\"nav-menu{}\">{}</div></nav>",
            active(self.menu_open),
            self.nav
        );
        html.push_str("<main>\n");
        for tab in &self.pages {
            let _ = writeln!(
                html,
                "<section id=\"{}\" class=\"page{}\">{}</section>",
                escape(&tab.id),
                active(tab.active),
                self.page_body(&tab.id)
            );
        }
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    fn page_body(&self, id: &str) -> String {
        match id {
            "dashboard" => format!(
                "<div id=\"statsGrid\" class=\"stats-grid\">{}</div><div id=\"{}\">{}</div>",
                self.stats,
                ListContainer::RecentFlights.element_id(),
                self.recent
            ),
            "flights" => format!(
                "<div class=\"filters\">{}</div><div id=\"{}\">{}</div>",
                self.filters,
                ListContainer::Flights.element_id(),
                self.flights
            ),
            "add-flight" => format!(
                "<form id=\"flightForm\">\
                 <input name=\"drone\" type=\"text\" value=\"{drone}\">\
                 <input name=\"date\" type=\"date\" value=\"{date}\">\
                 <input name=\"duration\" type=\"number\" value=\"{duration}\">\
                 <select name=\"status\">{options}</select>\
                 <button type=\"submit\">Add</button></form>{feedback}",
                drone = escape(&self.draft.drone),
                date = escape(&self.draft.date),
                duration = escape(&self.draft.duration),
                options = self.status_options(),
                feedback = self.feedback
            ),
            "settings" => format!(
                "<label><input id=\"darkModeToggle\" type=\"checkbox\"{}> Dark mode</label>",
                if self.toggle_checked { " checked" } else { "" }
            ),
            _ => String::new(),
        }
    }

    /// The two offered statuses, plus the draft's own tag when it is neither.
    fn status_options(&self) -> String {
        let current = self.draft.status.as_str();
        let mut options = vec![
            (FlightStatus::COMPLETED, "Completed"),
            (FlightStatus::IN_AIR, "In Air"),
        ];
        if !options.iter().any(|(value, _)| *value == current) {
            options.push((current, current));
        }

        let mut html = String::new();
        for (value, label) in options {
            let _ = write!(
                html,
                "<option value=\"{}\"{}>{}</option>",
                escape(value),
                if value == current { " selected" } else { "" },
                escape(label)
            );
        }
        html
    }
}
