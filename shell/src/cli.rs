//! Command-line interface for the `skylog` binary.
//!
//! Each flag after startup becomes one or more core events, dispatched in a
//! fixed order: navigation, filter, theme, then form submissions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use skylog_shared::{Event, FormField};

use crate::logging::Verbosity;

/// skylog - render the drone flight-log dashboard
#[derive(Debug, Parser)]
#[command(name = "skylog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dashboard root: a directory or an http(s) base URL
    #[arg(short, long, env = "SKYLOG_ROOT", default_value = ".")]
    pub root: String,

    /// Preference file (defaults to the user data directory)
    #[arg(long, env = "SKYLOG_STATE", value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Address fragment at startup, e.g. `#flights`
    #[arg(long, default_value = "")]
    pub fragment: String,

    /// Report an OS-level dark colour scheme
    #[arg(long)]
    pub prefers_dark: bool,

    /// Navigate to a page after startup
    #[arg(long, value_name = "PAGE")]
    pub navigate: Option<String>,

    /// Select a flight filter (`all`, `completed`, `in-air`, ...)
    #[arg(long, value_name = "STATUS")]
    pub filter: Option<String>,

    /// Flip the dark-mode toggle
    #[arg(long, value_enum)]
    pub theme: Option<ThemeChoice>,

    /// Submit the add-flight form; repeatable
    #[arg(long = "add", value_name = "DRONE,DATE,DURATION[,STATUS]")]
    pub add: Vec<FlightEntry>,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
}

/// Raw form values; validation happens in the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightEntry {
    pub drone: String,
    pub date: String,
    pub duration: String,
    pub status: Option<String>,
}

impl FromStr for FlightEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        match parts.as_slice() {
            [drone, date, duration] => Ok(Self {
                drone: (*drone).to_string(),
                date: (*date).to_string(),
                duration: (*duration).to_string(),
                status: None,
            }),
            [drone, date, duration, status] => Ok(Self {
                drone: (*drone).to_string(),
                date: (*date).to_string(),
                duration: (*duration).to_string(),
                status: Some((*status).to_string()),
            }),
            _ => Err(format!(
                "expected DRONE,DATE,DURATION[,STATUS], got {} field(s)",
                parts.len()
            )),
        }
    }
}

impl FlightEntry {
    fn events(&self) -> Vec<Event> {
        let mut fields = vec![
            (FormField::Drone, self.drone.clone()),
            (FormField::Date, self.date.clone()),
            (FormField::Duration, self.duration.clone()),
        ];
        if let Some(status) = &self.status {
            fields.push((FormField::Status, status.clone()));
        }

        let mut events: Vec<Event> = fields
            .into_iter()
            .map(|(field, value)| Event::FormFieldEdited { field, value })
            .collect();
        events.push(Event::FormSubmitted);
        events
    }
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }

    pub fn startup(&self) -> Event {
        Event::AppStarted {
            fragment: self.fragment.clone(),
            prefers_dark: self.prefers_dark,
        }
    }

    /// Interactions to replay after startup.
    pub fn interactions(&self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(page) = &self.navigate {
            events.push(Event::NavigateTo { page: page.clone() });
        }
        if let Some(filter) = &self.filter {
            events.push(Event::FilterSelected {
                filter: filter.clone(),
            });
        }
        if let Some(theme) = self.theme {
            events.push(Event::ThemeToggled {
                dark: theme == ThemeChoice::Dark,
            });
        }
        for entry in &self.add {
            events.extend(entry.events());
        }
        events
    }
}
