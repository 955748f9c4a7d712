//! `skylog` - render the drone flight-log dashboard from the command line.
//!
//! Loads the flight collection, restores the theme preference, replays the
//! interactions given as flags, and prints the resulting HTML document.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

mod cli;
mod html;
mod kv_store;
mod logging;
mod runtime;
mod source;

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;
use crate::html::HtmlTarget;
use crate::kv_store::PreferenceFile;
use crate::logging::init_logging;
use crate::runtime::Runtime;
use crate::source::Source;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let source = Source::from_root(&cli.root)
        .with_context(|| format!("cannot use {} as dashboard root", cli.root))?;
    let state = cli
        .state
        .clone()
        .or_else(PreferenceFile::default_path)
        .context("no user data directory found, pass --state")?;
    tracing::debug!(root = %cli.root, state = %state.display(), "starting");

    let mut runtime = Runtime::new(
        source,
        PreferenceFile::new(state),
        HtmlTarget::default(),
    );

    runtime.dispatch(cli.startup()).await;
    for event in cli.interactions() {
        runtime.dispatch(event).await;
    }
    tracing::info!(
        location = %runtime.target().location(),
        listed = runtime.view().flights.rows().len(),
        renders = runtime.renders(),
        "dashboard rendered"
    );

    let document = runtime.target().document();
    match &cli.out {
        Some(path) => tokio::fs::write(path, document)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{document}"),
    }
    Ok(())
}
