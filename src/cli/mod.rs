//! Terminal front end: argument parsing and the command runner.

pub mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::event::{EventStatus, EventType};
use crate::models::filter::{DateWindow, FilterAction};
use crate::services::settings::SettingsService;
use crate::session::AgendaSession;
use crate::views::offset_weeks;

#[derive(Parser, Debug, Clone)]
#[command(name = "agenda", version, about = "Marketplace agenda in the terminal")]
pub struct Cli {
    /// Settings file (defaults to agenda.toml in the config directory)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Never contact the endpoint; show generated demo data
    #[arg(long = "demo", global = true)]
    pub demo: bool,

    /// Reference date used as "today" (YYYY-MM-DD)
    #[arg(long = "date", global = true)]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Event type tag, e.g. DEVIS
    #[arg(long = "type", global = true)]
    pub kind: Option<EventType>,

    /// Status tag, e.g. EN_ATTENTE
    #[arg(long = "status", global = true)]
    pub status: Option<EventStatus>,

    /// Date window tag, e.g. CETTE_SEMAINE
    #[arg(long = "window", global = true)]
    pub window: Option<DateWindow>,

    #[arg(long = "from", global = true)]
    pub from: Option<NaiveDate>,

    #[arg(long = "to", global = true)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn actions(&self) -> Vec<FilterAction> {
        let mut actions = Vec::new();
        if let Some(window) = self.window {
            actions.push(FilterAction::SetWindow(window));
        }
        if self.kind.is_some() {
            actions.push(FilterAction::SetType(self.kind));
        }
        if self.status.is_some() {
            actions.push(FilterAction::SetStatus(self.status));
        }
        if self.from.is_some() {
            actions.push(FilterAction::SetStart(self.from));
        }
        if self.to.is_some() {
            actions.push(FilterAction::SetEnd(self.to));
        }
        actions
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Hour grid for the week containing the reference date
    Week {
        /// Weeks to move from the reference week (negative goes back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Filtered events grouped by day
    List,
    /// Counters over the whole snapshot
    Stats,
    /// Every event of one day, as the popup would list them
    Day { date: NaiveDate },
}

/// Grace period on top of the HTTP timeout before giving up on a load
const LOAD_GRACE: Duration = Duration::from_secs(2);

pub fn run(cli: Cli) -> Result<String> {
    let service = match cli.config {
        Some(ref path) => SettingsService::new(path),
        None => SettingsService::from_default_location(),
    };
    let settings = service
        .get()
        .with_context(|| format!("Failed to load settings from {}", service.path().display()))?;
    let load_timeout = Duration::from_secs(settings.request_timeout_secs) + LOAD_GRACE;

    let mut session = AgendaSession::from_settings(settings, cli.demo, cli.date);
    session.mount();
    if !session.wait_for_load(load_timeout) {
        log::warn!("Agenda load did not finish in {:?}", load_timeout);
    }

    for action in cli.filters.actions() {
        session.dispatch_filter(action);
    }

    let output = match cli.command {
        Command::Week { offset } => {
            let anchor = offset_weeks(session.anchor(), offset)
                .ok_or_else(|| anyhow!("Week offset {} is out of range", offset))?;
            session.set_anchor(anchor);
            render::week(&session)
        }
        Command::List => render::list(&session),
        Command::Stats => render::stats(&session.stats()),
        Command::Day { date } => render::day(&session, date),
    };

    let mut text = render::header(&session);
    text.push_str(&output);

    for toast in session.drain_toasts() {
        eprintln!("{} {}", toast.level.icon(), toast.message);
    }
    session.unmount();
    Ok(text)
}
