//! Plain-text rendering of sessions for the terminal.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::services::agenda::conflicts::sorted_for_popup;
use crate::services::agenda::AgendaStats;
use crate::services::source::SourceKind;
use crate::session::AgendaSession;
use crate::views::utils::{format_amount, format_event_detail, format_event_row, format_short_date};
use crate::views::AgendaList;

pub fn header(session: &AgendaSession) -> String {
    let origin = match session.origin() {
        Some(SourceKind::Remote) => "live data",
        Some(SourceKind::Demo) => "demo data",
        None => "no data",
    };
    format!(
        "Agenda · {} · {} · filter: {}\n\n",
        format_short_date(session.today()),
        origin,
        session.filter().summary()
    )
}

pub fn week(session: &AgendaSession) -> String {
    let grid = session.week_grid();
    let view = session.view();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Week of {} to {}",
        format_short_date(grid.dates[0]),
        format_short_date(grid.dates[6])
    );

    for (day_index, date) in grid.dates.iter().enumerate() {
        let count = view.events_on(*date).len();
        let marker = if view.is_multiple(*date) {
            format!("  ({} events)", count)
        } else {
            String::new()
        };
        let _ = writeln!(out, "\n{}{}", format_short_date(*date), marker);

        for event in &grid.all_day[day_index] {
            let _ = writeln!(out, "  {}", format_event_row(event));
        }
        for hour in grid.hours.clone() {
            for block in grid.cell(day_index, hour) {
                let indent = "  ".repeat(block.stack_index + 1);
                let _ = writeln!(out, "{}{:02}h {}", indent, hour, format_event_row(block.event));
            }
        }
    }

    if !grid.out_of_range.is_empty() {
        let _ = writeln!(
            out,
            "\n{} event(s) outside {:02}:00-{:02}:00 not shown on the grid",
            grid.out_of_range.len(),
            grid.hours.start,
            grid.hours.end
        );
    }
    out
}

pub fn list(session: &AgendaSession) -> String {
    let mut out = String::new();
    match session.list() {
        AgendaList::Empty { message, hint } => {
            let _ = writeln!(out, "{}\n{}", message, hint);
        }
        AgendaList::Days(sections) => {
            for section in sections {
                let _ = writeln!(out, "{}", format_short_date(section.date));
                for event in &section.events {
                    let _ = writeln!(out, "  {}", format_event_row(event));
                }
                out.push('\n');
            }
        }
    }
    out
}

pub fn day(session: &AgendaSession, date: NaiveDate) -> String {
    let view = session.view();
    let events = sorted_for_popup(view.events_on(date));
    if events.is_empty() {
        return format!("No events on {}\n", format_short_date(date));
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} · {} event(s)\n", format_short_date(date), events.len());
    for event in &events {
        let _ = writeln!(out, "{}\n", format_event_detail(event));
    }
    out
}

pub fn stats(stats: &AgendaStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total: {}", stats.total);
    let _ = writeln!(out, "Today: {}", stats.today);
    let _ = writeln!(out, "This week: {}", stats.this_week);
    let _ = writeln!(out, "Pending: {}", stats.pending);
    let _ = writeln!(out, "Upcoming: {}  Past: {}", stats.upcoming, stats.past);
    let _ = writeln!(out, "Amount: {}", format_amount(stats.total_amount));

    if !stats.by_type.is_empty() {
        out.push_str("\nBy type\n");
        for (kind, count) in &stats.by_type {
            let _ = writeln!(out, "  {} {:<18} {}", kind.icon(), kind.label(), count);
        }
    }
    if !stats.by_status.is_empty() {
        out.push_str("\nBy status\n");
        for (status, count) in &stats.by_status {
            let _ = writeln!(out, "  {:<20} {}", status.label(), count);
        }
    }
    out
}
