use chrono::NaiveDate;

use crate::models::event::Event;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// "Mon 10 Jun"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%a %d %b").to_string()
}

/// "Monday, June 10, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// Render an amount with two decimals and a euro sign
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} €", amount)
}

/// Cut `text` to `max_chars` characters, marking the cut with "...".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Multi-line detail text for an event.
/// Shows title, category, status, time, client, location, amount and a
/// description preview.
pub fn format_event_detail(event: &Event) -> String {
    let mut lines = Vec::new();

    lines.push(format!("📌 {}", event.title));
    lines.push(format!("{} {}", event.kind.icon(), event.kind.label()));
    lines.push(format!("● {}", event.status.label()));

    if event.is_all_day() {
        lines.push(format!("🕐 All day - {}", format_long_date(event.date)));
    } else {
        lines.push(format!(
            "🕐 {} ({})",
            event.time_label(),
            event.date.format("%A, %B %d")
        ));
    }

    if let Some(ref client) = event.client {
        let contact: Vec<&str> = [&client.name, &client.email, &client.phone]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|value| !value.trim().is_empty())
            .collect();
        if !contact.is_empty() {
            lines.push(format!("👤 {}", contact.join(", ")));
        }
    }

    if let Some(ref location) = event.location {
        if !location.is_empty() {
            lines.push(format!("📍 {}", location));
        }
    }

    if let Some(amount) = event.amount {
        lines.push(format!("💶 {}", format_amount(amount)));
    }

    if let Some(body) = event.body() {
        lines.push(format!(
            "\n📝 {}",
            truncate_chars(body, DESCRIPTION_PREVIEW_CHARS)
        ));
    }

    if !event.metadata.is_empty() {
        let keys: Vec<&str> = event.metadata.keys().map(String::as_str).collect();
        lines.push(format!("🏷️ {}", keys.join(", ")));
    }

    lines.join("\n")
}

/// One-line summary used by list and popup rows
pub fn format_event_row(event: &Event) -> String {
    format!(
        "{:<13} {} {} [{}]",
        event.time_label(),
        event.kind.icon(),
        event.title,
        event.status.label()
    )
}
