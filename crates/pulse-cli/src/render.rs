//! Plain-text rendering of view state

use std::fmt::Write;

use chrono::{DateTime, Utc};

use pulse_core::display::{Trend, format_change, format_usd, time_ago};
use pulse_core::{DashboardState, InsightState, NewsState, Section, Transition};

/// One line for a transition's toast, if it has one
pub fn transition(transition: &Transition) -> Option<String> {
    transition.notification.as_ref().map(|note| {
        let marker = if note.is_error() { "✗" } else { "✓" };
        format!("{marker} {note}")
    })
}

fn heading(out: &mut String, section: Section) {
    let _ = writeln!(out, "\n== {} ==  ({})", section.title(), section.description());
}

pub fn dashboard(state: &DashboardState, now: DateTime<Utc>) -> String {
    let mut out = String::from("Welcome back!\nHere's your personalized crypto digest for today\n");

    heading(&mut out, Section::News);
    match &state.news {
        NewsState::Loading => out.push_str("  loading...\n"),
        NewsState::Failed => out.push_str("  (news unavailable)\n"),
        NewsState::Loaded(items) if items.is_empty() => out.push_str("  (no headlines)\n"),
        NewsState::Loaded(items) => {
            for item in items {
                let _ = writeln!(out, "  {}\n    {} • {}", item.title, item.kind, time_ago(item.published_at, now));
            }
        }
    }

    heading(&mut out, Section::Prices);
    if state.prices.loading {
        out.push_str("  loading...\n");
    } else if let Some(error) = &state.prices.error {
        let _ = writeln!(out, "  error: {error}");
    } else {
        for coin in &state.prices.coins {
            let _ = writeln!(
                out,
                "  {:<18} {:>16}  {} {}",
                coin.label(),
                format_usd(coin.price),
                Trend::of(coin.change_24h).arrow(),
                format_change(coin.change_24h),
            );
        }
    }

    heading(&mut out, Section::Ai);
    match &state.insight {
        InsightState::Pending => out.push_str("  loading...\n"),
        InsightState::Ready(text) => {
            let _ = writeln!(out, "  {text}");
        }
        InsightState::Unavailable => out.push_str("  (no insight today)\n"),
    }

    heading(&mut out, Section::Meme);
    let _ = writeln!(out, "  {}", state.meme_url);

    out
}
