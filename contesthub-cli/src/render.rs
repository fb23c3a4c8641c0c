//! Terminal rendering for contests and lifecycle states.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use contesthub_core::Contest;
use contesthub_core::lifecycle::{LifecycleState, Status};
use contesthub_core::time_utils::format_duration;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Status {
    fn render(&self) -> String {
        let label = format!("{:<9}", self.to_string());
        match self {
            Status::Upcoming => label.green().to_string(),
            Status::Ongoing => label.yellow().to_string(),
            Status::Completed => label.red().to_string(),
        }
    }
}

impl Render for LifecycleState {
    /// Status badge plus countdown; the countdown is hidden once Completed.
    fn render(&self) -> String {
        match self.status {
            Status::Completed => format!("{} {:>11}", self.status.render(), ""),
            _ => format!(
                "{} {:>11}",
                self.status.render(),
                format_duration(self.countdown_secs, true).dimmed()
            ),
        }
    }
}

/// One contest as a three-line block.
pub fn render_contest(contest: &Contest, state: &LifecycleState) -> String {
    let when = format!(
        "{} · {}",
        format_start(contest.start_time),
        format_duration(contest.duration_secs, false)
    );
    let id = format!("[{}]", contest.id);

    format!(
        "{} {} {}\n{:>23}{}\n{:>23}{} {}",
        state.render(),
        contest.platform.to_string().bold(),
        contest.title,
        "",
        contest.url.blue().underline(),
        "",
        when.dimmed(),
        id.dimmed()
    )
}

/// Start instant in the local time zone, e.g. "Fri, Jan 10 2025 10:00".
pub fn format_start(instant: DateTime<Utc>) -> String {
    format_start_in(instant, &Local)
}

pub fn format_start_in<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant
        .with_timezone(tz)
        .format("%a, %b %-d %Y %H:%M")
        .to_string()
}
