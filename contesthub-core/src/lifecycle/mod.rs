//! Contest lifecycle: Upcoming -> Ongoing -> Completed.
//!
//! Status and countdown are always derived from absolute time, so a tick that
//! arrives late (or a laptop that wakes from sleep) lands on the right status
//! instead of drifting. The only state an engine carries between ticks is the
//! current status, which never moves backwards, and whether the start
//! reminder has fired.

mod clock;
mod task;

pub use clock::{Clock, SystemClock, TokioClock};
pub use task::{EngineEvent, EngineHandle, TICK_PERIOD, spawn_engine};

use std::fmt;

use chrono::{DateTime, Utc};

use crate::contest::Contest;
use crate::time_utils::seconds_until;

/// Seconds before start at which the reminder fires.
pub const REMINDER_LEAD_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Upcoming,
    Ongoing,
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Upcoming => write!(f, "Upcoming"),
            Status::Ongoing => write!(f, "Ongoing"),
            Status::Completed => write!(f, "Completed"),
        }
    }
}

/// Snapshot of one contest's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleState {
    pub status: Status,
    /// Seconds to start while Upcoming, seconds to end while Ongoing, 0 once Completed.
    pub countdown_secs: i64,
    pub reminder_fired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    StatusChanged { from: Status, to: Status },
    /// The contest starts in five minutes.
    Reminder { title: String },
}

/// Status and countdown for `now`. Start and end are both inclusive in Ongoing.
pub fn derive(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> (Status, i64) {
    if now < start {
        (Status::Upcoming, seconds_until(start, now))
    } else if now <= end {
        (Status::Ongoing, seconds_until(end, now))
    } else {
        (Status::Completed, 0)
    }
}

/// Lifecycle state machine for a single contest.
#[derive(Debug, Clone)]
pub struct LifecycleEngine {
    contest: Contest,
    state: LifecycleState,
    /// Set once the contest has been seen Upcoming outside the reminder
    /// window. A contest first seen inside the window never crosses it.
    reminder_armed: bool,
}

impl LifecycleEngine {
    pub fn new(contest: Contest, now: DateTime<Utc>) -> Self {
        let (status, countdown_secs) = derive(now, contest.start_time, contest.end_time());

        LifecycleEngine {
            contest,
            state: LifecycleState {
                status,
                countdown_secs,
                reminder_fired: false,
            },
            reminder_armed: status == Status::Upcoming && countdown_secs > REMINDER_LEAD_SECS,
        }
    }

    pub fn contest(&self) -> &Contest {
        &self.contest
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Completed is terminal; a finished engine ignores further ticks.
    pub fn is_finished(&self) -> bool {
        self.state.status == Status::Completed
    }

    /// Re-derive status and countdown for `now` and report what happened.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<LifecycleEvent> {
        if self.is_finished() {
            return Vec::new();
        }

        let start = self.contest.start_time;
        let end = self.contest.end_time();
        let previous = self.state.status;

        let (derived, _) = derive(now, start, end);
        let status = if derived < previous {
            tracing::warn!(
                contest = %self.contest.id,
                "Clock moved backwards ({} -> {}), keeping {}",
                previous,
                derived,
                previous
            );
            previous
        } else {
            derived
        };

        let countdown_secs = match status {
            Status::Upcoming => seconds_until(start, now),
            Status::Ongoing => seconds_until(end, now),
            Status::Completed => 0,
        };

        self.state.status = status;
        self.state.countdown_secs = countdown_secs;

        let mut events = Vec::new();

        if status != previous {
            tracing::info!(contest = %self.contest.id, "{} -> {}", previous, status);
            events.push(LifecycleEvent::StatusChanged {
                from: previous,
                to: status,
            });
        }

        if status == Status::Upcoming && !self.state.reminder_fired {
            if countdown_secs > REMINDER_LEAD_SECS {
                self.reminder_armed = true;
            } else if self.reminder_armed {
                self.state.reminder_fired = true;
                tracing::info!(contest = %self.contest.id, "Reminder: {} starts in {}s", self.contest.title, countdown_secs);
                events.push(LifecycleEvent::Reminder {
                    title: self.contest.title.clone(),
                });
            }
        }

        events
    }
}
