//! Duration formatting and start-time comparison.

use std::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};

use crate::contest::Contest;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Ascending order by absolute start instant. Equal instants compare
/// `Equal`; callers that need input order preserved must sort stably.
pub fn compare_start_times(a: &Contest, b: &Contest) -> Ordering {
    a.start_time.cmp(&b.start_time)
}

/// Render a number of seconds for people.
///
/// With `compact` the output is countdown style (`"01:02:03"`, `"2d 01:02:03"`),
/// otherwise it spells out the non-zero units (`"1 hour 30 minutes"`).
/// Zero and negative inputs render the zero form of either style.
pub fn format_duration(seconds: i64, compact: bool) -> String {
    let seconds = seconds.max(0);
    let days = seconds / SECS_PER_DAY;
    let hours = (seconds % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = seconds % SECS_PER_MINUTE;

    if compact {
        let clock = format!("{:02}:{:02}:{:02}", hours, minutes, secs);
        return if days > 0 {
            format!("{}d {}", days, clock)
        } else {
            clock
        };
    }

    if seconds == 0 {
        return "0 seconds".to_string();
    }

    [(days, "day"), (hours, "hour"), (minutes, "minute"), (secs, "second")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" }))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole seconds in `delta`, rounded half away from zero.
pub fn round_seconds(delta: TimeDelta) -> i64 {
    let millis = delta.num_milliseconds();
    let whole = millis / 1000;
    let rem = millis % 1000;
    if rem >= 500 {
        whole + 1
    } else if rem <= -500 {
        whole - 1
    } else {
        whole
    }
}

/// Whole seconds from `now` until `instant` (negative once it has passed).
pub fn seconds_until(instant: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    round_seconds(instant - now)
}
