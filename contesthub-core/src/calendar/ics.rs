//! Single-event .ics documents.

use icalendar::{Calendar, Component, EventLike};

use super::{compact_utc, details};
use crate::contest::Contest;
use crate::error::{ContestHubError, ContestHubResult};

/// Generate an iCalendar document holding one VEVENT for `contest`.
///
/// DTSTAMP is pinned to the contest start so that the same contest always
/// produces the same bytes.
pub fn generate_ics(contest: &Contest) -> ContestHubResult<String> {
    let start = compact_utc(contest.start_time);
    let end = compact_utc(contest.end_time());

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@contesthub", contest.id));
    ics_event.add_property("DTSTAMP", &start);
    ics_event.add_property("DTSTART", &start);
    ics_event.add_property("DTEND", &end);
    ics_event.summary(&contest.display_name());
    ics_event.description(&details(contest));
    ics_event.location("Online");

    let mut cal = Calendar::new();
    cal.push(ics_event.done());
    let cal = cal.done();

    let output = strip_ics_bloat(&cal.to_string());

    let vevents = output.lines().filter(|l| *l == "BEGIN:VEVENT").count();
    if vevents != 1 {
        return Err(ContestHubError::IcsGenerate(format!(
            "expected exactly one VEVENT, found {}",
            vevents
        )));
    }

    Ok(output)
}

/// Clean up the icalendar crate's output
/// - Replace PRODID with CONTESTHUB
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:CONTESTHUB\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
