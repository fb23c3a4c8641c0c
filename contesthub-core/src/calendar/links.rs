//! Deep links into the Google and Outlook web calendars.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use super::{compact_utc, details, iso_millis};
use crate::contest::Contest;
use crate::error::{ContestHubError, ContestHubResult};

/// Characters left alone by `encodeURIComponent`, minus `'`, which URL
/// parsers escape inside `https` query strings anyway.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query parameter value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn google_url(contest: &Contest) -> ContestHubResult<Url> {
    let url = format!(
        "https://calendar.google.com/calendar/r/eventedit?text={}&dates={}/{}&details={}&location=Online&sf=true&output=xml",
        encode_component(&contest.display_name()),
        compact_utc(contest.start_time),
        compact_utc(contest.end_time()),
        encode_component(&details(contest)),
    );
    parse(&url)
}

pub fn outlook_url(contest: &Contest) -> ContestHubResult<Url> {
    let url = format!(
        "https://outlook.live.com/calendar/0/deeplink/compose?subject={}&startdt={}&enddt={}&body={}&location=Online",
        encode_component(&contest.display_name()),
        iso_millis(contest.start_time),
        iso_millis(contest.end_time()),
        encode_component(&details(contest)),
    );
    parse(&url)
}

fn parse(url: &str) -> ContestHubResult<Url> {
    Url::parse(url).map_err(|e| ContestHubError::Serialization(format!("Invalid calendar URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::ContestId;
    use crate::platform::Platform;
    use chrono::{TimeZone, Utc};

    fn make_test_contest() -> Contest {
        Contest {
            id: ContestId::from("999"),
            platform: Platform::Codeforces,
            title: "Round 999".to_string(),
            url: "https://codeforces.com/contest/999".to_string(),
            start_time: Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap(),
            duration_secs: 5400,
        }
    }

    #[test]
    fn test_encode_component_matches_browser_encoding() {
        assert_eq!(encode_component("Codeforces - Round 999"), "Codeforces%20-%20Round%20999");
        assert_eq!(
            encode_component("Find more info at https://x.y/a?b=c&d"),
            "Find%20more%20info%20at%20https%3A%2F%2Fx.y%2Fa%3Fb%3Dc%26d"
        );
        assert_eq!(encode_component("(Div. 2)!*~_"), "(Div.%202)!*~_");
        assert_eq!(encode_component("Ünïcode"), "%C3%9Cn%C3%AFcode");
    }

    #[test]
    fn test_google_url_is_exact() {
        let url = google_url(&make_test_contest()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://calendar.google.com/calendar/r/eventedit\
             ?text=Codeforces%20-%20Round%20999\
             &dates=20250110T100000Z/20250110T113000Z\
             &details=Find%20more%20info%20at%20https%3A%2F%2Fcodeforces.com%2Fcontest%2F999\
             &location=Online&sf=true&output=xml"
        );
    }

    #[test]
    fn test_outlook_url_is_exact() {
        let url = outlook_url(&make_test_contest()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://outlook.live.com/calendar/0/deeplink/compose\
             ?subject=Codeforces%20-%20Round%20999\
             &startdt=2025-01-10T10:00:00.000Z\
             &enddt=2025-01-10T11:30:00.000Z\
             &body=Find%20more%20info%20at%20https%3A%2F%2Fcodeforces.com%2Fcontest%2F999\
             &location=Online"
        );
    }

    #[test]
    fn test_apostrophes_survive_url_parsing() {
        let mut contest = make_test_contest();
        contest.title = "Hello '25 & more".to_string();

        let url = google_url(&contest).unwrap();
        assert!(
            url.as_str().contains("text=Codeforces%20-%20Hello%20%2725%20%26%20more&"),
            "Got {}",
            url
        );
    }
}
