//! "Add to calendar" artifacts for a contest.
//!
//! Google and Outlook get a deep link that pre-fills their event editor;
//! Apple gets a downloadable .ics file. Generation is pure: opening the link
//! or saving the file is the caller's business.

mod ics;
mod links;

pub use ics::generate_ics;
pub use links::{encode_component, google_url, outlook_url};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use crate::contest::Contest;
use crate::error::{ContestHubError, ContestHubResult};

pub const ICS_MIME_TYPE: &str = "text/calendar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    Outlook,
    Apple,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Google => write!(f, "Google"),
            Provider::Outlook => write!(f, "Outlook"),
            Provider::Apple => write!(f, "Apple"),
        }
    }
}

impl FromStr for Provider {
    type Err = ContestHubError;

    fn from_str(s: &str) -> ContestHubResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "outlook" => Ok(Provider::Outlook),
            "apple" => Ok(Provider::Apple),
            _ => Err(ContestHubError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// A calendar file ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarArtifact {
    /// Open in a new browser tab.
    Url(Url),
    /// Offer as a client-side download.
    File(IcsFile),
}

/// Build the artifact for `provider`.
pub fn generate(contest: &Contest, provider: Provider) -> ContestHubResult<CalendarArtifact> {
    match provider {
        Provider::Google => Ok(CalendarArtifact::Url(google_url(contest)?)),
        Provider::Outlook => Ok(CalendarArtifact::Url(outlook_url(contest)?)),
        Provider::Apple => Ok(CalendarArtifact::File(IcsFile {
            filename: ics_filename(contest),
            mime_type: ICS_MIME_TYPE,
            content: generate_ics(contest)?,
        })),
    }
}

/// Like [`generate`], for a provider given by name. Unknown names fail with
/// `UnsupportedProvider` and produce nothing.
pub fn generate_for(contest: &Contest, provider: &str) -> ContestHubResult<CalendarArtifact> {
    generate(contest, provider.parse()?)
}

/// `YYYYMMDDTHHMMSSZ`, shared by every provider's date fields.
pub fn compact_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// "<platform> contest - <title>.ics"
pub fn ics_filename(contest: &Contest) -> String {
    format!("{} contest - {}.ics", contest.platform, contest.title)
}

fn details(contest: &Contest) -> String {
    format!("Find more info at {}", contest.url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::ContestId;
    use crate::platform::Platform;
    use chrono::TimeZone;

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
    fn test_compact_utc_has_no_separators() {
        let contest = make_test_contest();
        assert_eq!(compact_utc(contest.start_time), "20250110T100000Z");
        assert_eq!(compact_utc(contest.end_time()), "20250110T113000Z");
    }

    #[test]
    fn test_iso_millis() {
        let contest = make_test_contest();
        assert_eq!(iso_millis(contest.start_time), "2025-01-10T10:00:00.000Z");
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("Google".parse::<Provider>().unwrap(), Provider::Google);
        assert_eq!("outlook".parse::<Provider>().unwrap(), Provider::Outlook);
        assert_eq!("APPLE".parse::<Provider>().unwrap(), Provider::Apple);
    }

    #[test]
    fn test_unknown_provider_produces_no_artifact() {
        let err = generate_for(&make_test_contest(), "yahoo").unwrap_err();
        assert!(
            matches!(err, ContestHubError::UnsupportedProvider(ref name) if name == "yahoo"),
            "Expected UnsupportedProvider, got {:?}",
            err
        );
    }

    #[test]
    fn test_google_artifact_is_url() {
        let artifact = generate(&make_test_contest(), Provider::Google).unwrap();
        let CalendarArtifact::Url(url) = artifact else {
            panic!("Expected a URL, got {:?}", artifact);
        };
        assert!(url.as_str().contains("dates=20250110T100000Z/20250110T113000Z"));
    }

    #[test]
    fn test_apple_artifact_is_ics_file() {
        let artifact = generate_for(&make_test_contest(), "apple").unwrap();
        let CalendarArtifact::File(file) = artifact else {
            panic!("Expected a file, got {:?}", artifact);
        };

        assert_eq!(file.filename, "Codeforces contest - Round 999.ics");
        assert_eq!(file.mime_type, "text/calendar");
        assert!(file.content.contains("DTSTART:20250110T100000Z"));
        assert!(file.content.contains("DTEND:20250110T113000Z"));
    }
}
