//! Contest records as supplied by the contest feed.
//!
//! The feed is decoded leniently into [`RawContest`] and then validated into
//! [`Contest`]. Validation failures are collected per record so that one bad
//! entry never takes the whole list down with it.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ContestHubError, ContestHubResult};
use crate::platform::Platform;

/// Opaque contest identifier. Feeds use both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContestId(pub String);

impl fmt::Display for ContestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContestId {
    fn from(s: &str) -> Self {
        ContestId(s.to_string())
    }
}

/// A validated contest. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Contest {
    pub id: ContestId,
    pub platform: Platform,
    pub title: String,
    pub url: String,
    pub start_time: DateTime<Utc>,
    /// Length in seconds, never negative.
    pub duration_secs: i64,
}

impl Contest {
    /// Validated contests always have a representable end.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + TimeDelta::seconds(self.duration_secs)
    }

    /// "<platform> - <title>", the event name used by every calendar provider.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.platform, self.title)
    }
}

/// The wire shape of one contest record. Every field is optional so that
/// missing data surfaces as a validation error instead of a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContest {
    #[serde(default)]
    pub id: Value,
    pub platform: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration: Value,
}

impl RawContest {
    fn id_string(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl TryFrom<RawContest> for Contest {
    type Error = ContestHubError;

    fn try_from(raw: RawContest) -> ContestHubResult<Self> {
        let id = raw
            .id_string()
            .ok_or_else(|| ContestHubError::invalid_record("<unknown>", "missing id"))?;
        let invalid = |reason: String| ContestHubError::invalid_record(id.clone(), reason);

        let platform = match raw.platform.as_deref() {
            Some(name) => name.parse::<Platform>().map_err(invalid)?,
            None => return Err(invalid("missing platform".into())),
        };

        let start_time = match raw.start_time.as_deref() {
            Some(s) => parse_start_time(s)
                .ok_or_else(|| invalid(format!("unparseable start_time '{}'", s)))?,
            None => return Err(invalid("missing start_time".into())),
        };

        let duration_secs = parse_duration(&raw.duration).map_err(invalid)?;
        if TimeDelta::try_seconds(duration_secs)
            .and_then(|d| start_time.checked_add_signed(d))
            .is_none()
        {
            return Err(invalid(format!("duration {} ends out of range", duration_secs)));
        }

        Ok(Contest {
            id: ContestId(id),
            platform,
            title: raw.title.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            start_time,
            duration_secs,
        })
    }
}

/// Parse an absolute instant. RFC 3339 is tried first; an ISO 8601
/// date-time without an offset is taken as UTC.
pub fn parse_start_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_duration(value: &Value) -> Result<i64, String> {
    let secs = match value {
        Value::Null => return Err("missing duration".into()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
                _ => return Err(format!("duration must be whole seconds, got {}", n)),
            },
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("duration must be whole seconds, got '{}'", s))?,
        other => return Err(format!("duration must be a number, got {}", other)),
    };

    if secs < 0 {
        return Err(format!("negative duration {}", secs));
    }
    Ok(secs)
}

/// One decoded feed snapshot: the contests that validated and the
/// records that were rejected.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub contests: Vec<Contest>,
    pub rejected: Vec<ContestHubError>,
}

impl Snapshot {
    /// Decode a JSON array of contest records.
    pub fn decode(json: &str) -> ContestHubResult<Self> {
        let records: Vec<RawContest> =
            serde_json::from_str(json).map_err(|e| ContestHubError::Serialization(e.to_string()))?;
        Ok(Self::from_records(records))
    }

    /// Validate records one by one. A record reusing an id already taken by
    /// an earlier valid record is rejected.
    pub fn from_records(records: Vec<RawContest>) -> Self {
        let mut snapshot = Snapshot::default();
        let mut seen = HashSet::new();

        for raw in records {
            let validated = Contest::try_from(raw).and_then(|contest| {
                if seen.insert(contest.id.clone()) {
                    Ok(contest)
                } else {
                    Err(ContestHubError::invalid_record(contest.id.0, "duplicate id"))
                }
            });
            match validated {
                Ok(contest) => snapshot.contests.push(contest),
                Err(e) => {
                    tracing::warn!("Skipping contest record: {}", e);
                    snapshot.rejected.push(e);
                }
            }
        }

        snapshot
    }
}
