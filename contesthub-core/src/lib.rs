//! Core of contesthub.
//!
//! - `contest` / `platform`: contest records and their validation
//! - `time_utils`: duration formatting and start-time ordering
//! - `lifecycle`: per-contest Upcoming/Ongoing/Completed engine and its tick task
//! - `calendar`: Google/Outlook deep links and Apple .ics files
//! - `coordinator`: platform filtering, ordering and one engine per visible contest

pub mod calendar;
pub mod config;
pub mod contest;
pub mod coordinator;
pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod platform;
pub mod time_utils;

pub use contest::{Contest, ContestId, RawContest, Snapshot};
pub use error::{ContestHubError, ContestHubResult};
pub use platform::Platform;
