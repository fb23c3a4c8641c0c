//! Seam to the host's notification facility.
//!
//! The core only decides when a reminder is due; showing it is up to the
//! [`Notifier`] the host plugs in.

use crate::error::ContestHubResult;

pub trait Notifier {
    /// Show a one-shot notification. Fails with `NotificationUnavailable`
    /// when the host cannot or will not show it.
    fn notify(&self, summary: &str, body: &str) -> ContestHubResult<()>;
}

/// "<title> about to start in 5 minutes."
pub fn reminder_body(title: &str) -> String {
    format!("{} about to start in 5 minutes.", title)
}

/// Show the start reminder for `title`. Delivery failures are logged and
/// otherwise ignored; returns whether the notification went out.
pub fn send_reminder(notifier: &dyn Notifier, title: &str) -> bool {
    match notifier.notify(title, &reminder_body(title)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not deliver reminder for '{}': {}", title, e);
            false
        }
    }
}

/// Notifier for hosts without notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn notify(&self, _summary: &str, _body: &str) -> ContestHubResult<()> {
        Err(crate::error::ContestHubError::NotificationUnavailable(
            "notifications are disabled".into(),
        ))
    }
}
