use contesthub_core::error::{ContestHubError, ContestHubResult};
use contesthub_core::notify::Notifier;
use notify_rust::Notification;

/// Native desktop notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) -> ContestHubResult<()> {
        Notification::new()
            .appname("contesthub")
            .summary(summary)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| ContestHubError::NotificationUnavailable(e.to_string()))
    }
}
