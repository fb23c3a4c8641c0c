pub mod calendar;
pub mod list;
pub mod platforms;
pub mod watch;

use contesthub_core::Platform;
use contesthub_core::config::ContestHubConfig;
use contesthub_core::coordinator::PlatformSelection;

/// Starting platform selection: `only` if given (else the configured one),
/// minus `exclude`.
pub fn selection(config: &ContestHubConfig, only: &[Platform], exclude: &[Platform]) -> PlatformSelection {
    let mut selection = if only.is_empty() {
        config.initial_selection()
    } else {
        PlatformSelection::only(only)
    };

    for platform in exclude {
        selection.set(*platform, false);
    }

    selection
}
