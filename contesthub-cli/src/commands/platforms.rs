use anyhow::Result;
use contesthub_core::Platform;
use contesthub_core::config::ContestHubConfig;
use owo_colors::OwoColorize;

pub fn run(config: &ContestHubConfig) -> Result<()> {
    let selection = config.initial_selection();

    for platform in Platform::ALL {
        if selection.is_selected(platform) {
            println!("{} {}", "●".green(), platform);
        } else {
            println!("{} {}", "○".dimmed(), platform.dimmed());
        }
    }

    Ok(())
}
