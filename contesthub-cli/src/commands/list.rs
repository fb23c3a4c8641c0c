use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use contesthub_core::config::ContestHubConfig;
use contesthub_core::coordinator::{PlatformSelection, visible};
use contesthub_core::lifecycle::LifecycleEngine;
use owo_colors::OwoColorize;

use crate::render::render_contest;
use crate::source::{load_snapshot, snapshot_path};

pub fn run(config: &ContestHubConfig, file: Option<&Path>, selection: PlatformSelection) -> Result<()> {
    let snapshot = load_snapshot(&snapshot_path(file, config))?;

    if !selection.any_selected() {
        println!("{}", "No platforms selected".dimmed());
        return Ok(());
    }

    let contests = visible(&snapshot.contests, &selection);
    if contests.is_empty() {
        println!("{}", "No contests found".dimmed());
        return Ok(());
    }

    // A one-shot listing needs no timers: a single derivation per contest.
    let now = Utc::now();
    for (i, contest) in contests.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let state = LifecycleEngine::new(contest.clone(), now).state();
        println!("{}", render_contest(&contest, &state));
    }

    Ok(())
}
