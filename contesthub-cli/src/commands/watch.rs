use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use contesthub_core::config::ContestHubConfig;
use contesthub_core::coordinator::{ContestListCoordinator, PlatformSelection};
use contesthub_core::lifecycle::{EngineEvent, LifecycleEvent, Status, SystemClock};
use contesthub_core::notify::{DisabledNotifier, Notifier, send_reminder};
use owo_colors::OwoColorize;
use tokio::time::{Interval, MissedTickBehavior};

use crate::notifier::DesktopNotifier;
use crate::render::{Render, render_contest};
use crate::source::{is_stdin, load_snapshot, snapshot_path};

pub async fn run(
    config: &ContestHubConfig,
    file: Option<PathBuf>,
    selection: PlatformSelection,
    reload_secs: Option<u64>,
) -> Result<()> {
    let path = snapshot_path(file.as_deref(), config);
    let snapshot = load_snapshot(&path)?;

    let notifier: Arc<dyn Notifier + Send + Sync> = if config.notifications {
        Arc::new(DesktopNotifier)
    } else {
        Arc::new(DisabledNotifier)
    };

    let mut reload = match reload_secs {
        Some(_) if is_stdin(&path) => {
            anyhow::bail!("--reload needs a snapshot file, not stdin");
        }
        Some(0) => anyhow::bail!("--reload must be at least 1 second"),
        Some(secs) => {
            let period = Duration::from_secs(secs);
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Some(interval)
        }
        None => None,
    };

    let mut coordinator = ContestListCoordinator::with_selection(Arc::new(SystemClock), selection);
    let shown = coordinator.sync(&snapshot.contests).len();
    print_board(&coordinator);

    if shown == 0 && reload.is_none() {
        return Ok(());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // Set once every engine has finished; only a reload can bring new work.
    let mut idle = false;

    loop {
        tokio::select! {
            event = coordinator.next_event(), if !idle => match event {
                Some(event) => handle_event(&coordinator, &event, &notifier),
                None if reload.is_none() => {
                    println!("{}", "All contests completed".dimmed());
                    break;
                }
                None => idle = true,
            },
            _ = tick(&mut reload) => {
                match load_snapshot(&path) {
                    Ok(snapshot) => {
                        let before = coordinator.visible().len();
                        let after = coordinator.sync(&snapshot.contests).len();
                        tracing::debug!("Reloaded snapshot: {} -> {} visible contests", before, after);
                        idle = false;
                    }
                    Err(e) => tracing::warn!("Keeping previous snapshot: {:#}", e),
                }
            },
            _ = &mut ctrl_c => break,
        }
    }

    coordinator.shutdown().await;
    Ok(())
}

/// Wait for the next reload tick; never resolves without `--reload`.
async fn tick(reload: &mut Option<Interval>) {
    match reload {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn print_board(coordinator: &ContestListCoordinator) {
    let states = coordinator.states();
    if states.is_empty() {
        println!("{}", "No contests found".dimmed());
        return;
    }

    for (contest, state) in states {
        println!("{}\n", render_contest(contest, &state));
    }
}

fn handle_event(
    coordinator: &ContestListCoordinator,
    event: &EngineEvent,
    notifier: &Arc<dyn Notifier + Send + Sync>,
) {
    let Some(contest) = coordinator.visible().iter().find(|c| c.id == event.contest_id) else {
        return;
    };
    let time = Local::now().format("%H:%M:%S").to_string();

    match &event.event {
        LifecycleEvent::StatusChanged { to, .. } => {
            let detail = match to {
                Status::Ongoing => "started",
                Status::Completed => "ended",
                Status::Upcoming => "scheduled",
            };
            println!(
                "{} {} {} - {} {}",
                time.dimmed(),
                to.render(),
                contest.platform,
                contest.title,
                detail.dimmed()
            );
        }
        LifecycleEvent::Reminder { title } => {
            println!(
                "{} {} {} starts in 5 minutes",
                time.dimmed(),
                "Reminder".bold(),
                title
            );

            // Notification backends may block; keep them off the runtime threads.
            let notifier = Arc::clone(notifier);
            let title = title.clone();
            tokio::task::spawn_blocking(move || send_reminder(notifier.as_ref(), &title));
        }
    }
}
