use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use contesthub_core::calendar::{self, CalendarArtifact, Provider};
use contesthub_core::coordinator::{ContestListCoordinator, PlatformSelection};
use contesthub_core::lifecycle::{Clock, LifecycleEvent, Status, TokioClock};
use contesthub_core::{Contest, ContestId, Platform, Snapshot};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()
}

fn round_999() -> Contest {
    Contest {
        id: ContestId::from("999"),
        platform: Platform::Codeforces,
        title: "Round 999".to_string(),
        url: "https://codeforces.com/contest/999".to_string(),
        start_time: now() + TimeDelta::seconds(3600),
        duration_secs: 7200,
    }
}

#[tokio::test(start_paused = true)]
async fn round_999_runs_through_its_whole_lifecycle() {
    let clock = Arc::new(TokioClock::starting_at(now()));
    let mut coordinator = ContestListCoordinator::new(clock.clone());
    let id = ContestId::from("999");

    coordinator.sync(&[round_999()]);

    let state = coordinator.state(&id).unwrap();
    assert_eq!(state.status, Status::Upcoming);
    assert_eq!(state.countdown_secs, 3600);

    let mut events = Vec::new();
    while let Some(event) = coordinator.next_event().await {
        assert_eq!(event.contest_id, id);
        let elapsed = (clock.now() - now()).num_seconds();
        events.push((elapsed, event.event));
    }

    assert_eq!(
        events,
        vec![
            (
                3300,
                LifecycleEvent::Reminder {
                    title: "Round 999".to_string()
                }
            ),
            (
                3600,
                LifecycleEvent::StatusChanged {
                    from: Status::Upcoming,
                    to: Status::Ongoing
                }
            ),
            (
                3600 + 7200 + 1,
                LifecycleEvent::StatusChanged {
                    from: Status::Ongoing,
                    to: Status::Completed
                }
            ),
        ]
    );

    let state = coordinator.state(&id).unwrap();
    assert_eq!(state.status, Status::Completed);
    assert_eq!(state.countdown_secs, 0);
    assert!(state.reminder_fired);
    assert_eq!(coordinator.running_engines(), 0, "Timer must stop once Completed");
}

#[tokio::test(start_paused = true)]
async fn countdown_tracks_absolute_time() {
    let clock = Arc::new(TokioClock::starting_at(now()));
    let mut coordinator = ContestListCoordinator::new(clock);
    let id = ContestId::from("999");

    coordinator.sync(&[round_999()]);

    tokio::time::sleep(Duration::from_millis(3_600_500)).await;
    let state = coordinator.state(&id).unwrap();
    assert_eq!(state.status, Status::Ongoing);
    assert_eq!(state.countdown_secs, 7200);

    tokio::time::sleep(Duration::from_secs(1800)).await;
    let state = coordinator.state(&id).unwrap();
    assert_eq!(state.status, Status::Ongoing);
    assert_eq!(state.countdown_secs, 5400);

    coordinator.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn invalid_records_are_excluded_not_fatal() {
    let snapshot = Snapshot::decode(
        r#"[
            {"id": 1, "platform": "LeetCode", "title": "Weekly Contest 430",
             "url": "https://leetcode.com/contest/weekly-contest-430",
             "start_time": "2025-01-12T02:30:00Z", "duration": 5400},
            {"id": 2, "platform": "CodeChef", "title": "Starters 170",
             "url": "https://www.codechef.com/START170",
             "start_time": "2025-01-08T14:30:00Z", "duration": -5},
            {"id": 3, "platform": "AtCoder", "title": "ABC 387",
             "url": "https://atcoder.jp/contests/abc387",
             "start_time": "2025-01-11T12:00:00Z", "duration": 6000}
        ]"#,
    )
    .unwrap();
    assert_eq!(snapshot.rejected.len(), 1);

    let clock = Arc::new(TokioClock::starting_at(now()));
    let mut coordinator = ContestListCoordinator::new(clock);
    let shown: Vec<String> = coordinator
        .sync(&snapshot.contests)
        .iter()
        .map(|c| c.title.clone())
        .collect();

    assert_eq!(shown, vec!["ABC 387", "Weekly Contest 430"]);

    coordinator.selection_mut().clear();
    assert!(!coordinator.selection().any_selected());
    assert!(coordinator.sync(&snapshot.contests).is_empty());
    assert_eq!(coordinator.running_engines(), 0);

    coordinator.set_selection(PlatformSelection::default());
    assert_eq!(coordinator.sync(&snapshot.contests).len(), 2);
    coordinator.shutdown().await;
}

#[test]
fn ninety_minute_contest_calendar_dates() {
    let contest = Contest {
        start_time: Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap(),
        duration_secs: 5400,
        ..round_999()
    };

    let CalendarArtifact::File(file) = calendar::generate(&contest, Provider::Apple).unwrap() else {
        panic!("Apple should produce a file");
    };
    assert!(file.content.contains("DTSTART:20250110T100000Z"));
    assert!(file.content.contains("DTEND:20250110T113000Z"));

    let CalendarArtifact::Url(url) = calendar::generate(&contest, Provider::Google).unwrap() else {
        panic!("Google should produce a URL");
    };
    assert!(url.as_str().contains("dates=20250110T100000Z/20250110T113000Z"));
}
