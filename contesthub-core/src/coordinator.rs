//! Platform filtering, ordering and the per-contest engine arena.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::calendar::{self, CalendarArtifact, Provider};
use crate::contest::{Contest, ContestId};
use crate::error::{ContestHubError, ContestHubResult};
use crate::lifecycle::{Clock, EngineEvent, EngineHandle, LifecycleState, spawn_engine};
use crate::platform::Platform;
use crate::time_utils::compare_start_times;

/// Which platforms are shown. Platforms missing from the map count as not
/// selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSelection {
    selected: BTreeMap<Platform, bool>,
}

impl Default for PlatformSelection {
    /// Everything selected.
    fn default() -> Self {
        PlatformSelection {
            selected: Platform::ALL.into_iter().map(|p| (p, true)).collect(),
        }
    }
}

impl PlatformSelection {
    /// An empty map; nothing is selected.
    pub fn empty() -> Self {
        PlatformSelection {
            selected: BTreeMap::new(),
        }
    }

    /// Only `platforms` selected, every other platform explicitly off.
    pub fn only(platforms: &[Platform]) -> Self {
        let mut selection = Self::default();
        selection.clear();
        for platform in platforms {
            selection.set(*platform, true);
        }
        selection
    }

    pub fn is_selected(&self, platform: Platform) -> bool {
        self.selected.get(&platform).copied().unwrap_or(false)
    }

    pub fn set(&mut self, platform: Platform, selected: bool) {
        self.selected.insert(platform, selected);
    }

    pub fn toggle(&mut self, platform: Platform) {
        let selected = self.is_selected(platform);
        self.set(platform, !selected);
    }

    /// Deselect every platform.
    pub fn clear(&mut self) {
        for platform in Platform::ALL {
            self.selected.insert(platform, false);
        }
    }

    pub fn select_all(&mut self) {
        for platform in Platform::ALL {
            self.selected.insert(platform, true);
        }
    }

    pub fn any_selected(&self) -> bool {
        self.selected.values().any(|selected| *selected)
    }
}

/// Contests on selected platforms, ascending by start time. Contests that
/// start at the same instant keep their input order.
pub fn visible(contests: &[Contest], selection: &PlatformSelection) -> Vec<Contest> {
    let mut shown: Vec<Contest> = contests
        .iter()
        .filter(|c| selection.is_selected(c.platform))
        .cloned()
        .collect();

    // sort_by is stable
    shown.sort_by(compare_start_times);
    shown
}

/// Keeps exactly one running lifecycle engine per visible contest.
pub struct ContestListCoordinator {
    selection: PlatformSelection,
    clock: Arc<dyn Clock>,
    engines: HashMap<ContestId, EngineHandle>,
    visible: Vec<Contest>,
    next_generation: u64,
    events_tx: mpsc::UnboundedSender<EngineEvent>,
    events_rx: mpsc::UnboundedReceiver<EngineEvent>,
}

impl ContestListCoordinator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_selection(clock, PlatformSelection::default())
    }

    pub fn with_selection(clock: Arc<dyn Clock>, selection: PlatformSelection) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        ContestListCoordinator {
            selection,
            clock,
            engines: HashMap::new(),
            visible: Vec::new(),
            next_generation: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn selection(&self) -> &PlatformSelection {
        &self.selection
    }

    /// Replace the selection. Takes effect on the next [`sync`](Self::sync).
    pub fn set_selection(&mut self, selection: PlatformSelection) {
        self.selection = selection;
    }

    pub fn selection_mut(&mut self) -> &mut PlatformSelection {
        &mut self.selection
    }

    /// Reconcile engines with the latest snapshot: start engines for newly
    /// visible contests, stop engines for contests that are no longer
    /// visible. Must run inside a tokio runtime.
    pub fn sync(&mut self, contests: &[Contest]) -> &[Contest] {
        self.visible = visible(contests, &self.selection);

        // One engine per id: the earliest-starting record wins.
        let mut seen = HashSet::new();
        self.visible.retain(|c| seen.insert(c.id.clone()));

        let keep: HashMap<&ContestId, &Contest> = self.visible.iter().map(|c| (&c.id, c)).collect();

        // Engines for hidden contests, and for contests whose record changed
        // (e.g. rescheduled), are stopped; the latter get a fresh engine below.
        let stale: Vec<ContestId> = self
            .engines
            .iter()
            .filter(|(id, handle)| keep.get(id).is_none_or(|c| *c != handle.contest()))
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            if let Some(handle) = self.engines.remove(&id) {
                tracing::debug!(contest = %id, "Tearing down engine");
                handle.cancel();
            }
        }

        for contest in &self.visible {
            if self.engines.contains_key(&contest.id) {
                continue;
            }
            self.next_generation += 1;
            let handle = spawn_engine(
                contest.clone(),
                self.next_generation,
                Arc::clone(&self.clock),
                self.events_tx.clone(),
            );
            self.engines.insert(contest.id.clone(), handle);
        }

        &self.visible
    }

    /// The contests from the last [`sync`](Self::sync), in display order.
    pub fn visible(&self) -> &[Contest] {
        &self.visible
    }

    pub fn state(&self, id: &ContestId) -> Option<LifecycleState> {
        self.engines.get(id).map(|handle| handle.state())
    }

    /// Visible contests paired with their current lifecycle state.
    pub fn states(&self) -> Vec<(&Contest, LifecycleState)> {
        self.visible
            .iter()
            .filter_map(|c| self.state(&c.id).map(|s| (c, s)))
            .collect()
    }

    /// Number of engines that can still produce events.
    pub fn running_engines(&self) -> usize {
        self.engines.values().filter(|h| !h.is_finished()).count()
    }

    /// Next event from a live engine. Events from engines that have been
    /// torn down are dropped here, so nothing of theirs is observable.
    /// Returns `None` once no engine is left that could produce one.
    pub async fn next_event(&mut self) -> Option<EngineEvent> {
        loop {
            if self.running_engines() == 0 {
                // Drain what finished engines queued before they stopped.
                let event = self.events_rx.try_recv().ok()?;
                if self.is_current(&event) {
                    return Some(event);
                }
                continue;
            }

            let event = self.events_rx.recv().await?;
            if self.is_current(&event) {
                return Some(event);
            }
            tracing::debug!(contest = %event.contest_id, generation = event.generation, "Dropping stale event");
        }
    }

    fn is_current(&self, event: &EngineEvent) -> bool {
        self.engines
            .get(&event.contest_id)
            .is_some_and(|h| h.generation() == event.generation)
    }

    /// Calendar artifact for a visible contest.
    pub fn artifact(&self, id: &ContestId, provider: Provider) -> ContestHubResult<CalendarArtifact> {
        let contest = self
            .visible
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| ContestHubError::ContestNotVisible(id.to_string()))?;
        calendar::generate(contest, provider)
    }

    /// Stop every engine and wait for the tasks to finish.
    pub async fn shutdown(&mut self) {
        self.visible.clear();
        for (_, handle) in self.engines.drain() {
            handle.shutdown().await;
        }
    }
}
