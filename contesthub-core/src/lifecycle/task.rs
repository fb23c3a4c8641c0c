//! Periodic tick task driving one [`LifecycleEngine`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{Clock, LifecycleEngine, LifecycleEvent, LifecycleState, Status};
use crate::contest::{Contest, ContestId};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A lifecycle event tagged with the engine that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub contest_id: ContestId,
    /// Distinguishes engines for the same contest across teardown and respawn.
    pub generation: u64,
    pub event: LifecycleEvent,
}

/// Owner of a running engine task.
///
/// Dropping the handle stops the timer, as does [`EngineHandle::cancel`].
/// The task also stops by itself once the contest is Completed.
#[derive(Debug)]
pub struct EngineHandle {
    contest: Contest,
    generation: u64,
    state: watch::Receiver<LifecycleState>,
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn contest_id(&self) -> &ContestId {
        &self.contest.id
    }

    /// The contest this engine was started for.
    pub fn contest(&self) -> &Contest {
        &self.contest
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest published state.
    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.clone()
    }

    /// True once no further event can come from this engine: the contest
    /// has published Completed, or the tick task is gone.
    ///
    /// The Completed state is published before its event is sent, so a
    /// receiver that has seen the final event always sees the engine as
    /// finished, even while the task is still winding down.
    pub fn is_finished(&self) -> bool {
        self.state().status == Status::Completed
            || self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Stop the timer.
    pub fn cancel(mut self) {
        self.abort();
    }

    /// Stop the timer and wait for the task to wind down. A task that
    /// panicked is reported and otherwise ignored.
    pub async fn shutdown(mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();

        match task.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::warn!(contest = %self.contest.id, "Engine task failed: {}", e),
        }
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(contest = %self.contest.id, generation = self.generation, "Engine stopped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Start ticking `contest` once per [`TICK_PERIOD`] on the current tokio runtime.
///
/// The first derivation happens immediately, so the returned handle already
/// holds a current state. A contest that is already Completed gets no task
/// at all. Events go to `events`; if that channel closes the task stops.
pub fn spawn_engine(
    contest: Contest,
    generation: u64,
    clock: Arc<dyn Clock>,
    events: mpsc::UnboundedSender<EngineEvent>,
) -> EngineHandle {
    let engine = LifecycleEngine::new(contest.clone(), clock.now());
    let (state_tx, state_rx) = watch::channel(engine.state());

    tracing::debug!(
        contest = %contest.id,
        generation,
        status = %engine.state().status,
        "Engine started"
    );

    let task = if engine.is_finished() {
        None
    } else {
        Some(tokio::spawn(run_engine(engine, generation, clock, state_tx, events)))
    };

    EngineHandle {
        contest,
        generation,
        state: state_rx,
        task,
    }
}

async fn run_engine(
    mut engine: LifecycleEngine,
    generation: u64,
    clock: Arc<dyn Clock>,
    state_tx: watch::Sender<LifecycleState>,
    events: mpsc::UnboundedSender<EngineEvent>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let emitted = engine.tick(clock.now());
        state_tx.send_replace(engine.state());

        for event in emitted {
            let tagged = EngineEvent {
                contest_id: engine.contest().id.clone(),
                generation,
                event,
            };
            if events.send(tagged).is_err() {
                tracing::debug!(contest = %engine.contest().id, "Event receiver closed, stopping engine");
                return;
            }
        }

        if engine.is_finished() {
            tracing::debug!(contest = %engine.contest().id, "Contest completed, timer stopped");
            return;
        }
    }
}
