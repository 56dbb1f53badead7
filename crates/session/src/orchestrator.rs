use super::*;
use log::debug;
use log::info;
use log::warn;
use pd_core::*;
use pd_engine::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::time::timeout;

/// How a simulation loop ended.
enum RunOutcome {
    /// All runs finished and the summary was delivered.
    Completed,
    /// The stop flag was observed at a round boundary.
    Cancelled,
    /// The consumer went away; sends fail or time out.
    Disconnected,
}

/// Background worker driving one session.
///
/// Owns the configuration and all mutable simulation state. Blocks until
/// the consumer subscribes, then produces events in order: rounds (or
/// round batches), a run report after each run, and one final summary.
pub struct Orchestrator {
    id: ID<Session>,
    config: SimulationConfig,
    lifecycle: Arc<Lifecycle>,
    events: mpsc::Sender<StreamEvent>,
}

impl Orchestrator {
    pub fn new(
        id: ID<Session>,
        config: SimulationConfig,
        lifecycle: Arc<Lifecycle>,
        events: mpsc::Sender<StreamEvent>,
    ) -> Self {
        Self {
            id,
            config,
            lifecycle,
            events,
        }
    }

    /// Entry point for the spawned task. Signals `done` on every exit path
    /// so the lobby can reclaim the session entry.
    pub async fn run(self, start: oneshot::Receiver<()>, done: oneshot::Sender<()>) {
        match timeout(SUBSCRIBE_TIMEOUT, start).await {
            Ok(Ok(())) if !self.lifecycle.stopped() => {
                self.lifecycle.advance(Status::Running);
                info!("[worker {}] consumer attached, starting", self.id);
                match self.simulate().await {
                    Ok(RunOutcome::Completed) => {
                        self.lifecycle.advance(Status::Completed);
                        info!("[worker {}] completed", self.id);
                    }
                    Ok(RunOutcome::Cancelled) => {
                        self.lifecycle.advance(Status::Stopped);
                        info!("[worker {}] stopped by request", self.id);
                    }
                    Ok(RunOutcome::Disconnected) => {
                        self.lifecycle.advance(Status::Stopped);
                        info!("[worker {}] consumer disconnected", self.id);
                    }
                    Err(e) => {
                        warn!("[worker {}] failed: {}", self.id, e);
                        self.emit(StreamEvent::Error(e.to_string())).await;
                        self.lifecycle.advance(Status::Failed);
                    }
                }
            }
            Ok(Ok(())) => {
                self.lifecycle.advance(Status::Stopped);
                info!("[worker {}] stopped before starting", self.id);
            }
            Ok(Err(_)) => {
                self.lifecycle.advance(Status::Stopped);
                debug!("[worker {}] abandoned before any subscriber", self.id);
            }
            Err(_) => {
                self.lifecycle.advance(Status::Stopped);
                info!("[worker {}] expired waiting for a subscriber", self.id);
            }
        }
        let _ = done.send(());
    }

    /// The simulation loop proper. Rounds within a run share one RunState;
    /// cumulative wire fields reset when a new run begins.
    async fn simulate(&self) -> Result<RunOutcome, EngineError> {
        let ref mut rng = SmallRng::from_os_rng();
        let [s1, s2] = self.config.strategies;
        let mut aggregate = AggregateState::default();
        let mut batch = Vec::with_capacity(self.config.batch_size);
        // Global round index across all runs, for client progress bars.
        let mut cumulative = 0;
        for run in 1..=self.config.monte_carlo_runs {
            let mut state = RunState::default();
            for round in 1..=self.config.rounds {
                // Cancellation is observed here only, so a partially
                // buffered batch is simply dropped.
                if self.lifecycle.stopped() {
                    return Ok(RunOutcome::Cancelled);
                }
                let actions = (
                    s1.decide(round, state.opponent_last(0), rng),
                    s2.decide(round, state.opponent_last(1), rng),
                );
                let result = play_round(actions, &self.config.payoffs);
                state.record(&result)?;
                cumulative += 1;
                batch.push(RoundUpdate::new(run, cumulative, &result, &state));
                if batch.len() >= self.config.batch_size || round == self.config.rounds {
                    if !self.flush(&mut batch).await {
                        return Ok(RunOutcome::Disconnected);
                    }
                }
            }
            aggregate.absorb(&state)?;
            if !self.emit(StreamEvent::RunComplete(RunReport::new(run, &state))).await {
                return Ok(RunOutcome::Disconnected);
            }
        }
        match self
            .emit(StreamEvent::Summary(Summary::new(&aggregate, &self.config)))
            .await
        {
            true => Ok(RunOutcome::Completed),
            false => Ok(RunOutcome::Disconnected),
        }
    }

    /// Drain the buffered rounds into one event. A singleton batch goes out
    /// as a plain round event.
    async fn flush(&self, batch: &mut Vec<RoundUpdate>) -> bool {
        let event = match batch.len() {
            0 => return true,
            1 => StreamEvent::Round(batch.remove(0)),
            _ => StreamEvent::RoundBatch(std::mem::take(batch)),
        };
        self.emit(event).await
    }

    /// Push one event, waiting for channel capacity. Returns false when the
    /// consumer is gone, either closed outright or stalled past the deadline.
    async fn emit(&self, event: StreamEvent) -> bool {
        match timeout(SEND_TIMEOUT, self.events.send(event)).await {
            Ok(Ok(())) => true,
            Ok(Err(_)) => {
                debug!("[worker {}] event channel closed", self.id);
                false
            }
            Err(_) => {
                warn!("[worker {}] send timed out, dropping consumer", self.id);
                false
            }
        }
    }
}
