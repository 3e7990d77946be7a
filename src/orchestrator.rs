// src/orchestrator.rs
use std::time::Duration;

use chrono::Utc;
use metrics::{counter, gauge};
use tokio::sync::watch;

use crate::dedup::DedupStore;
use crate::feed::client::AlertsClient;
use crate::feed::types::Warning;
use crate::gate::SpeechGate;
use crate::notify::{compose_announcement, Notifier};

/// Lifecycle of the poll loop, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Fetching,
    Processing,
    Sleeping,
    ShuttingDown,
}

/// Single thread of control tying the client, filter, dedup store, speech
/// gate, and notifier together. Exactly one cycle is in flight at a time; a
/// slow fetch delays the next cycle rather than overlapping it.
pub struct Orchestrator {
    client: AlertsClient,
    category: String,
    dedup: DedupStore,
    gate: SpeechGate,
    notifier: Box<dyn Notifier>,
    poll_interval: Duration,
    startup_phrase: String,
    shutdown: watch::Receiver<bool>,
    state: CycleState,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client: AlertsClient,
        category: String,
        dedup: DedupStore,
        gate: SpeechGate,
        notifier: Box<dyn Notifier>,
        poll_interval: Duration,
        startup_phrase: String,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            category,
            dedup,
            gate,
            notifier,
            poll_interval,
            startup_phrase,
            shutdown,
            state: CycleState::Idle,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn dedup(&self) -> &DedupStore {
        &self.dedup
    }

    /// Poll loop. Returns when shutdown is requested; shutdown is observed
    /// only at cycle and sleep boundaries, so an in-flight cycle always
    /// finishes first.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        crate::metrics::ensure_described();
        self.announce_startup().await;

        loop {
            if *self.shutdown.borrow() {
                break;
            }
            self.run_cycle().await;
            if *self.shutdown.borrow() {
                break;
            }

            self.transition(CycleState::Sleeping);
            let mut shutdown = self.shutdown.clone();
            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = shutdown.changed() => {}
            }
        }

        self.transition(CycleState::ShuttingDown);
        tracing::info!("shutdown complete");
        Ok(())
    }

    /// Fixed calm phrase at boot, confirming the audio path works. The gate
    /// starts with no prior speech, so the first attempt always passes.
    async fn announce_startup(&mut self) {
        if self.gate.attempt(Utc::now()) {
            if let Err(e) = self.notifier.speak(&self.startup_phrase).await {
                tracing::warn!(error = ?e, "startup announcement failed");
            }
        }
    }

    /// One fetch-filter-announce pass.
    pub async fn run_cycle(&mut self) {
        self.transition(CycleState::Fetching);
        let raw = self.client.fetch_active_alerts().await;

        self.transition(CycleState::Processing);
        let warnings = crate::feed::filter_warnings(raw, &self.category);
        tracing::debug!(warnings = warnings.len(), "cycle fetched");
        for warning in &warnings {
            self.process_warning(warning).await;
        }

        counter!("herald_cycles_total").increment(1);
        gauge!("herald_last_cycle_ts").set(Utc::now().timestamp().max(0) as f64);
        self.transition(CycleState::Idle);
    }

    /// Failures here stay scoped to this warning. The id is marked announced
    /// on every path (spoken, gate-denied, or notifier failure), so delivery
    /// is at most once and a bad warning never blocks the rest of the cycle.
    async fn process_warning(&mut self, warning: &Warning) {
        if self.dedup.has_been_announced(&warning.id) {
            tracing::debug!(id = %warning.id, "already announced; skipping");
            return;
        }

        if self.gate.attempt(Utc::now()) {
            let message = compose_announcement(warning);
            match self.notifier.speak(&message).await {
                Ok(()) => {
                    counter!("herald_announced_total").increment(1);
                    tracing::info!(
                        id = %warning.id,
                        area = %warning.area_description,
                        "announced warning"
                    );
                }
                Err(e) => {
                    counter!("herald_notify_failures_total").increment(1);
                    tracing::warn!(
                        id = %warning.id,
                        error = ?e,
                        "notifier failed; warning will not be retried"
                    );
                }
            }
        } else {
            counter!("herald_gate_denied_total").increment(1);
            tracing::info!(id = %warning.id, "speech gate denied announcement; dropping");
        }

        self.dedup.mark_announced(&warning.id);
    }

    fn transition(&mut self, next: CycleState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "cycle state");
            self.state = next;
        }
    }
}
