//! Joins the widget sessions and commits results to history.
//!
//! # Contracts
//! - **Invariant**: every enqueued outcome is committed exactly once, in arrival order.
//! - **Invariant**: a commit only happens on a poll that observed every watched
//!   widget inactive.
//! - **Invariant**: the pending queue and the history log are mutated here only.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::history::{HistoryEntry, HistoryLog};
use crate::outcome::Outcome;
use crate::widget::RevealAnimation;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Spacing of the joint-completion polls while busy.
    pub poll_interval_ms: f64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    Idle,
    Busy,
    Committing,
}

/// An outcome waiting for the visuals to finish.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingResult {
    pub multiplier: f64,
    pub bet_amount: f64,
}

impl From<Outcome> for PendingResult {
    fn from(outcome: Outcome) -> Self {
        Self {
            multiplier: outcome.multiplier(),
            bet_amount: outcome.bet_amount(),
        }
    }
}

/// What the caller should do after enqueueing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Admission {
    /// The coordinator was idle; start the visuals for this outcome.
    StartVisuals,
    /// A reveal is in flight; the data rides along with it.
    Queued { position: usize },
}

/// Entries written by one commit, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitReport {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Clone, Debug)]
pub struct CompletionCoordinator {
    config: CoordinatorConfig,
    state: CoordinatorState,
    pending: VecDeque<PendingResult>,
    history: HistoryLog,
    last_poll_ms: f64,
}

impl CompletionCoordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self {
            config,
            state: CoordinatorState::Idle,
            pending: VecDeque::new(),
            history: HistoryLog::new(),
            last_poll_ms: 0.0,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != CoordinatorState::Idle
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingResult> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn enqueue(&mut self, outcome: Outcome, now_ms: f64) -> Admission {
        self.pending.push_back(outcome.into());
        match self.state {
            CoordinatorState::Idle => {
                self.state = CoordinatorState::Busy;
                self.last_poll_ms = now_ms;
                debug!(multiplier = outcome.multiplier(), "coordinator busy");
                Admission::StartVisuals
            }
            CoordinatorState::Busy | CoordinatorState::Committing => {
                let position = self.pending.len();
                debug!(multiplier = outcome.multiplier(), position, "outcome queued");
                Admission::Queued { position }
            }
        }
    }

    /// Checks joint completion if the poll interval has elapsed.
    ///
    /// Returns the committed entries when `widgets` were all observed inactive.
    pub fn poll(&mut self, now_ms: f64, widgets: &[&dyn RevealAnimation]) -> Option<CommitReport> {
        if self.state != CoordinatorState::Busy {
            return None;
        }
        if now_ms - self.last_poll_ms < self.config.poll_interval_ms {
            return None;
        }
        self.last_poll_ms = now_ms;
        if widgets.iter().any(|widget| widget.is_active()) {
            return None;
        }
        Some(self.commit())
    }

    fn commit(&mut self) -> CommitReport {
        self.state = CoordinatorState::Committing;
        let mut entries = Vec::with_capacity(self.pending.len());
        while let Some(pending) = self.pending.pop_front() {
            let entry = HistoryEntry::new(pending.multiplier, pending.bet_amount, Utc::now());
            info!(
                id = %entry.id,
                multiplier = entry.multiplier,
                bet = entry.bet_amount,
                win = entry.win_amount,
                "reveal committed"
            );
            entries.push(self.history.push(entry).clone());
        }
        self.state = CoordinatorState::Idle;
        CommitReport { entries }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
