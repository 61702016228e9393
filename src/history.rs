//! Append-only log of committed reveals.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payout for `bet_amount` at `multiplier`, rounded to a whole amount.
pub fn win_amount(bet_amount: f64, multiplier: f64) -> f64 {
    (bet_amount * multiplier).round()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub multiplier: f64,
    pub bet_amount: f64,
    pub win_amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(multiplier: f64, bet_amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            multiplier,
            bet_amount,
            win_amount: win_amount(bet_amount, multiplier),
            timestamp,
        }
    }

    pub fn net(&self) -> f64 {
        self.win_amount - self.bet_amount
    }

    pub fn tier(&self) -> MultiplierTier {
        MultiplierTier::classify(self.multiplier)
    }
}

/// Colour band of a history chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierTier {
    Top,
    High,
    Mid,
    Low,
}

impl MultiplierTier {
    /// Bands the multiplier by its position in the 0.5..=3.0 payout range.
    pub fn classify(multiplier: f64) -> Self {
        let normalized = if multiplier.is_nan() {
            0.0
        } else {
            ((multiplier - 0.5) / 2.5).clamp(0.0, 1.0)
        };
        if normalized >= 0.75 {
            MultiplierTier::Top
        } else if normalized >= 0.5 {
            MultiplierTier::High
        } else if normalized >= 0.25 {
            MultiplierTier::Mid
        } else {
            MultiplierTier::Low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of chips shown in the recent-wins strip.
    pub display_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { display_limit: 15 }
    }
}

/// Aggregates over the whole log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub rounds: usize,
    pub wagered: f64,
    pub returned: f64,
    pub net: f64,
}

/// Newest-first history. Entries are never mutated once pushed.
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts at the head and returns the stored entry.
    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push_front(entry);
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Newest-first iterator.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Up to `count` newest entries, newest first.
    pub fn recent(&self, count: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().take(count).collect()
    }

    /// Oldest-first iterator, i.e. the order entries were committed in.
    pub fn in_commit_order(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn summary(&self) -> HistorySummary {
        self.entries
            .iter()
            .fold(HistorySummary::default(), |mut summary, entry| {
                summary.rounds += 1;
                summary.wagered += entry.bet_amount;
                summary.returned += entry.win_amount;
                summary.net += entry.net();
                summary
            })
    }
}
