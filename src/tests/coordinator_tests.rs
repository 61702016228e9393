use super::*;
use crate::widget::RevealRequest;

/// Widget whose activity is flipped by hand.
struct Flag(bool);

impl RevealAnimation for Flag {
    fn start(&mut self, _request: &RevealRequest, _now_ms: f64) -> bool {
        self.0 = true;
        true
    }
    fn tick(&mut self, _now_ms: f64) {}
    fn is_active(&self) -> bool {
        self.0
    }
}

fn outcome(multiplier: f64, bet: f64) -> Outcome {
    Outcome::new(multiplier, bet).unwrap()
}

#[test]
fn test_first_enqueue_starts_visuals() {
    let mut coordinator = CompletionCoordinator::new(CoordinatorConfig::default());
    assert!(!coordinator.is_busy());
    assert_eq!(coordinator.enqueue(outcome(2.0, 100.0), 0.0), Admission::StartVisuals);
    assert_eq!(coordinator.state(), CoordinatorState::Busy);
    assert_eq!(
        coordinator.enqueue(outcome(1.5, 50.0), 10.0),
        Admission::Queued { position: 2 }
    );
    assert_eq!(coordinator.pending_len(), 2);
}

#[test]
fn test_poll_waits_for_every_widget() {
    let mut coordinator = CompletionCoordinator::new(CoordinatorConfig::default());
    coordinator.enqueue(outcome(2.0, 100.0), 0.0);
    let canvas = Flag(false);
    let counter = Flag(true);
    assert!(coordinator.poll(100.0, &[&canvas, &counter]).is_none());
    assert!(coordinator.is_busy());

    let counter = Flag(false);
    let report = coordinator.poll(200.0, &[&canvas, &counter]).unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].win_amount, 200.0);
    assert!(!coordinator.is_busy());
}

#[test]
fn test_poll_respects_interval() {
    let mut coordinator = CompletionCoordinator::new(CoordinatorConfig::default());
    coordinator.enqueue(outcome(1.0, 10.0), 0.0);
    let idle = Flag(false);
    assert!(coordinator.poll(50.0, &[&idle]).is_none());
    assert!(coordinator.poll(99.0, &[&idle]).is_none());
    assert!(coordinator.poll(100.0, &[&idle]).is_some());
}

#[test]
fn test_commit_is_fifo_and_single() {
    let mut coordinator = CompletionCoordinator::new(CoordinatorConfig::default());
    coordinator.enqueue(outcome(1.5, 50.0), 0.0);
    coordinator.enqueue(outcome(2.0, 100.0), 5.0);
    let idle = Flag(false);

    let report = coordinator.poll(100.0, &[&idle]).unwrap();
    let wins: Vec<f64> = report.entries.iter().map(|e| e.win_amount).collect();
    assert_eq!(wins, vec![75.0, 200.0]);

    for step in 2..20 {
        assert!(coordinator.poll(step as f64 * 100.0, &[&idle]).is_none());
    }
    assert_eq!(coordinator.history().len(), 2);
    let committed: Vec<f64> = coordinator
        .history()
        .in_commit_order()
        .map(|e| e.win_amount)
        .collect();
    assert_eq!(committed, vec![75.0, 200.0]);
    assert_eq!(coordinator.history().latest().unwrap().win_amount, 200.0);
}

#[test]
fn test_idle_coordinator_never_commits() {
    let mut coordinator = CompletionCoordinator::new(CoordinatorConfig::default());
    let idle = Flag(false);
    assert!(coordinator.poll(1_000.0, &[&idle]).is_none());
    assert!(coordinator.history().is_empty());
}
