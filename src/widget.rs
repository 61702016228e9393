//! Command/query interface shared by the reveal widgets.

use crate::duration::SpeedMode;

/// Everything a widget needs to start its part of one reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealRequest {
    pub multiplier: f64,
    pub bet_amount: f64,
    pub win_amount: f64,
    pub speed: SpeedMode,
}

/// A frame-driven animation that the coordinator can observe.
pub trait RevealAnimation {
    /// Starts a session. Returns `false` when a session is already running.
    fn start(&mut self, request: &RevealRequest, now_ms: f64) -> bool;
    /// Advances the running session, if any, to `now_ms`.
    fn tick(&mut self, now_ms: f64);
    fn is_active(&self) -> bool;
}

impl<T: RevealAnimation + ?Sized> RevealAnimation for Box<T> {
    fn start(&mut self, request: &RevealRequest, now_ms: f64) -> bool {
        (**self).start(request, now_ms)
    }
    fn tick(&mut self, now_ms: f64) {
        (**self).tick(now_ms);
    }
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
