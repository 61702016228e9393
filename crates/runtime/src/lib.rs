//! Runtime layer for driving the reveal stage with a winit + pixels loop.

pub mod haptics;
pub mod input;
pub mod render;
pub mod view;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use win_reveal::{
    CanvasSize, FrameReport, HapticSink, OutcomeSource, RevealConfig, RevealStage, SpeedSetting,
};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

pub use self::haptics::{auto_haptics, PulseTone, RodioHaptics};
pub use self::input::{ConfigurableInput, Input, InputAction};
pub use self::view::{RevealView, TOKEN_RADIUS};
use self::render::{BuiltinSoftwareDrawer, NullBackend, RenderBackend, SoftwareBackend};

/// Amount added or removed by one bet key press.
pub const BET_STEP: f64 = 100.0;
/// Bet used until the player changes it.
pub const DEFAULT_BET: f64 = 100.0;

/// Runtime application wrapper. Logic controller.
pub struct RuntimeApp<I, O, H: HapticSink> {
    stage: RevealStage<H>,
    input: I,
    outcomes: O,
    bet_amount: f64,
}

impl<I, O, H> RuntimeApp<I, O, H>
where
    I: Input,
    O: OutcomeSource,
    H: HapticSink,
{
    pub fn new(config: RevealConfig, input: I, outcomes: O, haptics: H) -> Self {
        let speed = SpeedSetting::new(config.speed_mode);
        Self {
            stage: RevealStage::new(config, speed, haptics),
            input,
            outcomes,
            bet_amount: DEFAULT_BET,
        }
    }

    pub fn stage(&self) -> &RevealStage<H> {
        &self.stage
    }

    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }

    pub fn set_bet_amount(&mut self, bet_amount: f64) {
        self.bet_amount = if bet_amount.is_finite() {
            bet_amount.max(0.0)
        } else {
            0.0
        };
    }

    /// Applies one action. Returns `false` when the app should quit.
    pub fn handle_action(&mut self, action: InputAction, now_ms: f64) -> bool {
        match action {
            InputAction::None => {}
            InputAction::Quit => return false,
            InputAction::Reveal => {
                let multiplier = self.outcomes.next_multiplier();
                match self.stage.reveal(multiplier, self.bet_amount, now_ms) {
                    Ok(admission) => debug!(multiplier, ?admission, "reveal requested"),
                    Err(err) => warn!(%err, "reveal refused"),
                }
            }
            InputAction::ToggleSpeed => {
                let mode = self.stage.speed().toggle();
                info!(speed = mode.label(), "speed changed");
            }
            InputAction::BetUp => self.set_bet_amount(self.bet_amount + BET_STEP),
            InputAction::BetDown => self.set_bet_amount(self.bet_amount - BET_STEP),
        }
        true
    }

    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        self.stage.frame(now_ms)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.stage.resize(CanvasSize::new(f64::from(width), f64::from(height)));
    }

    pub fn view(&self) -> RevealView {
        RevealView::from_stage(&self.stage, self.bet_amount)
    }
}

impl<I, O> RuntimeApp<I, O, Box<dyn HapticSink>>
where
    I: Input,
    O: OutcomeSource,
{
    /// Creates a RuntimeApp with rodio tones for haptics, falling back to silence.
    pub fn new_auto(config: RevealConfig, input: I, outcomes: O) -> Self {
        RuntimeApp::new(config, input, outcomes, auto_haptics())
    }
}

/// Run the runtime loop using winit and the software backend.
///
/// Without a drawing surface the loop still ticks the stage and updates the title.
pub fn run_winit<I, O, H>(mut app: RuntimeApp<I, O, H>) -> Result<(), String>
where
    I: Input + 'static,
    O: OutcomeSource + 'static,
    H: HapticSink + 'static,
{
    let event_loop = EventLoop::new().map_err(|e| format!("failed to create event loop: {e}"))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Win Reveal")
            .with_inner_size(LogicalSize::new(358.0, 412.0))
            .with_min_inner_size(LogicalSize::new(179.0, 206.0))
            .build(&event_loop)
            .map_err(|e| format!("failed to build runtime window: {e}"))?,
    );

    let size = window.inner_size();
    app.resize(size.width, size.height);
    let mut backend: Box<dyn RenderBackend> = match SoftwareBackend::new(
        window.clone(),
        size.width,
        size.height,
        Box::new(BuiltinSoftwareDrawer),
    ) {
        Ok(software) => Box::new(software),
        Err(err) => {
            warn!(%err, "no drawing surface, continuing without rendering");
            Box::new(NullBackend::new(size.width, size.height))
        }
    };

    let origin = Instant::now();
    let mut last_title = String::new();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);
            let now_ms = origin.elapsed().as_secs_f64() * 1_000.0;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => {
                        backend.resize(size.width, size.height);
                        app.resize(size.width, size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        // A failed draw only costs this frame; commits keep flowing.
                        if let Err(err) = backend.render(&app.view()) {
                            warn!(%err, "render failed");
                        }
                    }
                    _ => {
                        let action = app.input.handle_window_event(&event);
                        if !app.handle_action(action, now_ms) {
                            elwt.exit();
                        }
                    }
                },
                Event::AboutToWait => {
                    let report = app.frame(now_ms);
                    if let Some(commit) = report.commit {
                        info!(entries = commit.entries.len(), "history updated");
                    }
                    let title = app.view().title();
                    if title != last_title {
                        window.set_title(&title);
                        last_title = title;
                    }
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| format!("event loop error: {e}"))
}
