//! Render-ready snapshot of the stage for one frame.

use win_reveal::{
    background_tiles, HapticSink, MultiplierTier, ReadoutTone, RevealStage, SpeedMode, TokenPose,
};

/// Everything a drawer needs; built once per redraw.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealView {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub canvas_scale: f64,
    /// Left edges of the background tiles.
    pub tiles: Vec<f64>,
    pub tile_width: f64,
    pub tile_height: f64,
    pub token: Option<TokenPose>,
    pub counter_text: String,
    /// Counter value over its target, in [0, 1].
    pub counter_fill: f64,
    pub readout_label: String,
    pub readout_tone: ReadoutTone,
    /// Newest first.
    pub chips: Vec<MultiplierTier>,
    pub speed: SpeedMode,
    pub bet_amount: f64,
    pub busy: bool,
}

/// Token radius on the reference canvas, before the pose scale.
pub const TOKEN_RADIUS: f64 = 32.0;

impl RevealView {
    pub fn from_stage<H: HapticSink>(stage: &RevealStage<H>, bet_amount: f64) -> Self {
        let token = stage.token();
        let canvas = token.canvas();
        let background = token.background();
        let frame = token.frame();
        let counter = stage.counter();
        let readout = stage.readout();
        let counter_fill = if counter.target() > 0.0 {
            (counter.value() / counter.target()).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            canvas_scale: canvas.scale(),
            tiles: background_tiles(frame.background_offset, background.tile_width, canvas.width),
            tile_width: background.tile_width,
            tile_height: background.tile_height,
            token: frame.pose,
            counter_text: counter.display(),
            counter_fill,
            readout_label: readout.label(),
            readout_tone: readout.tone(),
            chips: stage
                .history()
                .recent(stage.config().history.display_limit)
                .into_iter()
                .map(|entry| entry.tier())
                .collect(),
            speed: stage.speed().get(),
            bet_amount,
            busy: stage.is_busy(),
        }
    }

    /// Window title text.
    pub fn title(&self) -> String {
        format!(
            "Win Reveal | {} | {} | bet {} | {}",
            self.counter_text,
            self.readout_label,
            win_reveal::format_amount(self.bet_amount),
            self.speed.label()
        )
    }
}
