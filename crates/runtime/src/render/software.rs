use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use win_reveal::{MultiplierTier, ReadoutTone};
use winit::window::Window;

use super::backend::RenderBackend;
use crate::view::{RevealView, TOKEN_RADIUS};

/// Trait for the actual drawing logic acting on a framebuffer.
pub trait SoftwareDrawStrategy {
    fn draw(&self, frame: &mut [u8], size: (u32, u32), view: &RevealView);
}

/// Backend that uses `pixels` (software rasterization) to display the frame.
pub struct SoftwareBackend<'a> {
    pixels: Pixels<'a>,
    strategy: Box<dyn SoftwareDrawStrategy>,
}

impl<'a> SoftwareBackend<'a> {
    pub fn new(
        window: Arc<Window>,
        width: u32,
        height: u32,
        strategy: Box<dyn SoftwareDrawStrategy>,
    ) -> Result<Self, String> {
        let surface = SurfaceTexture::new(width, height, window);
        let pixels = Pixels::new(width, height, surface)
            .map_err(|e| format!("failed to create pixel surface: {e}"))?;
        Ok(Self { pixels, strategy })
    }
}

impl<'a> RenderBackend for SoftwareBackend<'a> {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let _ = self.pixels.resize_surface(width, height);
        let _ = self.pixels.resize_buffer(width, height);
    }

    fn render(&mut self, view: &RevealView) -> Result<(), String> {
        let extent = self.pixels.context().texture_extent;
        let frame = self.pixels.frame_mut();
        self.strategy.draw(frame, (extent.width, extent.height), view);

        self.pixels.render().map_err(|e| e.to_string())
    }
}

pub const BACKGROUND_COLOR: [u8; 4] = [18, 20, 38, 255];
pub const TILE_COLORS: [[u8; 4]; 2] = [[28, 32, 60, 255], [34, 38, 72, 255]];
pub const TOKEN_COLOR: [u8; 4] = [236, 190, 60, 255];
pub const TOKEN_MARK_COLOR: [u8; 4] = [120, 80, 20, 255];
pub const COUNTER_TRACK_COLOR: [u8; 4] = [40, 40, 56, 255];
pub const COUNTER_FILL_COLOR: [u8; 4] = [250, 220, 120, 255];

pub fn tone_color(tone: ReadoutTone) -> [u8; 4] {
    match tone {
        ReadoutTone::Gain => [46, 170, 90, 255],
        ReadoutTone::Loss => [200, 60, 60, 255],
        ReadoutTone::Neutral => [110, 110, 120, 255],
    }
}

pub fn tier_color(tier: MultiplierTier) -> [u8; 4] {
    match tier {
        MultiplierTier::Top => [255, 196, 0, 255],
        MultiplierTier::High => [120, 200, 255, 255],
        MultiplierTier::Mid => [150, 120, 255, 255],
        MultiplierTier::Low => [90, 90, 110, 255],
    }
}

const BAR_MARGIN: f64 = 12.0;
const BAR_HEIGHT: f64 = 8.0;
const READOUT_HEIGHT: f64 = 14.0;
const CHIP_SIZE: f64 = 12.0;
const CHIP_GAP: f64 = 4.0;

/// Default implementation of software drawing.
#[derive(Default)]
pub struct BuiltinSoftwareDrawer;

impl SoftwareDrawStrategy for BuiltinSoftwareDrawer {
    fn draw(&self, frame: &mut [u8], size: (u32, u32), view: &RevealView) {
        let (width, height) = size;
        let w = f64::from(width);
        let h = f64::from(height);
        clear(frame, BACKGROUND_COLOR);

        let tile_y = ((h - view.tile_height) / 2.0).max(0.0);
        for (index, x) in view.tiles.iter().enumerate() {
            let rect = RectSpec {
                x: *x,
                y: tile_y,
                width: view.tile_width,
                height: view.tile_height.min(h),
                color: TILE_COLORS[index % 2],
            };
            draw_rect(frame, size, rect);
        }

        if let Some(pose) = view.token {
            let radius = TOKEN_RADIUS * pose.scale;
            draw_circle(frame, size, (pose.x, pose.y), radius, TOKEN_COLOR);
            let mark = (
                pose.x + radius * 0.6 * pose.rotation.cos(),
                pose.y + radius * 0.6 * pose.rotation.sin(),
            );
            draw_circle(frame, size, mark, radius * 0.2, TOKEN_MARK_COLOR);
        }

        let track_width = (w - 2.0 * BAR_MARGIN).max(0.0);
        draw_rect(
            frame,
            size,
            RectSpec {
                x: BAR_MARGIN,
                y: BAR_MARGIN,
                width: track_width,
                height: BAR_HEIGHT,
                color: COUNTER_TRACK_COLOR,
            },
        );
        draw_rect(
            frame,
            size,
            RectSpec {
                x: BAR_MARGIN,
                y: BAR_MARGIN,
                width: track_width * view.counter_fill.clamp(0.0, 1.0),
                height: BAR_HEIGHT,
                color: COUNTER_FILL_COLOR,
            },
        );

        let readout_y = h - BAR_MARGIN - READOUT_HEIGHT;
        draw_rect(
            frame,
            size,
            RectSpec {
                x: BAR_MARGIN,
                y: readout_y,
                width: track_width,
                height: READOUT_HEIGHT,
                color: tone_color(view.readout_tone),
            },
        );

        let chip_y = readout_y - CHIP_GAP - CHIP_SIZE;
        for (index, tier) in view.chips.iter().enumerate() {
            let x = BAR_MARGIN + index as f64 * (CHIP_SIZE + CHIP_GAP);
            if x + CHIP_SIZE > w - BAR_MARGIN {
                break;
            }
            draw_rect(
                frame,
                size,
                RectSpec {
                    x,
                    y: chip_y,
                    width: CHIP_SIZE,
                    height: CHIP_SIZE,
                    color: tier_color(*tier),
                },
            );
        }
    }
}

fn clear(frame: &mut [u8], color: [u8; 4]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

struct RectSpec {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: [u8; 4],
}

/// Clip a half-open span to `[0, limit)` in whole pixels.
fn clip_span(start: f64, length: f64, limit: u32) -> Option<(u32, u32)> {
    if !start.is_finite() || !length.is_finite() || length <= 0.0 {
        return None;
    }
    let lo = start.round().max(0.0);
    let hi = (start + length).round().min(f64::from(limit));
    (hi > lo).then_some((lo as u32, hi as u32))
}

fn draw_rect(frame: &mut [u8], size: (u32, u32), rect: RectSpec) {
    let (width, height) = size;
    let Some((x0, x1)) = clip_span(rect.x, rect.width, width) else {
        return;
    };
    let Some((y0, y1)) = clip_span(rect.y, rect.height, height) else {
        return;
    };
    for row in y0..y1 {
        for col in x0..x1 {
            put_pixel(frame, width, col, row, rect.color);
        }
    }
}

fn draw_circle(
    frame: &mut [u8],
    size: (u32, u32),
    center: (f64, f64),
    radius: f64,
    color: [u8; 4],
) {
    let (width, height) = size;
    let (cx, cy) = center;
    let Some((x0, x1)) = clip_span(cx - radius, radius * 2.0, width) else {
        return;
    };
    let Some((y0, y1)) = clip_span(cy - radius, radius * 2.0, height) else {
        return;
    };
    let r2 = radius * radius;
    for row in y0..y1 {
        for col in x0..x1 {
            let dx = f64::from(col) + 0.5 - cx;
            let dy = f64::from(row) + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                put_pixel(frame, width, col, row, color);
            }
        }
    }
}

fn put_pixel(frame: &mut [u8], width: u32, x: u32, y: u32, color: [u8; 4]) {
    let idx = ((y as usize) * (width as usize) + x as usize) * 4;
    if idx + 4 <= frame.len() {
        frame[idx..idx + 4].copy_from_slice(&color);
    }
}
