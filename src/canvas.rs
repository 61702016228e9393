//! Canvas geometry: reference sizing and the scrolling background.

use serde::{Deserialize, Serialize};

/// Width of the canvas the motion constants were authored against.
pub const REFERENCE_WIDTH: f64 = 358.0;
/// Height of the canvas the motion constants were authored against.
pub const REFERENCE_HEIGHT: f64 = 412.0;

/// Current drawable size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::reference()
    }
}

impl CanvasSize {
    /// Builds a size, mapping negative or non-finite dimensions to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_dimension(width),
            height: sanitize_dimension(height),
        }
    }

    pub const fn reference() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
        }
    }

    /// Size for a container of `width`, keeping the reference aspect ratio.
    pub fn fit_width(width: f64) -> Self {
        let width = sanitize_dimension(width);
        Self {
            width,
            height: width * REFERENCE_HEIGHT / REFERENCE_WIDTH,
        }
    }

    /// Ratio of this canvas to the reference canvas.
    ///
    /// Uses the tighter axis so a letterboxed container never overflows.
    pub fn scale(&self) -> f64 {
        (self.width / REFERENCE_WIDTH).min(self.height / REFERENCE_HEIGHT)
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Scrolling background tunables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Offset advance per frame, in pixels.
    pub speed: f64,
    pub tile_width: f64,
    pub tile_height: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            tile_width: 499.0,
            tile_height: 364.0,
        }
    }
}

/// Left edges of the background tiles covering `canvas_width`.
///
/// One extra tile on each side keeps the seam off-screen while scrolling.
pub fn background_tiles(offset: f64, tile_width: f64, canvas_width: f64) -> Vec<f64> {
    if tile_width.is_nan()
        || tile_width <= 0.0
        || !offset.is_finite()
        || !canvas_width.is_finite()
    {
        return Vec::new();
    }
    let shift = offset.rem_euclid(tile_width);
    let repeats = (canvas_width.max(0.0) / tile_width).ceil() as i64 + 2;
    (-1..repeats)
        .map(|index| index as f64 * tile_width - shift)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_canvas_has_unit_scale() {
        assert_eq!(CanvasSize::reference().scale(), 1.0);
        assert_eq!(CanvasSize::fit_width(716.0).scale(), 2.0);
    }

    #[test]
    fn test_fit_width_keeps_aspect() {
        let size = CanvasSize::fit_width(179.0);
        assert_eq!(size.height, 206.0);
    }

    #[test]
    fn test_invalid_dimensions_collapse_to_zero() {
        let size = CanvasSize::new(-20.0, f64::NAN);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
        assert_eq!(size.scale(), 0.0);
    }

    #[test]
    fn test_background_tiles_cover_canvas() {
        let tiles = background_tiles(0.0, 100.0, 250.0);
        assert_eq!(tiles, vec![-100.0, 0.0, 100.0, 200.0, 300.0, 400.0]);

        let shifted = background_tiles(130.0, 100.0, 250.0);
        assert_eq!(shifted.first().copied(), Some(-130.0));
    }

    #[test]
    fn test_background_tiles_reject_degenerate_tile() {
        assert!(background_tiles(10.0, 0.0, 300.0).is_empty());
    }
}
