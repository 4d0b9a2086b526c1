use crate::foundation::error::{StellateError, StellateResult};

pub use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> StellateResult<Self> {
        if start.0 > end.0 {
            return Err(StellateError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> StellateResult<Self> {
        if den == 0 {
            return Err(StellateError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StellateError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Number of frames needed to cover `secs`, rounding up so the last beat is not cut.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        // Guard against 2.0000000001 * 60 style overshoot.
        let frames = secs * self.as_f64();
        (frames - 1e-9).ceil().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Maps construction-plane coordinates (y up, origin at the frame center) to canvas pixels.
///
/// `frame_width` is the number of scene units that span the canvas horizontally; the vertical
/// extent follows from the canvas aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub canvas: Canvas,
    pub frame_width: f64,
}

impl SceneFrame {
    pub fn new(canvas: Canvas, frame_width: f64) -> StellateResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(StellateError::validation("canvas width/height must be > 0"));
        }
        if !frame_width.is_finite() || frame_width <= 0.0 {
            return Err(StellateError::validation("frame_width must be finite and > 0"));
        }
        Ok(Self {
            canvas,
            frame_width,
        })
    }

    pub fn px_per_unit(self) -> f64 {
        f64::from(self.canvas.width) / self.frame_width
    }

    pub fn frame_height(self) -> f64 {
        f64::from(self.canvas.height) / self.px_per_unit()
    }

    pub fn to_canvas(self) -> Affine {
        let s = self.px_per_unit();
        let center = Vec2::new(
            f64::from(self.canvas.width) / 2.0,
            f64::from(self.canvas.height) / 2.0,
        );
        Affine::translate(center) * Affine::scale_non_uniform(s, -s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
