use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    color::Color,
    core::{Canvas, Fps, SceneFrame},
    error::{StellateError, StellateResult},
};

/// Warm off-white used when no paper texture is given.
pub const PAPER: Color = Color::rgb8(0xF3, 0xEC, 0xDC);

/// Output format and backdrop of a render. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Scene units spanned by the canvas width.
    pub frame_width: f64,
    pub clear: Color,
    /// Image scaled to the canvas height and centered behind the scene.
    pub background: Option<PathBuf>,
    /// Extra `.ttf`/`.otf`/`.ttc` files for captions and titles.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
            fps: Fps { num: 60, den: 1 },
            frame_width: 9.0,
            clear: PAPER,
            background: None,
            fonts_dir: None,
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(s: &str) -> StellateResult<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> StellateResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read render settings '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> StellateResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        self.scene_frame()?;
        if let Some(bg) = &self.background
            && bg.as_os_str().is_empty()
        {
            return Err(StellateError::validation("background path must be non-empty"));
        }
        Ok(())
    }

    pub fn scene_frame(&self) -> StellateResult<SceneFrame> {
        SceneFrame::new(self.canvas, self.frame_width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
