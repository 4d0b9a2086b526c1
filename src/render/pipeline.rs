use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    animation::{state::SceneState, timeline::Timeline},
    construction::script::ConstructionScript,
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path},
    foundation::{
        core::{FrameIndex, FrameRange, SceneFrame},
        error::{StellateError, StellateResult},
    },
    render::{
        FrameRGBA,
        raster::{Rasterizer, demultiply_rgba8},
        settings::RenderSettings,
        svg::scene_svg,
    },
};

/// Timeline + SVG writer + rasterizer for one script and one set of render settings.
///
/// Build it once and ask for as many frames as needed; the font database and backdrop are shared
/// between frames.
pub struct FrameRenderer<'a> {
    timeline: Timeline<'a>,
    frame: SceneFrame,
    raster: Rasterizer,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(script: &'a ConstructionScript, settings: &RenderSettings) -> StellateResult<Self> {
        let frame = settings.scene_frame()?;
        let timeline = Timeline::new(script, settings.fps)?;
        let raster = Rasterizer::new(settings, script.backdrop)?;
        Ok(Self {
            timeline,
            frame,
            raster,
        })
    }

    pub fn timeline(&self) -> &Timeline<'a> {
        &self.timeline
    }

    pub fn svg_at(&self, frame: FrameIndex) -> StellateResult<String> {
        let state = self.timeline.state_at(frame)?;
        self.svg_of(&state)
    }

    pub fn svg_of(&self, state: &SceneState) -> StellateResult<String> {
        scene_svg(self.timeline.script(), state, self.frame)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn render_frame(&self, frame: FrameIndex) -> StellateResult<FrameRGBA> {
        self.raster.rasterize(&self.svg_at(frame)?)
    }

    pub fn render_state(&self, state: &SceneState) -> StellateResult<FrameRGBA> {
        self.raster.rasterize(&self.svg_of(state)?)
    }
}

/// Render a single frame of `script`.
///
/// This is the one-shot API; prefer [`FrameRenderer`] when rendering many frames.
/// Returns **premultiplied** RGBA8 pixels.
pub fn render_frame(
    script: &ConstructionScript,
    frame: FrameIndex,
    settings: &RenderSettings,
) -> StellateResult<FrameRGBA> {
    FrameRenderer::new(script, settings)?.render_frame(frame)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    /// Frames whose SVG matched the previous frame and reused its pixels.
    pub frames_elided: u64,
}

/// Render a range of frames (inclusive start, exclusive end).
pub fn render_frames(
    script: &ConstructionScript,
    range: FrameRange,
    settings: &RenderSettings,
) -> StellateResult<(Vec<FrameRGBA>, RenderStats)> {
    if range.is_empty() {
        return Err(StellateError::validation("render range must be non-empty"));
    }
    let renderer = FrameRenderer::new(script, settings)?;
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let stats = for_each_frame(&renderer, range, |frame| {
        out.push(frame.clone());
        Ok(())
    })?;
    Ok((out, stats))
}

/// Drive `sink` with every frame in `range`, reusing the previous raster when the scene is static.
fn for_each_frame(
    renderer: &FrameRenderer<'_>,
    range: FrameRange,
    mut sink: impl FnMut(&FrameRGBA) -> StellateResult<()>,
) -> StellateResult<RenderStats> {
    let mut stats = RenderStats::default();
    let mut last: Option<(String, FrameRGBA)> = None;
    for f in range.start.0..range.end.0 {
        let svg = renderer.svg_at(FrameIndex(f))?;
        stats.frames_total += 1;
        if let Some((prev, frame)) = &last
            && *prev == svg
        {
            stats.frames_elided += 1;
            sink(frame)?;
            continue;
        }
        let frame = renderer.raster.rasterize(&svg)?;
        stats.frames_rendered += 1;
        sink(&frame)?;
        last = Some((svg, frame));
    }
    Ok(stats)
}

/// Write one PNG per step snapshot (plus the post-title state) into `out_dir`.
///
/// Files are named `NN_<label>.png` with `00_prelude.png` first.
#[tracing::instrument(skip(script, settings), fields(kind = ?script.kind))]
pub fn render_stills(
    script: &ConstructionScript,
    settings: &RenderSettings,
    out_dir: &Path,
) -> StellateResult<Vec<PathBuf>> {
    let renderer = FrameRenderer::new(script, settings)?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory '{}'", out_dir.display()))?;

    let snapshots = script.snapshots()?;
    let mut written = Vec::with_capacity(snapshots.len());
    for (i, snap) in snapshots.iter().enumerate() {
        let path = out_dir.join(format!("{i:02}_{}.png", snap.label));
        save_png(&renderer.render_state(&snap.state)?, &path)?;
        tracing::debug!(path = %path.display(), "wrote still");
        written.push(path);
    }
    Ok(written)
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frames to encode; `None` means the whole timeline.
    pub range: Option<FrameRange>,
    /// Background color used when flattening alpha for encoding.
    pub bg_rgba: [u8; 4],
    /// Overwrite `out_path` if it exists.
    pub overwrite: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: None,
            bg_rgba: [0, 0, 0, 255],
            overwrite: true,
        }
    }
}

/// Render the animation to an MP4 by invoking the system `ffmpeg` binary.
///
/// `ffmpeg` must be installed and on `PATH`. This function checks for it up front and returns an
/// error if it is not available. MP4 output requires integer fps (`fps.den == 1`) and an even
/// canvas.
#[tracing::instrument(skip(script, out_path, opts, settings), fields(kind = ?script.kind, out = %out_path.as_ref().display()))]
pub fn render_to_mp4(
    script: &ConstructionScript,
    out_path: impl AsRef<Path>,
    opts: RenderToMp4Opts,
    settings: &RenderSettings,
) -> StellateResult<RenderStats> {
    let fps = if settings.fps.den == 1 {
        settings.fps.num
    } else {
        return Err(StellateError::validation(
            "render_to_mp4 requires integer fps (fps.den == 1)",
        ));
    };

    let renderer = FrameRenderer::new(script, settings)?;
    let total = renderer.timeline().duration_frames();
    let range = opts
        .range
        .unwrap_or(FrameRange::new(FrameIndex(0), FrameIndex(total))?);
    if range.end.0 > total {
        return Err(StellateError::validation(
            "render_to_mp4 range must be within the animation duration",
        ));
    }
    if range.is_empty() {
        return Err(StellateError::validation("render_to_mp4 range must be non-empty"));
    }

    if !is_ffmpeg_on_path() {
        return Err(StellateError::render(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }

    let cfg = EncodeConfig {
        width: settings.canvas.width,
        height: settings.canvas.height,
        fps,
        out_path: out_path.as_ref().to_path_buf(),
        overwrite: opts.overwrite,
    };
    let mut enc = FfmpegEncoder::new(cfg, opts.bg_rgba)?;

    let step = (range.len_frames() / 10).max(1);
    let mut encoded = 0u64;
    let stats = for_each_frame(&renderer, range, |frame| {
        enc.encode_frame(frame)?;
        encoded += 1;
        if encoded.is_multiple_of(step) {
            tracing::info!(encoded, total = range.len_frames(), "encoding");
        }
        Ok(())
    })?;
    enc.finish()?;

    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "mp4 written"
    );
    Ok(stats)
}

/// Save a frame as a straight-alpha PNG, creating parent directories.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> StellateResult<()> {
    ensure_parent_dir(path)?;
    let data = if frame.premultiplied {
        demultiply_rgba8(&frame.data)
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
