use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::{
        color::Color,
        error::{StellateError, StellateResult},
    },
    render::{FrameRGBA, settings::RenderSettings},
};

/// Rasterizes scene SVG documents over a prepared backdrop.
///
/// The backdrop (clear color plus optional paper image) is composed once and cloned per frame.
pub struct Rasterizer {
    options: usvg::Options<'static>,
    base: resvg::tiny_skia::Pixmap,
}

impl Rasterizer {
    /// `backdrop` replaces both the clear color and the background image when set.
    pub fn new(settings: &RenderSettings, backdrop: Option<Color>) -> StellateResult<Self> {
        settings.validate()?;
        let (w, h) = (settings.canvas.width, settings.canvas.height);

        let mut base = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| StellateError::render(format!("failed to allocate {w}x{h} pixmap")))?;
        let [r, g, b, a] = backdrop.unwrap_or(settings.clear).to_rgba8();
        base.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

        if backdrop.is_none()
            && let Some(path) = &settings.background
        {
            let paper = load_background(path, h)?;
            let x = (i64::from(w) - i64::from(paper.width())) / 2;
            base.draw_pixmap(
                x as i32,
                0,
                paper.as_ref(),
                &resvg::tiny_skia::PixmapPaint::default(),
                resvg::tiny_skia::Transform::identity(),
                None,
            );
        }

        let options = usvg::Options {
            fontdb: build_fontdb(settings.fonts_dir.as_deref()),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };

        Ok(Self { options, base })
    }

    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    /// Returns premultiplied RGBA8 pixels.
    pub fn rasterize(&self, svg: &str) -> StellateResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| StellateError::render(format!("parse scene svg: {e}")))?;
        let mut pixmap = self.base.clone();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(FrameRGBA {
            width: pixmap.width(),
            height: pixmap.height(),
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

/// Decode `path`, scale it to `height` keeping its aspect ratio and premultiply.
fn load_background(path: &Path, height: u32) -> StellateResult<resvg::tiny_skia::Pixmap> {
    let img = image::open(path)
        .with_context(|| format!("open background image '{}'", path.display()))?
        .to_rgba8();
    if img.height() == 0 || img.width() == 0 {
        return Err(StellateError::validation(format!(
            "background image '{}' is empty",
            path.display()
        )));
    }
    let width = ((u64::from(img.width()) * u64::from(height)) / u64::from(img.height())).max(1);
    let width = u32::try_from(width)
        .map_err(|_| StellateError::validation("background image is too wide"))?;
    let scaled = image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle);

    let mut data = scaled.into_raw();
    premultiply_rgba8_in_place(&mut data);
    let size = resvg::tiny_skia::IntSize::from_wh(width, height)
        .ok_or_else(|| StellateError::render("invalid background size"))?;
    resvg::tiny_skia::Pixmap::from_vec(data, size)
        .ok_or_else(|| StellateError::render("failed to build background pixmap"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

/// Straight-alpha copy of a premultiplied frame, for PNG output.
pub fn demultiply_rgba8(rgba: &[u8]) -> Vec<u8> {
    let mut out = rgba.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

fn build_fontdb(fonts_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = fonts_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    tracing::debug!(faces = db.len(), "font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "fonts directory is not readable");
        return;
    };
    for entry in rd.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if path.is_file() && matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc") {
            if let Err(e) = db.load_font_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
            }
        }
    }
}

/// Resolve CSS families in order, then fall back to generic serif/sans so captions always render.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::Serif);
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
