use std::fmt::Write as _;

use kurbo::{ParamCurve as _, ParamCurveArclen as _};

use crate::{
    animation::state::{SceneState, ShapeState},
    construction::{
        script::ConstructionScript,
        shape::{Geometry, Shape, TextBlock},
    },
    foundation::{
        color::Color,
        core::{Affine, BezPath, Point, SceneFrame, Vec2},
        error::{StellateError, StellateResult},
    },
};

const ARCLEN_ACCURACY: f64 = 1e-3;
const SERIF: &str = "Palatino Linotype, TeX Gyre Pagella, Palatino, P052, serif";
const SANS: &str = "DejaVu Sans, Helvetica, Arial, sans-serif";

/// Extra scale of an indicated shape at full emphasis.
const INDICATE_SCALE: f64 = 0.5;
const FLASH_RAYS: usize = 12;
/// Flash ray length and gap from the dot edge, in scene units.
const FLASH_LENGTH: f64 = 0.3;
const FLASH_GAP: f64 = 0.1;

/// Prefix of `path` covering `fraction` of its arclength.
pub fn trim_path(path: &BezPath, fraction: f64) -> BezPath {
    if fraction >= 1.0 {
        return path.clone();
    }
    if fraction <= 0.0 {
        return BezPath::new();
    }
    let segs: Vec<_> = path.segments().collect();
    let lengths: Vec<f64> = segs.iter().map(|s| s.arclen(ARCLEN_ACCURACY)).collect();
    let mut remaining = fraction * lengths.iter().sum::<f64>();

    let mut out = Vec::with_capacity(segs.len());
    for (seg, len) in segs.into_iter().zip(lengths) {
        if remaining >= len {
            out.push(seg);
            remaining -= len;
            continue;
        }
        if remaining > 0.0 {
            let t = seg.inv_arclen(remaining, ARCLEN_ACCURACY);
            out.push(seg.subsegment(0.0..t));
        }
        break;
    }
    BezPath::from_path_segments(out.into_iter())
}

pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum()
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Writes one scene state as a standalone SVG document in canvas pixels.
pub struct SvgWriter<'a> {
    script: &'a ConstructionScript,
    frame: SceneFrame,
    to_canvas: Affine,
    ppu: f64,
    out: String,
}

impl<'a> SvgWriter<'a> {
    pub fn new(script: &'a ConstructionScript, frame: SceneFrame) -> Self {
        Self {
            script,
            frame,
            to_canvas: frame.to_canvas(),
            ppu: frame.px_per_unit(),
            out: String::new(),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn write(mut self, state: &SceneState) -> StellateResult<String> {
        let script = self.script;
        let (w, h) = (self.frame.canvas.width, self.frame.canvas.height);
        self.push(format_args!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        ))?;
        for shape in script.shapes.paint_order() {
            let Some(s) = state.shape(&shape.id) else {
                return Err(StellateError::missing_dependency(format!(
                    "shape '{}' has no scene state",
                    shape.id
                )));
            };
            if s.is_visible() {
                self.shape(shape, s)?;
            }
        }
        for caption in [&state.outgoing_caption, &state.caption].into_iter().flatten() {
            if caption.opacity > 0.0 {
                let layout = &script.caption;
                let block = TextBlock {
                    anchor: layout.anchor,
                    text: caption.text.clone(),
                    size: layout.size,
                    bold: false,
                    italic: true,
                    serif: true,
                    wrap: Some(layout.wrap),
                };
                let ink = script.config.palette.instruction;
                self.text(&block, ink, caption.opacity, Affine::IDENTITY)?;
            }
        }
        self.out.push_str("</svg>");
        Ok(self.out)
    }

    fn push(&mut self, args: std::fmt::Arguments<'_>) -> StellateResult<()> {
        self.out
            .write_fmt(args)
            .map_err(|e| StellateError::render(format!("svg write failed: {e}")))
    }

    /// Scale about the shape's center while indicated.
    fn emphasis(&self, shape: &Shape, s: &ShapeState) -> Affine {
        if s.emphasis <= 0.0 {
            return Affine::IDENTITY;
        }
        let c = shape.geometry.bounds().center().to_vec2();
        Affine::translate(c) * Affine::scale(1.0 + INDICATE_SCALE * s.emphasis) * Affine::translate(-c)
    }

    fn tint(&self, color: Color, s: &ShapeState) -> Color {
        color.lerp(self.script.config.palette.indicate, s.emphasis)
    }

    fn shape(&mut self, shape: &Shape, s: &ShapeState) -> StellateResult<()> {
        let style = &shape.style;
        let emphasis = self.emphasis(shape, s);
        match &shape.geometry {
            Geometry::Plane { x_range, y_range } => self.plane(*x_range, *y_range, shape, s),
            Geometry::Dot { center, radius } => {
                let center = self.morphed_center(*center, s)?;
                let fill = self.tint(style.fill.unwrap_or(Color::BLACK), s);
                let r = radius * (1.0 + INDICATE_SCALE * s.emphasis);
                self.disc(center, r, fill, s.fill_opacity)?;
                if let Some(p) = s.flash {
                    self.flash(center, *radius, style.fill.unwrap_or(Color::BLACK), p)?;
                }
                Ok(())
            }
            Geometry::LabeledDot {
                center,
                radius,
                label,
            } => {
                let r = radius * (1.0 + INDICATE_SCALE * s.emphasis);
                let fill = self.tint(style.fill.unwrap_or(Color::WHITE), s);
                self.disc(*center, r, fill, s.fill_opacity)?;
                let ink = style.ink.unwrap_or(Color::BLACK);
                let block = TextBlock {
                    anchor: *center,
                    text: label.clone(),
                    size: r * 1.2,
                    bold: false,
                    italic: false,
                    serif: false,
                    wrap: None,
                };
                self.text(&block, ink, s.fill_opacity, Affine::IDENTITY)
            }
            Geometry::Text(block) => {
                let ink = self.tint(style.fill.or(style.ink).unwrap_or(Color::BLACK), s);
                self.text(block, ink, s.fill_opacity, emphasis)
            }
            geometry => {
                let Some(outline) = geometry.outline() else {
                    return Ok(());
                };
                let full = (self.to_canvas * emphasis) * outline;
                let drawn = trim_path(&full, s.drawn);
                if drawn.elements().is_empty() {
                    return Ok(());
                }
                let mut attrs = String::new();
                match style.fill {
                    Some(fill) if geometry.is_closed() && s.fill_opacity > 0.0 => {
                        write!(
                            attrs,
                            r#" fill="{}" fill-opacity="{}""#,
                            fill.to_svg_rgb(),
                            num(s.fill_opacity * fill.a)
                        )
                        .map_err(|e| StellateError::render(e.to_string()))?;
                    }
                    _ => attrs.push_str(r#" fill="none""#),
                }
                if let Some(stroke) = style.stroke
                    && s.opacity > 0.0
                {
                    let stroke = self.tint(stroke, s);
                    write!(
                        attrs,
                        r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
                        stroke.to_svg_rgb(),
                        num(s.opacity * stroke.a),
                        num(style.stroke_width * self.ppu)
                    )
                    .map_err(|e| StellateError::render(e.to_string()))?;
                    if let Some(dash) = style.dash {
                        let (on, off) = dash.pattern(path_length(&full));
                        write!(attrs, r#" stroke-dasharray="{} {}""#, num(on), num(off))
                            .map_err(|e| StellateError::render(e.to_string()))?;
                    }
                }
                self.push(format_args!(
                    r#"<path id="{}" d="{}"{attrs}/>"#,
                    escape_xml(&shape.id),
                    drawn.to_svg()
                ))
            }
        }
    }

    fn morphed_center(&self, center: Point, s: &ShapeState) -> StellateResult<Point> {
        let Some(morph) = &s.morph else {
            return Ok(center);
        };
        let target = self
            .script
            .shapes
            .require(&morph.into)?
            .geometry
            .dot_center()
            .ok_or_else(|| {
                StellateError::validation(format!("morph target '{}' is not a dot", morph.into))
            })?;
        Ok(center.lerp(target, morph.progress))
    }

    fn disc(&mut self, center: Point, radius: f64, fill: Color, opacity: f64) -> StellateResult<()> {
        let c = self.to_canvas * center;
        self.push(format_args!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
            num(c.x),
            num(c.y),
            num(radius * self.ppu),
            fill.to_svg_rgb(),
            num(opacity * fill.a)
        ))
    }

    /// Rays shoot outward in the first half of the flash and retract in the second.
    fn flash(&mut self, center: Point, radius: f64, color: Color, p: f64) -> StellateResult<()> {
        let inner = radius + FLASH_GAP;
        let head = inner + FLASH_LENGTH * (2.0 * p).min(1.0);
        let tail = inner + FLASH_LENGTH * (2.0 * p - 1.0).max(0.0);
        if head - tail <= 1e-9 {
            return Ok(());
        }
        let mut path = BezPath::new();
        for k in 0..FLASH_RAYS {
            let dir = Vec2::from_angle(k as f64 * std::f64::consts::TAU / FLASH_RAYS as f64);
            path.move_to(center + dir * tail);
            path.line_to(center + dir * head);
        }
        let path = self.to_canvas * path;
        self.push(format_args!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            path.to_svg(),
            color.to_svg_rgb(),
            num(0.03 * self.ppu)
        ))
    }

    fn plane(
        &mut self,
        x_range: (f64, f64),
        y_range: (f64, f64),
        shape: &Shape,
        s: &ShapeState,
    ) -> StellateResult<()> {
        let color = shape.style.stroke.unwrap_or(Color::BLACK);
        let width = shape.style.stroke_width * self.ppu;
        let mut grid = BezPath::new();
        let mut axes = BezPath::new();
        let (x0, x1) = (x_range.0.ceil() as i64, x_range.1.floor() as i64);
        let (y0, y1) = (y_range.0.ceil() as i64, y_range.1.floor() as i64);
        for x in x0..=x1 {
            let target = if x == 0 { &mut axes } else { &mut grid };
            target.move_to((x as f64, y_range.0));
            target.line_to((x as f64, y_range.1));
        }
        for y in y0..=y1 {
            let target = if y == 0 { &mut axes } else { &mut grid };
            target.move_to((x_range.0, y as f64));
            target.line_to((x_range.1, y as f64));
        }
        let grid = self.to_canvas * grid;
        let axes = self.to_canvas * axes;
        self.push(format_args!(
            r#"<g id="{}" fill="none" stroke="{}" opacity="{}"><path d="{}" stroke-opacity="0.25" stroke-width="{}"/><path d="{}" stroke-width="{}"/></g>"#,
            escape_xml(&shape.id),
            color.to_svg_rgb(),
            num(s.opacity),
            grid.to_svg(),
            num(width),
            axes.to_svg(),
            num(width * 2.0)
        ))
    }

    fn text(&mut self, block: &TextBlock, ink: Color, opacity: f64, emphasis: Affine) -> StellateResult<()> {
        let lines = block.lines();
        if lines.is_empty() || opacity <= 0.0 {
            return Ok(());
        }
        let scale = emphasis.as_coeffs()[0];
        let size = block.size * scale * self.ppu;
        let line_height = block.line_height() * scale * self.ppu;
        let anchor = self.to_canvas * (emphasis * block.anchor);
        // Baseline of the first line so that the block is vertically centered on the anchor.
        let first = anchor.y - line_height * (lines.len() as f64 - 1.0) / 2.0 + size * 0.35;

        let family = if block.serif { SERIF } else { SANS };
        let weight = if block.bold { "bold" } else { "normal" };
        let style = if block.italic { "italic" } else { "normal" };
        self.push(format_args!(
            r#"<text x="{}" y="{}" font-family="{family}" font-size="{}" font-weight="{weight}" font-style="{style}" text-anchor="middle" fill="{}" fill-opacity="{}">"#,
            num(anchor.x),
            num(first),
            num(size),
            ink.to_svg_rgb(),
            num(opacity * ink.a)
        ))?;
        for (i, line) in lines.iter().enumerate() {
            self.push(format_args!(
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                num(anchor.x),
                num(first + line_height * i as f64),
                escape_xml(line)
            ))?;
        }
        self.out.push_str("</text>");
        Ok(())
    }
}

/// Render `state` of `script` as an SVG document.
pub fn scene_svg(
    script: &ConstructionScript,
    state: &SceneState,
    frame: SceneFrame,
) -> StellateResult<String> {
    SvgWriter::new(script, frame).write(state)
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
