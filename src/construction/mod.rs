pub(crate) mod action;
pub(crate) mod concept;
pub(crate) mod eight_point;
pub(crate) mod palette;
pub(crate) mod script;
pub(crate) mod shape;
pub(crate) mod six_point;

use crate::{
    construction::{
        action::Action,
        palette::{Palette, StarConfig},
        script::{ConstructionScript, STAR_ID, ScriptBuilder},
        shape::{DOT_RADIUS, Geometry, ShapeStyle, TextBlock},
    },
    foundation::{
        color::Color,
        core::{Point, Rect},
        error::{StellateError, StellateResult},
    },
};

/// Which construction to script.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StarKind {
    /// Hexagram from two overlapping triangles.
    #[value(name = "six")]
    SixPoint,
    /// Octagram from two overlapping squares.
    #[value(name = "eight")]
    EightPoint,
    /// Short sketch of the octagram idea without the compass work.
    #[value(name = "concept")]
    Concept,
}

impl StarKind {
    pub const ALL: [StarKind; 3] = [Self::SixPoint, Self::EightPoint, Self::Concept];

    pub fn default_config(self) -> StarConfig {
        match self {
            Self::SixPoint => StarConfig {
                radius: 3.0,
                palette: Palette::default(),
            },
            Self::EightPoint => StarConfig {
                radius: 2.0,
                palette: Palette::default(),
            },
            Self::Concept => StarConfig {
                radius: 2.0,
                palette: Palette::sketch(),
            },
        }
    }

    /// Short name used for file names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::SixPoint => "six_point",
            Self::EightPoint => "eight_point",
            Self::Concept => "concept",
        }
    }
}

/// Script the construction of `kind` with the given radius and palette.
#[tracing::instrument(skip(config), fields(radius = config.radius))]
pub fn build_script(kind: StarKind, config: &StarConfig) -> StellateResult<ConstructionScript> {
    if !(config.radius.is_finite() && config.radius > 0.0) {
        return Err(StellateError::invalid_argument(format!(
            "radius must be finite and > 0, got {}",
            config.radius
        )));
    }
    match kind {
        StarKind::SixPoint => six_point::script(config),
        StarKind::EightPoint => eight_point::script(config),
        StarKind::Concept => concept::script(config),
    }
}

pub(crate) const HUGE_TEXT: f64 = 0.62;
pub(crate) const LARGE_TEXT: f64 = 0.42;
/// Dots marking the finished star's vertices.
pub(crate) const VERTEX_DOT_RADIUS: f64 = DOT_RADIUS * 0.75;
/// Radius of the disc behind a point label.
pub(crate) const LABEL_RADIUS: f64 = 0.16;
/// Half-width of the number plane.
pub(crate) const PLANE_EXTENT: f64 = 4.0;

pub(crate) fn plane(b: &mut ScriptBuilder, color: Color) -> StellateResult<()> {
    b.shape(
        "plane",
        Geometry::Plane {
            x_range: (-PLANE_EXTENT, PLANE_EXTENT),
            y_range: (-PLANE_EXTENT, PLANE_EXTENT),
        },
        ShapeStyle::stroke(color).with_stroke_width(0.02).z(-10),
    )?;
    Ok(())
}

pub(crate) fn text(anchor: Point, text: &str, size: f64, bold: bool, italic: bool) -> Geometry {
    Geometry::Text(TextBlock {
        anchor,
        text: text.to_string(),
        size,
        bold,
        italic,
        serif: true,
        wrap: None,
    })
}

/// Register `howto` above and `title` below the star, and script the title card prelude.
pub(crate) fn title_card(b: &mut ScriptBuilder, name: &str) -> StellateResult<()> {
    let star = Geometry::Polygon(b.star().outline.vertices().to_vec());
    let bounds: Rect = star.bounds();
    let ink = b.config().palette.star;

    b.shape(
        "howto",
        text(
            Point::new(0.0, bounds.y1 + 0.5 + LARGE_TEXT * 0.6),
            "how to draw a",
            LARGE_TEXT,
            false,
            true,
        ),
        ShapeStyle::filled(ink),
    )?;
    b.shape(
        "title",
        text(
            Point::new(0.0, bounds.y0 - 0.5 - HUGE_TEXT * 0.6),
            name,
            HUGE_TEXT,
            true,
            false,
        ),
        ShapeStyle::filled(ink),
    )?;
    b.shape(STAR_ID, star, ShapeStyle::stroke(ink).with_fill(ink, 1.0))?;

    b.instant([
        Action::add("title"),
        Action::add("howto"),
        Action::add(STAR_ID),
    ])?;
    b.wait(2.0)?;
    b.play([
        Action::fade_out("title"),
        Action::fade_out("howto"),
        Action::fade_out(STAR_ID),
        Action::fade_in("plane"),
    ])?;
    b.wait(1.0)?;
    Ok(())
}

/// Dots of radius `radius` at `points`, registered as `{prefix}_{i}`.
pub(crate) fn dots(
    b: &mut ScriptBuilder,
    prefix: &str,
    points: &[Point],
    radius: f64,
    color: Color,
) -> StellateResult<Vec<String>> {
    let mut ids = Vec::with_capacity(points.len());
    for (i, &center) in points.iter().enumerate() {
        let id = format!("{prefix}_{i}");
        b.shape(&id, Geometry::Dot { center, radius }, ShapeStyle::filled(color))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Labeled discs at `points`, registered as `label_{i}`.
pub(crate) fn labels(
    b: &mut ScriptBuilder,
    points: &[Point],
    names: impl IntoIterator<Item = String>,
) -> StellateResult<Vec<String>> {
    let palette = b.config().palette.clone();
    let mut ids = Vec::with_capacity(points.len());
    for (i, (&center, label)) in points.iter().zip(names).enumerate() {
        let id = format!("label_{i}");
        b.shape(
            &id,
            Geometry::LabeledDot {
                center,
                radius: LABEL_RADIUS,
                label,
            },
            ShapeStyle::filled(palette.label_fill).with_ink(palette.label_ink),
        )?;
        ids.push(id);
    }
    Ok(ids)
}

/// One action per id.
pub(crate) fn each<'a>(
    ids: impl IntoIterator<Item = &'a String>,
    f: impl Fn(&str) -> Action,
) -> Vec<Action> {
    ids.into_iter().map(|id| f(id.as_str())).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/construction/scripts.rs"]
mod tests;
