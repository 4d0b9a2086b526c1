use std::collections::BTreeMap;

use kurbo::Shape as _;

use crate::{
    foundation::{
        color::Color,
        core::{BezPath, Circle, Line, Point, Rect},
        error::{StellateError, StellateResult},
    },
    geometry::star::polygon_path,
};

/// Flattening tolerance for curves, in construction-plane units.
pub(crate) const PATH_TOLERANCE: f64 = 1e-3;

/// Dot radius used for reference points.
pub const DOT_RADIUS: f64 = 0.08;

/// Stroke width of construction lines, in construction-plane units.
pub const STROKE_WIDTH: f64 = 0.04;

/// What a shape is, in construction-plane coordinates (y up).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// Unit grid with axes through the origin.
    Plane {
        x_range: (f64, f64),
        y_range: (f64, f64),
    },
    Line(Line),
    Circle(Circle),
    /// Counter-clockwise arc; angles in radians.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    Dot {
        center: Point,
        radius: f64,
    },
    LabeledDot {
        center: Point,
        radius: f64,
        label: String,
    },
    Polygon(Vec<Point>),
    Text(TextBlock),
}

/// A centered block of text. `wrap` is the maximum line length in characters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    pub anchor: Point,
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub serif: bool,
    pub wrap: Option<usize>,
}

impl TextBlock {
    pub fn lines(&self) -> Vec<String> {
        match self.wrap {
            Some(width) => wrap_words(&self.text, width),
            None => self.text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn line_height(&self) -> f64 {
        self.size * 1.25
    }
}

/// Greedy word wrap. Explicit newlines are kept; words longer than `width` get their own line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    out
}

impl Geometry {
    /// Outline path for stroked geometry. Dots, text and the grid have none.
    pub fn outline(&self) -> Option<BezPath> {
        match self {
            Self::Line(line) => {
                let mut p = BezPath::new();
                p.move_to(line.p0);
                p.line_to(line.p1);
                Some(p)
            }
            Self::Circle(c) => Some(c.to_path(PATH_TOLERANCE)),
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let arc = kurbo::Arc::new(
                    *center,
                    kurbo::Vec2::new(*radius, *radius),
                    *start_angle,
                    *sweep,
                    0.0,
                );
                Some(arc.to_path(PATH_TOLERANCE))
            }
            Self::Polygon(points) => Some(polygon_path(points)),
            Self::Plane { .. } | Self::Dot { .. } | Self::LabeledDot { .. } | Self::Text(_) => None,
        }
    }

    /// Whether the outline encloses an area that can be filled.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Circle(_) | Self::Polygon(_))
    }

    pub fn dot_center(&self) -> Option<Point> {
        match self {
            Self::Dot { center, .. } | Self::LabeledDot { center, .. } => Some(*center),
            _ => None,
        }
    }

    /// Approximate bounding box, used for placing titles next to the star.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Plane { x_range, y_range } => {
                Rect::new(x_range.0, y_range.0, x_range.1, y_range.1)
            }
            Self::Dot { center, radius } | Self::LabeledDot { center, radius, .. } => {
                Circle::new(*center, *radius).bounding_box()
            }
            Self::Text(t) => {
                let lines = t.lines();
                let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                let half_w = longest as f64 * t.size * 0.25;
                let half_h = lines.len() as f64 * t.line_height() / 2.0;
                Rect::new(
                    t.anchor.x - half_w,
                    t.anchor.y - half_h,
                    t.anchor.x + half_w,
                    t.anchor.y + half_h,
                )
            }
            other => other
                .outline()
                .map(|p| p.bounding_box())
                .unwrap_or(Rect::ZERO),
        }
    }
}

/// Dash pattern: `count` dashes over the full outline, each `ratio` of its period.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dash {
    pub count: u32,
    pub ratio: f64,
}

impl Dash {
    /// `64 * factor` dashes at a 0.6 dash/period ratio.
    pub fn scaled(factor: f64) -> Self {
        Self {
            count: ((64.0 * factor) as u32).max(1),
            ratio: 0.6,
        }
    }

    /// `(dash, gap)` lengths for an outline of `length`.
    pub fn pattern(self, length: f64) -> (f64, f64) {
        let period = length / f64::from(self.count.max(1));
        (period * self.ratio, period * (1.0 - self.ratio))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeStyle {
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    /// Text color for labels.
    pub ink: Option<Color>,
    pub dash: Option<Dash>,
    pub z: i32,
}

impl ShapeStyle {
    pub fn stroke(color: Color) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: STROKE_WIDTH,
            fill: None,
            fill_opacity: 0.0,
            ink: None,
            dash: None,
            z: 0,
        }
    }

    pub fn filled(color: Color) -> Self {
        Self {
            stroke: None,
            stroke_width: 0.0,
            fill: Some(color),
            fill_opacity: 1.0,
            ink: None,
            dash: None,
            z: 0,
        }
    }

    pub fn dashed(mut self, factor: f64) -> Self {
        self.dash = Some(Dash::scaled(factor));
        self
    }

    pub fn with_fill(mut self, color: Color, opacity: f64) -> Self {
        self.fill = Some(color);
        self.fill_opacity = opacity;
        self
    }

    pub fn with_ink(mut self, color: Color) -> Self {
        self.ink = Some(color);
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    pub id: String,
    pub geometry: Geometry,
    pub style: ShapeStyle,
}

/// Registered shapes in registration order, addressable by id.
#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(transparent)]
pub struct ShapeSet {
    shapes: Vec<Shape>,
    #[serde(skip)]
    index: BTreeMap<String, usize>,
}

impl ShapeSet {
    pub fn insert(&mut self, shape: Shape) -> StellateResult<()> {
        if shape.id.trim().is_empty() {
            return Err(StellateError::validation("shape id must be non-empty"));
        }
        if self.index.contains_key(&shape.id) {
            return Err(StellateError::validation(format!(
                "duplicate shape id '{}'",
                shape.id
            )));
        }
        self.index.insert(shape.id.clone(), self.shapes.len());
        self.shapes.push(shape);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.index.get(id).map(|&i| &self.shapes[i])
    }

    pub fn require(&self, id: &str) -> StellateResult<&Shape> {
        self.get(id).ok_or_else(|| {
            StellateError::missing_dependency(format!("shape '{id}' was never constructed"))
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes in paint order: ascending z, ties broken by registration order.
    pub fn paint_order(&self) -> Vec<&Shape> {
        let mut out: Vec<&Shape> = self.shapes.iter().collect();
        out.sort_by_key(|s| s.style.z);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/construction/shape.rs"]
mod tests;
