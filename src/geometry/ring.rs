use crate::foundation::{
    core::{Circle, Point, Vec2},
    error::{StellateError, StellateResult},
};

/// The point at `angle` radians (counter-clockwise from +x) on the circle around `center`.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

/// `count` points evenly spaced around a circle, starting at `start_angle` (radians) and
/// proceeding counter-clockwise.
///
/// Each point is computed from its own index, so spacing does not drift for large counts.
pub fn points_on_circle(
    center: Point,
    radius: f64,
    count: usize,
    start_angle: f64,
) -> StellateResult<Vec<Point>> {
    validate_circle(center, radius)?;
    if count == 0 {
        return Err(StellateError::invalid_argument(
            "point count must be a positive integer",
        ));
    }
    if !start_angle.is_finite() {
        return Err(StellateError::invalid_argument("start angle must be finite"));
    }

    let step = std::f64::consts::TAU / count as f64;
    Ok((0..count)
        .map(|i| point_on_circle(center, radius, start_angle + step * i as f64))
        .collect())
}

fn validate_circle(center: Point, radius: f64) -> StellateResult<()> {
    if !center.is_finite() {
        return Err(StellateError::invalid_argument("circle center must be finite"));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(StellateError::invalid_argument(format!(
            "circle radius must be positive and finite, got {radius}"
        )));
    }
    Ok(())
}

/// Ordered, circularly indexed points lying on one circle.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PointRing {
    circle: Circle,
    points: Vec<Point>,
}

impl PointRing {
    pub fn new(circle: Circle, count: usize, start_angle: f64) -> StellateResult<Self> {
        let points = points_on_circle(circle.center, circle.radius, count, start_angle)?;
        Ok(Self { circle, points })
    }

    pub fn circle(&self) -> Circle {
        self.circle
    }

    /// Angular distance between neighbours, in radians.
    pub fn angle_step(&self) -> f64 {
        std::f64::consts::TAU / self.points.len() as f64
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point at `index`, wrapping modulo the ring size in both directions.
    pub fn at(&self, index: isize) -> Point {
        let n = self.points.len() as isize;
        self.points[index.rem_euclid(n) as usize]
    }

    /// Every `stride`-th point starting at `offset`, walking once around the ring.
    ///
    /// `every(2, 0)` on a hexagon yields one of the two triangles of the hexagram.
    pub fn every(&self, stride: usize, offset: usize) -> Vec<Point> {
        if stride == 0 {
            return Vec::new();
        }
        (offset..offset + self.points.len())
            .step_by(stride)
            .map(|i| self.at(i as isize))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ring.rs"]
mod tests;
