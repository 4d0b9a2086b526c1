use crate::foundation::core::{Line, Point};

/// Relative tolerance on the cross product below which two directions count as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// Intersection of the infinite lines carrying `a` and `b`.
///
/// Returns `None` when either segment is degenerate or the lines are parallel (including
/// coincident lines, which have no unique crossing point).
pub fn line_intersection(a: Line, b: Line) -> Option<Point> {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let scale = da.hypot() * db.hypot();
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    if da.cross(db).abs() <= PARALLEL_EPS * scale {
        return None;
    }
    a.crossing_point(b).filter(|p| p.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/intersect.rs"]
mod tests;
