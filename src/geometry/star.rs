use crate::{
    foundation::{
        core::{BezPath, Circle, Line, Point},
        error::{StellateError, StellateResult},
    },
    geometry::{intersect::line_intersection, ring::PointRing},
};

/// Inner vertices of the star traced by joining every `interval`-th point of `ring`.
///
/// For side `i` the chord `ring[i] -> ring[i + interval]` is crossed with the chord
/// `ring[i + 1] -> ring[i + 1 - interval]`; indices wrap around the ring. The crossing point lies
/// angularly between `ring[i]` and `ring[i + 1]`, so the result interleaves with the ring.
pub fn star_intersections(
    ring: &PointRing,
    interval: usize,
    sides: usize,
) -> StellateResult<Vec<Point>> {
    if ring.len() < 3 {
        return Err(StellateError::invalid_argument(format!(
            "star needs a ring of at least 3 points, got {}",
            ring.len()
        )));
    }
    if interval == 0 {
        return Err(StellateError::invalid_argument("chord interval must be >= 1"));
    }
    if sides == 0 {
        return Err(StellateError::invalid_argument("side count must be >= 1"));
    }

    let k = interval as isize;
    (0..sides)
        .map(|side| {
            let i = side as isize;
            let a = Line::new(ring.at(i), ring.at(i + k));
            let b = Line::new(ring.at(i + 1), ring.at(i + 1 - k));
            line_intersection(a, b).ok_or(StellateError::NoIntersection { side })
        })
        .collect()
}

/// Star outline: outer ring points alternating with inner chord crossings, in winding order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StarVertexList {
    vertices: Vec<Point>,
}

impl StarVertexList {
    pub fn interleave(outer: &[Point], inner: &[Point]) -> StellateResult<Self> {
        if outer.is_empty() {
            return Err(StellateError::invalid_argument(
                "star outline needs at least one outer point",
            ));
        }
        if outer.len() != inner.len() {
            return Err(StellateError::invalid_argument(format!(
                "outer/inner point counts differ ({} vs {})",
                outer.len(),
                inner.len()
            )));
        }
        let vertices = outer
            .iter()
            .zip(inner)
            .flat_map(|(&o, &i)| [o, i])
            .collect();
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn outer(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().copied().step_by(2)
    }

    pub fn inner(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().copied().skip(1).step_by(2)
    }

    /// Closed outline path in construction-plane coordinates.
    pub fn to_path(&self) -> BezPath {
        polygon_path(&self.vertices)
    }
}

/// Everything a regular `{points/interval}` star construction needs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StarGeometry {
    pub interval: usize,
    pub ring: PointRing,
    pub inner: Vec<Point>,
    pub outline: StarVertexList,
}

impl StarGeometry {
    #[tracing::instrument(level = "debug")]
    pub fn regular(
        center: Point,
        radius: f64,
        points: usize,
        interval: usize,
    ) -> StellateResult<Self> {
        let ring = PointRing::new(Circle::new(center, radius), points, 0.0)?;
        let inner = star_intersections(&ring, interval, points)?;
        let outline = StarVertexList::interleave(ring.points(), &inner)?;
        Ok(Self {
            interval,
            ring,
            inner,
            outline,
        })
    }

    pub fn circle(&self) -> Circle {
        self.ring.circle()
    }
}

pub(crate) fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/star.rs"]
mod tests;
