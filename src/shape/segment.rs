//! Definition of the segment shape.

use crate::math::{Point, Real, Vector};

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point,
    /// The segment second point.
    pub b: Point,
}

/// Logical description of the location of a point on a segment.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SegmentPointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on the segment interior.
    OnEdge([Real; 2]),
}

impl SegmentPointLocation {
    /// The barycentric coordinates corresponding to this point location.
    pub fn barycentric_coordinates(&self) -> [Real; 2] {
        let mut bcoords = [0.0; 2];

        match self {
            SegmentPointLocation::OnVertex(i) => bcoords[*i as usize] = 1.0,
            SegmentPointLocation::OnEdge(uv) => {
                bcoords[0] = uv[0];
                bcoords[1] = uv[1];
            }
        }

        bcoords
    }

    /// The parameter `t` such that the located point is `a + (b - a) * t`.
    pub fn parameter(&self) -> Real {
        self.barycentric_coordinates()[1]
    }
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point, b: Point) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment scaled by its length.
    ///
    /// Points from `self.a` toward `self.b`.
    pub fn scaled_direction(&self) -> Vector {
        self.b - self.a
    }

    /// The length of this segment.
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// Computes the point at the given location.
    pub fn point_at(&self, location: &SegmentPointLocation) -> Point {
        match *location {
            SegmentPointLocation::OnVertex(0) => self.a,
            SegmentPointLocation::OnVertex(_) => self.b,
            SegmentPointLocation::OnEdge(bcoords) => {
                self.a * bcoords[0] + self.b.coords * bcoords[1]
            }
        }
    }

    /// The point `a + (b - a) * t`.
    #[inline]
    pub fn point_at_parameter(&self, t: Real) -> Point {
        self.a + self.scaled_direction() * t
    }

    /// The (unclamped) parameter of the orthogonal projection of `pt` on the line
    /// supporting this segment.
    ///
    /// Returns `0.0` for a degenerate segment.
    pub fn project_parameter(&self, pt: &Point) -> Real {
        let ab = self.scaled_direction();
        let sq_len = ab.norm_squared();

        if sq_len == 0.0 {
            0.0
        } else {
            (pt - self.a).dot(&ab) / sq_len
        }
    }

    /// The distance between `pt` and the infinite line supporting this segment.
    ///
    /// Falls back to the distance to `self.a` for a degenerate segment.
    pub fn distance_to_line(&self, pt: &Point) -> Real {
        let ab = self.scaled_direction();
        let len = ab.norm();

        if len == 0.0 {
            na::distance(&self.a, pt)
        } else {
            ab.perp(&(pt - self.a)).abs() / len
        }
    }

    /// The distance between `pt` and this segment.
    pub fn distance_to_point(&self, pt: &Point) -> Real {
        let t = self.project_parameter(pt).clamp(0.0, 1.0);
        na::distance(&self.point_at_parameter(t), pt)
    }

    /// This segment with both its vertices multiplied by `factor`.
    pub fn scaled(&self, factor: Real) -> Segment {
        Segment::new(self.a * factor, self.b * factor)
    }
}

impl From<[Point; 2]> for Segment {
    fn from(arr: [Point; 2]) -> Self {
        Segment::new(arr[0], arr[1])
    }
}
