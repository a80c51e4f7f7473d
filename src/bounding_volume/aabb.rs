//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};
use crate::shape::Segment;

/// An Axis-Aligned Bounding Box (AABB).
///
/// Used as the broad phase of the intersection splitter: two segments can only
/// touch if their AABBs, loosened by the intersection tolerance, intersect.
///
/// # Example
///
/// ```
/// use planar_topology::bounding_volume::Aabb;
/// use planar_topology::math::Point;
///
/// let aabb = Aabb::from_points([Point::new(1.0, 2.0), Point::new(-1.0, 4.0)]);
/// assert_eq!(aabb.mins, Point::new(-1.0, 2.0));
/// assert_eq!(aabb.maxs, Point::new(1.0, 4.0));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point,
    /// The point with maximum coordinates.
    pub maxs: Point,
}

impl Aabb {
    /// Creates a new AABB from its two extremal corners.
    #[inline]
    pub fn new(mins: Point, maxs: Point) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// Useful as the initial value of a merge.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB that tightly encloses a set of points.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// The AABB of a segment.
    #[inline]
    pub fn from_segment(segment: &Segment) -> Self {
        Aabb {
            mins: segment.a.inf(&segment.b),
            maxs: segment.a.sup(&segment.b),
        }
    }

    /// Enlarges this AABB so it also contains `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Does this AABB intersect `other`? Touching boxes intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    /// Does this AABB contain `point`?
    #[inline]
    pub fn contains_local_point(&self, point: &Point) -> bool {
        na::partial_le(&self.mins, point) && na::partial_ge(&self.maxs, point)
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Returns this AABB enlarged by `amount` on every side.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is negative.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}
