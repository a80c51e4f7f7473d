use crate::math::{Point, Real};
use crate::shape::{Segment, SegmentPointLocation};

/// Intersection between two segments.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SegmentsIntersection {
    /// Single point of intersection.
    Point {
        /// Location of the intersection point on the first segment.
        loc1: SegmentPointLocation,
        /// Location of the intersection point on the second segment.
        loc2: SegmentPointLocation,
    },
    /// Intersection along a segment (when both segments are collinear).
    Segment {
        /// Location of the first intersection point on the first segment.
        first_loc1: SegmentPointLocation,
        /// Location of the first intersection point on the second segment.
        first_loc2: SegmentPointLocation,
        /// Location of the second intersection point on the first segment.
        second_loc1: SegmentPointLocation,
        /// Location of the second intersection point on the second segment.
        second_loc2: SegmentPointLocation,
    },
}

/// Computes the intersection between the segments `[a, b]` and `[c, d]`.
///
/// `epsilon` is a distance: points closer than `epsilon` to a segment are considered
/// to lie on it, and intersection points closer than `epsilon` to a segment vertex are
/// reported as [`SegmentPointLocation::OnVertex`]. Near-parallel segments whose
/// vertices all lie within `epsilon` of the other segment's supporting line are handled
/// as collinear. A near miss (a vertex within `epsilon` of the other segment without a
/// proper crossing) is reported as a touching point located at the orthogonal
/// projection of that vertex.
///
/// Degenerate (zero-length) segments never intersect anything.
///
/// # Example
///
/// ```
/// use planar_topology::math::Point;
/// use planar_topology::shape::SegmentPointLocation;
/// use planar_topology::utils::{segments_intersection2d, SegmentsIntersection};
///
/// let inter = segments_intersection2d(
///     &Point::new(0.0, 0.0),
///     &Point::new(10.0, 0.0),
///     &Point::new(5.0, -5.0),
///     &Point::new(5.0, 5.0),
///     1.0e-6,
/// );
///
/// assert_eq!(
///     inter,
///     Some(SegmentsIntersection::Point {
///         loc1: SegmentPointLocation::OnEdge([0.5, 0.5]),
///         loc2: SegmentPointLocation::OnEdge([0.5, 0.5]),
///     })
/// );
/// ```
pub fn segments_intersection2d(
    a: &Point,
    b: &Point,
    c: &Point,
    d: &Point,
    epsilon: Real,
) -> Option<SegmentsIntersection> {
    let seg1 = Segment::new(*a, *b);
    let seg2 = Segment::new(*c, *d);
    let len1 = seg1.length();
    let len2 = seg2.length();

    if len1 == 0.0 || len2 == 0.0 {
        return None;
    }

    let seg2_on_line1 = seg1.distance_to_line(c) <= epsilon && seg1.distance_to_line(d) <= epsilon;
    let seg1_on_line2 = seg2.distance_to_line(a) <= epsilon && seg2.distance_to_line(b) <= epsilon;

    if seg2_on_line1 || seg1_on_line2 {
        return collinear_intersection(&seg1, &seg2, len1, len2, epsilon);
    }

    let ab = seg1.scaled_direction();
    let cd = seg2.scaled_direction();
    let denom = ab.perp(&cd);

    if denom != 0.0 {
        let ac = c - a;
        let s = ac.perp(&cd) / denom;
        let t = ac.perp(&ab) / denom;
        let eps1 = epsilon / len1;
        let eps2 = epsilon / len2;

        if s >= -eps1 && s <= 1.0 + eps1 && t >= -eps2 && t <= 1.0 + eps2 {
            return Some(SegmentsIntersection::Point {
                loc1: location(s, len1, epsilon),
                loc2: location(t, len2, epsilon),
            });
        }
    }

    near_miss(&seg1, &seg2, len1, len2, epsilon)
}

/// The location of the point `a + (b - a) * param` on a segment of length `len`,
/// snapped to a vertex if closer than `epsilon` to it.
fn location(param: Real, len: Real, epsilon: Real) -> SegmentPointLocation {
    let param = param.clamp(0.0, 1.0);
    let dist0 = param * len;
    let dist1 = (1.0 - param) * len;

    if dist0 <= epsilon || dist1 <= epsilon {
        if dist0 <= dist1 {
            SegmentPointLocation::OnVertex(0)
        } else {
            SegmentPointLocation::OnVertex(1)
        }
    } else {
        SegmentPointLocation::OnEdge([1.0 - param, param])
    }
}

fn collinear_intersection(
    seg1: &Segment,
    seg2: &Segment,
    len1: Real,
    len2: Real,
    epsilon: Real,
) -> Option<SegmentsIntersection> {
    let tc = seg1.project_parameter(&seg2.a);
    let td = seg1.project_parameter(&seg2.b);
    let lo = tc.min(td).max(0.0);
    let hi = tc.max(td).min(1.0);

    if (hi - lo) * len1 < -epsilon {
        return None;
    }

    let locs_at = |param: Real| {
        let pt = seg1.point_at_parameter(param);
        (
            location(param, len1, epsilon),
            location(seg2.project_parameter(&pt), len2, epsilon),
        )
    };

    if (hi - lo) * len1 <= epsilon {
        // The segments only touch end-to-end.
        let (loc1, loc2) = locs_at((lo + hi) / 2.0);
        return Some(SegmentsIntersection::Point { loc1, loc2 });
    }

    let (first_loc1, first_loc2) = locs_at(lo);
    let (second_loc1, second_loc2) = locs_at(hi);

    Some(SegmentsIntersection::Segment {
        first_loc1,
        first_loc2,
        second_loc1,
        second_loc2,
    })
}

// Checks whether a vertex of one segment lies within `epsilon` of the other segment.
fn near_miss(
    seg1: &Segment,
    seg2: &Segment,
    len1: Real,
    len2: Real,
    epsilon: Real,
) -> Option<SegmentsIntersection> {
    for (k, pt) in [seg2.a, seg2.b].iter().enumerate() {
        if seg1.distance_to_point(pt) <= epsilon {
            return Some(SegmentsIntersection::Point {
                loc1: location(seg1.project_parameter(pt), len1, epsilon),
                loc2: SegmentPointLocation::OnVertex(k as u32),
            });
        }
    }

    for (k, pt) in [seg1.a, seg1.b].iter().enumerate() {
        if seg2.distance_to_point(pt) <= epsilon {
            return Some(SegmentsIntersection::Point {
                loc1: SegmentPointLocation::OnVertex(k as u32),
                loc2: location(seg2.project_parameter(pt), len2, epsilon),
            });
        }
    }

    None
}
