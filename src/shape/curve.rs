//! Drawing primitives and their discretization into straight segments.

use crate::math::{Point, Real, Vector};
use crate::shape::Segment;
use crate::topology::{RawSegment, TopologyError};
use core::f64::consts::TAU;

/// The smallest chord length accepted when discretizing arcs.
const MIN_CHORD_LENGTH: Real = 1.0e-6;

/// The minimum number of points an arc is discretized into.
const MIN_ARC_POINTS: usize = 4;

/// The maximum number of points an arc is discretized into.
pub const MAX_ARC_POINTS: usize = 1 << 20;

/// A planar curve from a vector drawing.
///
/// Arcs and circles are approximated by polylines whose chords are no longer than a
/// caller-provided length, which bounds the chord error.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    /// A single straight segment.
    Line(Segment),
    /// A chain of straight segments. A closed polyline also connects its last point to
    /// its first one.
    Polyline {
        /// The vertices of the polyline.
        points: Vec<Point>,
        /// Whether the last vertex connects back to the first one.
        closed: bool,
    },
    /// A circular arc swept counterclockwise from `start_angle` to `end_angle`.
    ///
    /// Angles are in radians. An arc with equal start and end angles is a full turn.
    Arc {
        /// The center of the arc.
        center: Point,
        /// The radius of the arc.
        radius: Real,
        /// The angle of the first arc point.
        start_angle: Real,
        /// The angle of the last arc point.
        end_angle: Real,
    },
    /// A full circle.
    Circle {
        /// The center of the circle.
        center: Point,
        /// The radius of the circle.
        radius: Real,
    },
}

impl Curve {
    /// The counterclockwise angle swept by an arc going from `start_angle` to `end_angle`.
    fn sweep(start_angle: Real, end_angle: Real) -> Real {
        let sweep = (end_angle - start_angle).rem_euclid(TAU);

        if sweep == 0.0 {
            TAU
        } else {
            sweep
        }
    }

    /// The length of this curve.
    ///
    /// For arcs and circles, this is the length of the exact curve, not of its
    /// discretization.
    pub fn length(&self) -> Real {
        match self {
            Curve::Line(segment) => segment.length(),
            Curve::Polyline { points, closed } => {
                let open: Real = points.windows(2).map(|w| na::distance(&w[0], &w[1])).sum();

                match (closed, points.first(), points.last()) {
                    (true, Some(first), Some(last)) => open + na::distance(first, last),
                    _ => open,
                }
            }
            Curve::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => radius * Self::sweep(*start_angle, *end_angle),
            Curve::Circle { radius, .. } => radius * TAU,
        }
    }

    /// Discretizes this curve as an ordered sequence of points.
    ///
    /// Arcs are split into `ceil(length / chord_length)` chords, and never fewer than
    /// four points (both ends included). Closed curves repeat their first point at the end.
    ///
    /// Arcs needing [`MAX_ARC_POINTS`] chords or more are rejected with
    /// [`TopologyError::InvalidCurve`].
    pub fn to_polyline(&self, chord_length: Real) -> Result<Vec<Point>, TopologyError> {
        match self {
            Curve::Line(segment) => Ok(vec![segment.a, segment.b]),
            Curve::Polyline { points, closed } => {
                if points.len() < 2 {
                    return Err(TopologyError::InvalidCurve(
                        "a polyline needs at least two points",
                    ));
                }

                let mut out = points.clone();
                if *closed {
                    out.push(points[0]);
                }
                Ok(out)
            }
            Curve::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                if !start_angle.is_finite() || !end_angle.is_finite() {
                    return Err(TopologyError::InvalidCurve("arc angles must be finite"));
                }

                let sweep = Self::sweep(*start_angle, *end_angle);
                arc_points(*center, *radius, *start_angle, sweep, chord_length)
            }
            Curve::Circle { center, radius } => {
                let mut pts = arc_points(*center, *radius, 0.0, TAU, chord_length)?;
                // Close the loop exactly, `cos(TAU)` is not exactly `1`.
                let last = pts.len() - 1;
                pts[last] = pts[0];
                Ok(pts)
            }
        }
    }

    /// Discretizes this curve into straight segments.
    pub fn to_segments(&self, chord_length: Real) -> Result<Vec<Segment>, TopologyError> {
        let pts = self.to_polyline(chord_length)?;
        Ok(pts.windows(2).map(|w| Segment::new(w[0], w[1])).collect())
    }

    /// Discretizes this curve into raw segments that all carry the given label.
    pub fn to_raw_segments(
        &self,
        chord_length: Real,
        label: Option<&str>,
    ) -> Result<Vec<RawSegment>, TopologyError> {
        Ok(self
            .to_segments(chord_length)?
            .into_iter()
            .map(|segment| RawSegment::new(segment, label.map(str::to_owned)))
            .collect())
    }
}

fn arc_points(
    center: Point,
    radius: Real,
    start_angle: Real,
    sweep: Real,
    chord_length: Real,
) -> Result<Vec<Point>, TopologyError> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(TopologyError::InvalidCurve(
            "an arc radius must be positive and finite",
        ));
    }

    if chord_length <= 0.0 || !chord_length.is_finite() {
        return Err(TopologyError::InvalidCurve(
            "the chord length must be positive and finite",
        ));
    }

    let length = radius * sweep;
    let chord_length = chord_length.max(MIN_CHORD_LENGTH);
    let nchords = (length / chord_length).ceil();

    if nchords >= MAX_ARC_POINTS as Real {
        return Err(TopologyError::InvalidCurve(
            "the chord length is too small for the arc size",
        ));
    }

    let npoints = (nchords as usize + 1).max(MIN_ARC_POINTS);
    let dtheta = sweep / (npoints - 1) as Real;

    Ok((0..npoints)
        .map(|i| {
            let theta = start_angle + dtheta * i as Real;
            center + Vector::new(theta.cos(), theta.sin()) * radius
        })
        .collect())
}
