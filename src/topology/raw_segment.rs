use crate::math::{Point, Real};
use crate::shape::Segment;

/// A straight segment from the drawing, before any snapping or splitting.
///
/// The label is opaque to the builder: it is only compared for equality when
/// reconciling the labels of overlapping segments.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RawSegment {
    /// The segment geometry.
    pub segment: Segment,
    /// The semantic label of the segment (semantic tag, layer name, ...).
    pub label: Option<String>,
}

impl RawSegment {
    /// Creates a new raw segment.
    pub fn new(segment: Segment, label: Option<String>) -> Self {
        RawSegment { segment, label }
    }

    /// Creates a new unlabeled raw segment between two points.
    pub fn unlabeled(a: Point, b: Point) -> Self {
        Self::new(Segment::new(a, b), None)
    }

    /// Creates a new raw segment between two points, with the given label.
    pub fn labeled(a: Point, b: Point, label: impl Into<String>) -> Self {
        Self::new(Segment::new(a, b), Some(label.into()))
    }

    /// Are all the coordinates of this segment finite?
    pub fn is_finite(&self) -> bool {
        self.segment.a.iter().chain(self.segment.b.iter()).all(|c| c.is_finite())
    }

    /// This segment with its coordinates multiplied by `factor`.
    ///
    /// See [`LinearUnit::scale_to_meters`](crate::units::LinearUnit::scale_to_meters).
    pub fn scaled(&self, factor: Real) -> Self {
        RawSegment {
            segment: self.segment.scaled(factor),
            label: self.label.clone(),
        }
    }
}
