use crate::math::{Point, Real};
use crate::shape::Segment;
use crate::topology::RawSegment;

/// A cell of the snapping grid.
///
/// Two points are the same topological node if and only if they fall into the same cell.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    /// The cell index along the `x` axis.
    pub x: i64,
    /// The cell index along the `y` axis.
    pub y: i64,
}

/// Quantizes points onto a square grid of a given size.
///
/// Each coordinate `c` is mapped to `round(c / t) * t` independently, rounding half away
/// from zero. A grid of size zero is the identity: every distinct point is its own cell.
///
/// # Example
///
/// ```
/// use planar_topology::math::Point;
/// use planar_topology::topology::SnapGrid;
///
/// let grid = SnapGrid::new(0.5);
/// assert_eq!(grid.snap_point(&Point::new(1.2, -0.25)), Point::new(1.0, -0.5));
/// assert_eq!(grid.cell(&Point::new(1.2, -0.25)), grid.cell(&Point::new(0.8, -0.26)));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapGrid {
    tolerance: Real,
}

/// A raw segment whose endpoints were snapped onto the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SnappedSegment {
    /// The snapped geometry.
    pub segment: Segment,
    /// The grid cells of `segment.a` and `segment.b`. They are always distinct.
    pub cells: [GridCell; 2],
    /// The label of the raw segment.
    pub label: Option<String>,
    /// The index of the raw segment in the snapper input.
    pub source: usize,
}

impl SnappedSegment {
    /// Converts this segment back into a raw segment.
    pub fn to_raw(&self) -> RawSegment {
        RawSegment::new(self.segment, self.label.clone())
    }
}

/// The output of [`SnapGrid::snap_segments`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnappedSegments {
    /// The surviving segments, in input order.
    pub segments: Vec<SnappedSegment>,
    /// The number of segments dropped because both their endpoints fell into the same cell.
    pub collapsed: usize,
}

impl SnapGrid {
    /// Creates a grid of the given size.
    ///
    /// A zero, negative or non-finite size yields the identity grid.
    pub fn new(tolerance: Real) -> Self {
        if tolerance > 0.0 && tolerance.is_finite() {
            SnapGrid { tolerance }
        } else {
            Self::identity()
        }
    }

    /// The grid that leaves every point untouched.
    pub fn identity() -> Self {
        SnapGrid { tolerance: 0.0 }
    }

    /// The size of a grid cell, zero for the identity grid.
    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// Is this the identity grid?
    pub fn is_identity(&self) -> bool {
        self.tolerance == 0.0
    }

    /// The cell containing `pt`.
    pub fn cell(&self, pt: &Point) -> GridCell {
        if self.is_identity() {
            GridCell {
                x: coordinate_bits(pt.x),
                y: coordinate_bits(pt.y),
            }
        } else {
            GridCell {
                x: (pt.x / self.tolerance).round() as i64,
                y: (pt.y / self.tolerance).round() as i64,
            }
        }
    }

    /// The representative point of a cell.
    pub fn cell_point(&self, cell: GridCell) -> Point {
        if self.is_identity() {
            Point::new(
                Real::from_bits(cell.x as u64),
                Real::from_bits(cell.y as u64),
            )
        } else {
            Point::new(
                cell.x as Real * self.tolerance,
                cell.y as Real * self.tolerance,
            )
        }
    }

    /// Replaces `pt` by the representative point of its cell.
    #[inline]
    pub fn snap_point(&self, pt: &Point) -> Point {
        self.cell_point(self.cell(pt))
    }

    /// Snaps the endpoints of every segment.
    ///
    /// Segments whose endpoints fall into the same cell are shorter than the grid size:
    /// they are dropped and counted in [`SnappedSegments::collapsed`]. The relative order
    /// of the surviving segments is preserved.
    pub fn snap_segments(&self, segments: &[RawSegment]) -> SnappedSegments {
        let mut result = SnappedSegments::default();

        for (source, raw) in segments.iter().enumerate() {
            let cells = [self.cell(&raw.segment.a), self.cell(&raw.segment.b)];

            if cells[0] == cells[1] {
                result.collapsed += 1;
                continue;
            }

            result.segments.push(SnappedSegment {
                segment: Segment::new(self.cell_point(cells[0]), self.cell_point(cells[1])),
                cells,
                label: raw.label.clone(),
                source,
            });
        }

        log::debug!(
            "snapped {} segments on a grid of size {}: {} collapsed",
            segments.len(),
            self.tolerance,
            result.collapsed
        );

        result
    }
}

// The bit pattern of a coordinate, with both zeros identified.
fn coordinate_bits(c: Real) -> i64 {
    if c == 0.0 {
        0
    } else {
        c.to_bits() as i64
    }
}
