//! Construction of planar graphs from unstructured sets of segments.
//!
//! The pipeline has three stages, each of them usable on its own:
//! 1. [`SnapGrid::snap_segments`] quantizes the segment endpoints onto a grid so that
//!    near-coincident points become the same node.
//! 2. [`split_segments`] cuts the snapped segments at all their mutual intersections.
//! 3. [`GraphBuilder`] deduplicates the resulting atomic segments into nodes and edges.
//!
//! [`build_topology`] chains all of them.

pub use self::builder::GraphBuilder;
pub use self::error::TopologyError;
pub use self::graph::{DiscardCounters, Edge, EdgeId, Graph, Node, NodeId};
pub use self::label::{EdgeLabel, LabelPolicy, LabelTally, MIXED_LABEL};
pub use self::raw_segment::RawSegment;
pub use self::snap::{GridCell, SnapGrid, SnappedSegment, SnappedSegments};
pub use self::split::{split_segments, AtomicSegment, SplitOutput};
pub use self::tolerances::{BuildOptions, TopologyTolerances};

use crate::math::Real;

mod builder;
mod error;
mod graph;
mod label;
mod raw_segment;
mod snap;
mod split;
mod tolerances;

/// Builds the planar graph of a set of segments.
///
/// Endpoints closer than `snap_tolerance` (in the sense of rounding to the same grid
/// cell) become a single node, segments are split at every intersection detected
/// within `intersect_tolerance`, and edges no longer than `intersect_tolerance` are
/// dropped. Overlapping labeled segments are reconciled with [`LabelPolicy::Unanimous`].
///
/// The output only depends on the input set and on its order, never on hashing or
/// thread scheduling.
///
/// # Example
///
/// ```
/// use planar_topology::math::Point;
/// use planar_topology::topology::{build_topology, RawSegment};
///
/// let cross = [
///     RawSegment::unlabeled(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
///     RawSegment::unlabeled(Point::new(5.0, -5.0), Point::new(5.0, 5.0)),
/// ];
/// let graph = build_topology(&cross, 0.01, 0.01).unwrap();
///
/// assert_eq!(graph.num_nodes(), 5);
/// assert_eq!(graph.num_edges(), 4);
/// let center = graph.node_at(&Point::new(5.0, 0.0)).unwrap();
/// assert_eq!(graph.degree(center), 4);
/// ```
pub fn build_topology(
    segments: &[RawSegment],
    snap_tolerance: Real,
    intersect_tolerance: Real,
) -> Result<Graph, TopologyError> {
    build_topology_with_options(
        segments,
        &BuildOptions::new(snap_tolerance, intersect_tolerance),
    )
}

/// Builds the planar graph of a set of segments, with a custom label policy.
///
/// See [`build_topology`].
pub fn build_topology_with_options(
    segments: &[RawSegment],
    options: &BuildOptions,
) -> Result<Graph, TopologyError> {
    let tolerances = &options.tolerances;
    tolerances.validate()?;

    if let Some(index) = segments.iter().position(|s| !s.is_finite()) {
        return Err(TopologyError::NonFiniteCoordinate { index });
    }

    let grid = SnapGrid::new(tolerances.snap);
    let snapped = grid.snap_segments(segments);
    let split = split_segments(&snapped.segments, &grid, tolerances.intersect);

    let discards = DiscardCounters {
        collapsed_by_snap: snapped.collapsed,
        below_intersect_tolerance: split.collapsed,
        merged_duplicates: split.merged_duplicates,
        ambiguous_intersections: split.ambiguous_intersections,
    };
    let mut builder = GraphBuilder::new(grid, tolerances.intersect).with_discards(discards);

    for segment in split.segments {
        let _ = builder.add_segment(segment);
    }

    let graph = builder.finish(&options.label_policy);

    log::debug!(
        "built a topology of {} nodes and {} edges from {} segments, discards: {:?}",
        graph.num_nodes(),
        graph.num_edges(),
        segments.len(),
        graph.discards()
    );

    Ok(graph)
}
