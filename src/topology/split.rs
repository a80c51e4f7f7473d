use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{Segment, SegmentPointLocation};
use crate::topology::{GridCell, LabelTally, SnapGrid, SnappedSegment};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::{segments_intersection2d, SegmentsIntersection, SortedPair};
use ena::unify::{InPlaceUnificationTable, NoError, UnifyKey, UnifyValue};
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The maximum number of passes checking the split pieces for new contacts.
const MAX_REFINEMENTS: usize = 64;

/// Tolerance of the refinement passes, relative to the intersection tolerance.
///
/// These passes only look for actual contacts created by moving cut points onto the
/// grid, not for near misses.
const REFINEMENT_TOLERANCE_RATIO: Real = 1.0e-3;

/// A segment sharing no interior point with any other atomic segment of the same
/// split output: atomic segments only touch at their endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomicSegment {
    /// The vertices of the segment.
    ///
    /// Straight atomic segments produced by [`split_segments`] have exactly two points.
    /// Longer polylines come from [`Graph::merge_chains`](crate::topology::Graph::merge_chains)
    /// or from callers feeding a [`GraphBuilder`](crate::topology::GraphBuilder) directly.
    pub points: Vec<Point>,
    /// The labels of every raw segment covering this one.
    pub labels: LabelTally,
}

impl AtomicSegment {
    /// Creates a new atomic segment.
    pub fn new(points: Vec<Point>, labels: LabelTally) -> Self {
        AtomicSegment { points, labels }
    }

    /// The length of the polyline.
    pub fn length(&self) -> Real {
        polyline_length(&self.points)
    }
}

pub(crate) fn polyline_length(points: &[Point]) -> Real {
    points.windows(2).map(|w| na::distance(&w[0], &w[1])).sum()
}

/// The output of [`split_segments`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitOutput {
    /// The atomic segments, ordered by their first contributing input segment, then
    /// along that segment.
    pub segments: Vec<AtomicSegment>,
    /// The number of sub-segments that duplicated an already emitted one (collinear
    /// overlaps) and were merged into it.
    pub merged_duplicates: usize,
    /// The number of sub-segments whose two ends were merged into a single node.
    pub collapsed: usize,
    /// The number of grid cells merged into a nearby node because a vertex on them was
    /// closer than the tolerance to a vertex on another cell.
    pub ambiguous_intersections: usize,
}

#[derive(Copy, Clone, Debug)]
struct Cut {
    param: Real,
    cell: GridCell,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
struct NodeKey(u32);

/// A set of grid cells identified as a single node, located at `anchor`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cluster {
    anchor: GridCell,
    size: u32,
}

impl UnifyKey for NodeKey {
    type Value = Cluster;
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> NodeKey {
        NodeKey(u)
    }
    fn tag() -> &'static str {
        "NodeKey"
    }
}

impl UnifyValue for Cluster {
    type Error = NoError;

    // Clusters only ever grow one cell at a time, the anchor of the larger one is kept.
    fn unify_values(a: &Self, b: &Self) -> Result<Self, NoError> {
        let anchor = match (a.size, b.size) {
            (1, 1) => a.anchor.min(b.anchor),
            (1, _) => b.anchor,
            _ => a.anchor,
        };

        Ok(Cluster {
            anchor,
            size: a.size + b.size,
        })
    }
}

/// Grid cells merged into a nearby cell.
///
/// Every cell of a cluster lies within the tolerance of the cluster anchor, which is
/// one of its cells. Merging is therefore not transitive: a run of cells each close to
/// the next one is not contracted into a single node.
struct NodeClusters {
    table: InPlaceUnificationTable<NodeKey>,
    keys: HashMap<GridCell, NodeKey>,
    tolerance: Real,
}

impl NodeClusters {
    fn new(tolerance: Real) -> Self {
        NodeClusters {
            table: InPlaceUnificationTable::new(),
            keys: HashMap::default(),
            tolerance,
        }
    }

    fn key(&mut self, cell: GridCell) -> NodeKey {
        match self.keys.entry(cell) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let key = self.table.new_key(Cluster {
                    anchor: cell,
                    size: 1,
                });
                *e.insert(key)
            }
        }
    }

    /// The cell of the node `cell` belongs to.
    fn anchor(&mut self, cell: GridCell) -> GridCell {
        match self.keys.get(&cell).copied() {
            Some(key) => self.table.probe_value(key).anchor,
            None => cell,
        }
    }

    /// Merges the nodes of `a` and `b` if the merged cluster stays within the tolerance
    /// of its anchor. Returns `false` if nothing was merged.
    fn merge(&mut self, grid: &SnapGrid, a: GridCell, b: GridCell) -> bool {
        let (ka, kb) = (self.key(a), self.key(b));

        if self.table.find(ka) == self.table.find(kb) {
            return false;
        }

        let (ca, cb) = (self.table.probe_value(ka), self.table.probe_value(kb));
        let (cell, anchor) = match (ca.size, cb.size) {
            (1, 1) => (a, b),
            (1, _) => (a, cb.anchor),
            (_, 1) => (b, ca.anchor),
            _ => return false,
        };

        if na::distance(&grid.cell_point(cell), &grid.cell_point(anchor)) > self.tolerance {
            return false;
        }

        self.table.union(ka, kb);
        true
    }
}

/// Straight pieces between two grid cells, deduplicated by their pair of cells.
#[derive(Default)]
struct Pieces {
    cells: Vec<[GridCell; 2]>,
    labels: Vec<LabelTally>,
    index: HashMap<SortedPair<GridCell>, usize>,
    merged_duplicates: usize,
}

impl Pieces {
    fn push(&mut self, a: GridCell, b: GridCell, labels: LabelTally) {
        match self.index.entry(SortedPair::new(a, b)) {
            Entry::Occupied(e) => {
                self.labels[*e.get()].merge(&labels);
                self.merged_duplicates += 1;
            }
            Entry::Vacant(e) => {
                let _ = e.insert(self.cells.len());
                self.cells.push([a, b]);
                self.labels.push(labels);
            }
        }
    }

    fn geometry(&self, grid: &SnapGrid) -> Vec<Segment> {
        self.cells
            .iter()
            .map(|[a, b]| Segment::new(grid.cell_point(*a), grid.cell_point(*b)))
            .collect()
    }
}

/// Pairs of segments whose bounding boxes, loosened by `margin`, intersect.
///
/// Sort-and-sweep along the `x` axis; the result is sorted.
fn candidate_pairs(segments: &[Segment], margin: Real) -> Vec<(usize, usize)> {
    let aabbs: Vec<Aabb> = segments
        .iter()
        .map(|s| Aabb::from_segment(s).loosened(margin))
        .collect();
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by_key(|i| OrderedFloat(aabbs[*i].mins.x));

    let mut pairs = vec![];

    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if aabbs[j].mins.x > aabbs[i].maxs.x {
                break;
            }

            if aabbs[i].intersects(&aabbs[j]) {
                pairs.push((i.min(j), i.max(j)));
            }
        }
    }

    pairs.sort_unstable();
    pairs
}

/// All the contacts between pairs of segments, in pair order.
fn contacts(segments: &[Segment], epsilon: Real) -> Vec<(usize, usize, SegmentsIntersection)> {
    let pairs = candidate_pairs(segments, epsilon);
    let intersect = |&(i, j): &(usize, usize)| {
        let (s1, s2) = (&segments[i], &segments[j]);
        segments_intersection2d(&s1.a, &s1.b, &s2.a, &s2.b, epsilon).map(|inter| (i, j, inter))
    };

    #[cfg(not(feature = "parallel"))]
    let result = pairs.iter().filter_map(intersect).collect();
    #[cfg(feature = "parallel")]
    let result = pairs.par_iter().filter_map(intersect).collect();

    result
}

/// Splits snapped segments at all their mutual intersections.
///
/// Every pair of segments that cross, touch or overlap is cut at the contact points so
/// that the resulting atomic segments only meet at their endpoints:
/// - interior crossings are cut at the crossing point, snapped to `grid`;
/// - a vertex lying on (or within `tolerance` of) another segment cuts that segment at
///   the vertex;
/// - vertices closer than `tolerance` to each other are merged into one node, as long as
///   no vertex moves farther than `tolerance`;
/// - collinear overlaps are cut at each other's endpoints, and the overlapping part is
///   emitted once, with the labels of both segments.
///
/// Moving cut points onto the grid bends the pieces, which may then cross segments they
/// did not touch before. The pieces are checked again, and cut again, until they only
/// meet at their endpoints.
///
/// Pieces no longer than `tolerance` are kept: dropping them is up to the
/// [`GraphBuilder`](crate::topology::GraphBuilder).
///
/// The output is independent of the order in which pairs are tested, which makes the
/// `parallel` feature deterministic.
pub fn split_segments(
    segments: &[SnappedSegment],
    grid: &SnapGrid,
    tolerance: Real,
) -> SplitOutput {
    let mut result = SplitOutput::default();
    let mut clusters = NodeClusters::new(tolerance);
    let mut pieces = Pieces::default();

    for s in segments {
        pieces.push(s.cells[0], s.cells[1], LabelTally::from_label(s.label.as_deref()));
    }
    result.merged_duplicates += pieces.merged_duplicates;

    let mut epsilon = tolerance;
    let mut passes = 0;
    let mut num_contacts = 0;

    loop {
        let geometry = pieces.geometry(grid);
        let found = contacts(&geometry, epsilon);
        num_contacts += found.len();

        // 1: turn the contacts into cuts and pairs of close vertices.
        let mut pending: Vec<(usize, Real, GridCell)> = vec![];
        let mut close_vertices: Vec<SortedPair<GridCell>> = vec![];

        for (i, j, inter) in &found {
            let (i, j) = (*i, *j);
            let mut locs: SmallVec<[_; 2]> = SmallVec::new();

            match *inter {
                SegmentsIntersection::Point { loc1, loc2 } => locs.push((loc1, loc2)),
                SegmentsIntersection::Segment {
                    first_loc1,
                    first_loc2,
                    second_loc1,
                    second_loc2,
                } => {
                    locs.push((first_loc1, first_loc2));
                    locs.push((second_loc1, second_loc2));
                }
            }

            for (loc1, loc2) in locs {
                match (loc1, loc2) {
                    (SegmentPointLocation::OnVertex(k1), SegmentPointLocation::OnVertex(k2)) => {
                        let c1 = pieces.cells[i][k1 as usize];
                        let c2 = pieces.cells[j][k2 as usize];
                        if c1 != c2 {
                            close_vertices.push(SortedPair::new(c1, c2));
                        }
                    }
                    (SegmentPointLocation::OnEdge(bcoords), SegmentPointLocation::OnVertex(k2)) => {
                        pending.push((i, bcoords[1], pieces.cells[j][k2 as usize]));
                    }
                    (SegmentPointLocation::OnVertex(k1), SegmentPointLocation::OnEdge(bcoords)) => {
                        pending.push((j, bcoords[1], pieces.cells[i][k1 as usize]));
                    }
                    (SegmentPointLocation::OnEdge(bcoords1), SegmentPointLocation::OnEdge(bcoords2)) => {
                        let cell = grid.cell(&geometry[i].point_at(&loc1));
                        pending.push((i, bcoords1[1], cell));
                        pending.push((j, bcoords2[1], cell));
                    }
                }
            }
        }

        let mut cuts: Vec<SmallVec<[Cut; 2]>> = vec![SmallVec::new(); geometry.len()];
        let mut progress = false;

        for (piece, param, cell) in pending {
            let cell = clusters.anchor(cell);

            // A crossing snapped onto an endpoint of the piece does not cut it.
            if !pieces.cells[piece].contains(&cell) {
                cuts[piece].push(Cut { param, cell });
                progress = true;
            }
        }

        // 2: merge the close vertices, closest pairs first.
        close_vertices.sort_by_key(|pair| {
            let dist = na::distance(&grid.cell_point(pair[0]), &grid.cell_point(pair[1]));
            (OrderedFloat(dist), *pair)
        });
        close_vertices.dedup();

        for pair in &close_vertices {
            if clusters.merge(grid, pair[0], pair[1]) {
                log::trace!(
                    "merging nodes {:?} and {:?}, closer than {tolerance}",
                    pair[0],
                    pair[1]
                );
                result.ambiguous_intersections += 1;
                progress = true;
            }
        }

        if !progress {
            break;
        }

        // 3: replace every piece by the sub-pieces between its consecutive cuts.
        let mut next = Pieces::default();

        for (k, piece_cuts) in cuts.iter_mut().enumerate() {
            piece_cuts.sort_by_key(|c| (OrderedFloat(c.param), c.cell));

            let [start, end] = pieces.cells[k];
            let mut prev_cell = start;
            let mut prev = clusters.anchor(start);

            for cell in piece_cuts.iter().map(|c| c.cell).chain(Some(end)) {
                if cell == prev_cell {
                    continue;
                }

                let node = clusters.anchor(cell);

                if node == prev {
                    result.collapsed += 1;
                } else {
                    next.push(prev, node, pieces.labels[k].clone());
                }

                prev_cell = cell;
                prev = node;
            }
        }

        result.merged_duplicates += next.merged_duplicates;
        pieces = next;
        epsilon = tolerance * REFINEMENT_TOLERANCE_RATIO;
        passes += 1;

        if passes > MAX_REFINEMENTS {
            log::warn!(
                "splitting did not converge after {MAX_REFINEMENTS} refinement passes, some pieces may still cross"
            );
            break;
        }
    }

    result.segments = pieces
        .cells
        .iter()
        .zip(pieces.labels)
        .map(|([a, b], labels)| {
            AtomicSegment::new(vec![grid.cell_point(*a), grid.cell_point(*b)], labels)
        })
        .collect();

    log::debug!(
        "split {} segments into {} atomic segments in {} passes: {} contacts, {} duplicates merged, {} collapsed, {} ambiguous",
        segments.len(),
        result.segments.len(),
        passes + 1,
        num_contacts,
        result.merged_duplicates,
        result.collapsed,
        result.ambiguous_intersections,
    );

    result
}
