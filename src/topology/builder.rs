use crate::math::{Point, Real};
use crate::topology::split::polyline_length;
use crate::topology::{
    AtomicSegment, DiscardCounters, Edge, EdgeId, Graph, GridCell, LabelPolicy, LabelTally,
    Node, NodeId, SnapGrid,
};
use crate::utils::hashmap::{Entry, HashMap};
use smallvec::SmallVec;

struct PendingEdge {
    u: NodeId,
    v: NodeId,
    length: Real,
    geometry: Vec<Point>,
    labels: LabelTally,
}

/// Incrementally assembles atomic segments into a [`Graph`].
///
/// Endpoints are identified by their grid cell, so a node is created once per cell.
/// Segments that would become self-loops or edges no longer than the intersection
/// tolerance are rejected, and a segment with the same geometry as an existing edge
/// only contributes its labels to that edge.
///
/// # Example
///
/// ```
/// use planar_topology::math::Point;
/// use planar_topology::topology::{AtomicSegment, GraphBuilder, LabelPolicy, LabelTally, SnapGrid};
///
/// let mut builder = GraphBuilder::new(SnapGrid::new(0.01), 0.01);
/// let wall = LabelTally::from_label(Some("WALL"));
/// let e1 = builder.add_segment(AtomicSegment::new(
///     vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
///     wall.clone(),
/// ));
/// let e2 = builder.add_segment(AtomicSegment::new(
///     vec![Point::new(1.0, 0.0), Point::new(0.001, 0.0)],
///     wall,
/// ));
/// assert!(e1.is_some());
/// assert_eq!(e1, e2);
///
/// let graph = builder.finish(&LabelPolicy::Unanimous);
/// assert_eq!(graph.num_nodes(), 2);
/// assert_eq!(graph.num_edges(), 1);
/// assert_eq!(graph.discards().merged_duplicates, 1);
/// ```
pub struct GraphBuilder {
    grid: SnapGrid,
    intersect_tolerance: Real,
    nodes: Vec<Node>,
    node_index: HashMap<GridCell, NodeId>,
    edges: Vec<PendingEdge>,
    edge_index: HashMap<Vec<GridCell>, EdgeId>,
    discards: DiscardCounters,
}

impl GraphBuilder {
    /// An empty builder.
    pub fn new(grid: SnapGrid, intersect_tolerance: Real) -> Self {
        GraphBuilder {
            grid,
            intersect_tolerance,
            nodes: vec![],
            node_index: HashMap::default(),
            edges: vec![],
            edge_index: HashMap::default(),
            discards: DiscardCounters::default(),
        }
    }

    /// Starts counting from the given discard counters.
    pub fn with_discards(mut self, discards: DiscardCounters) -> Self {
        self.discards = discards;
        self
    }

    /// The discards recorded so far.
    pub fn discards(&self) -> &DiscardCounters {
        &self.discards
    }

    /// The node of the grid cell containing `pt`, created if it does not exist yet.
    pub fn add_node(&mut self, pt: &Point) -> NodeId {
        let cell = self.grid.cell(pt);

        match self.node_index.entry(cell) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Node {
                    position: self.grid.cell_point(cell),
                    cell,
                });
                *e.insert(id)
            }
        }
    }

    /// Adds an edge following the given segment.
    ///
    /// The first and last points of the segment are snapped to their nodes. Returns the
    /// edge the segment was added to, or `None` if it was rejected.
    pub fn add_segment(&mut self, segment: AtomicSegment) -> Option<EdgeId> {
        let AtomicSegment { mut points, labels } = segment;

        if points.len() < 2 {
            self.discards.below_intersect_tolerance += 1;
            return None;
        }

        let last = points.len() - 1;
        let cells: Vec<GridCell> = points.iter().map(|pt| self.grid.cell(pt)).collect();

        if cells[0] == cells[last] {
            log::trace!("rejecting a self-loop on the node {:?}", cells[0]);
            self.discards.below_intersect_tolerance += 1;
            return None;
        }

        points[0] = self.grid.cell_point(cells[0]);
        points[last] = self.grid.cell_point(cells[last]);
        let length = polyline_length(&points);

        if length <= self.intersect_tolerance {
            log::trace!(
                "rejecting an edge of length {length} <= {}",
                self.intersect_tolerance
            );
            self.discards.below_intersect_tolerance += 1;
            return None;
        }

        // The geometry key does not depend on the direction the segment was given in.
        let mut key = cells;
        if key[0] > key[last] {
            key.reverse();
        }

        match self.edge_index.entry(key) {
            Entry::Occupied(e) => {
                let id = *e.get();
                self.edges[id.index()].labels.merge(&labels);
                self.discards.merged_duplicates += 1;
                Some(id)
            }
            Entry::Vacant(e) => {
                let id = EdgeId(self.edges.len() as u32);
                let _ = e.insert(id);
                let u = self.add_node(&points[0]);
                let v = self.add_node(&points[last]);
                self.edges.push(PendingEdge {
                    u,
                    v,
                    length,
                    geometry: points,
                    labels,
                });
                Some(id)
            }
        }
    }

    /// Resolves the edge labels and returns the assembled graph.
    pub fn finish(self, policy: &LabelPolicy) -> Graph {
        let mut adjacency: Vec<SmallVec<[EdgeId; 4]>> = vec![SmallVec::new(); self.nodes.len()];
        let edges: Vec<Edge> = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                adjacency[e.u.index()].push(EdgeId(i as u32));
                adjacency[e.v.index()].push(EdgeId(i as u32));

                Edge {
                    u: e.u,
                    v: e.v,
                    length: e.length,
                    geometry: e.geometry,
                    semantic: e.labels.resolve(policy),
                }
            })
            .collect();

        log::debug!(
            "assembled a graph with {} nodes and {} edges, {} mixed labels",
            self.nodes.len(),
            edges.len(),
            edges.iter().filter(|e| e.semantic.is_mixed()).count()
        );

        Graph {
            nodes: self.nodes,
            edges,
            adjacency,
            node_index: self.node_index,
            grid: self.grid,
            intersect_tolerance: self.intersect_tolerance,
            discards: self.discards,
        }
    }
}
