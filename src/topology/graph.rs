use crate::math::{Point, Real};
use crate::shape::Segment;
use crate::topology::{
    AtomicSegment, EdgeLabel, GraphBuilder, GridCell, LabelPolicy, LabelTally, SnapGrid,
};
use crate::utils::hashmap::HashMap;
use smallvec::SmallVec;

/// The index of a node in a [`Graph`].
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// The index of an edge in a [`Graph`].
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A point where edges meet.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    /// The snapped position of the node.
    pub position: Point,
    /// The grid cell identifying this node.
    pub cell: GridCell,
}

/// An undirected edge between two distinct nodes.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// The node at the start of `geometry`.
    pub u: NodeId,
    /// The node at the end of `geometry`.
    pub v: NodeId,
    /// The length of `geometry`, always greater than the intersection tolerance.
    pub length: Real,
    /// The polyline of this edge, from `u` to `v`. Its first and last points are the
    /// positions of `u` and `v`.
    pub geometry: Vec<Point>,
    /// The reconciled label of the segments covering this edge.
    pub semantic: EdgeLabel,
}

impl Edge {
    /// The endpoint of this edge that is not `node`.
    ///
    /// Returns `u` if `node` is not an endpoint of this edge.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if node == self.u {
            self.v
        } else {
            self.u
        }
    }

    /// The straight segments making up this edge.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.geometry.windows(2).map(|w| Segment::new(w[0], w[1]))
    }
}

/// What the builder dropped or merged, by reason.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscardCounters {
    /// Input segments whose endpoints snapped to the same grid cell.
    pub collapsed_by_snap: usize,
    /// Sub-segments whose two ends were merged into a single node, or rejected as
    /// self-loops or for being no longer than the intersection tolerance.
    pub below_intersect_tolerance: usize,
    /// Sub-segments merged into an identical edge (collinear overlaps, duplicates).
    pub merged_duplicates: usize,
    /// Distinct nodes closer than the intersection tolerance that were merged.
    pub ambiguous_intersections: usize,
}

impl DiscardCounters {
    /// The sum of all the counters.
    pub fn total(&self) -> usize {
        self.collapsed_by_snap
            + self.below_intersect_tolerance
            + self.merged_duplicates
            + self.ambiguous_intersections
    }
}

/// A planar graph built from a set of segments.
///
/// Nodes are unique per grid cell, edges only meet at nodes and never form self-loops.
/// Node and edge identifiers are dense indices assigned in a deterministic order.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    #[cfg_attr(feature = "serde-serialize", serde(skip))]
    pub(crate) adjacency: Vec<SmallVec<[EdgeId; 4]>>,
    #[cfg_attr(feature = "serde-serialize", serde(skip))]
    pub(crate) node_index: HashMap<GridCell, NodeId>,
    pub(crate) grid: SnapGrid,
    pub(crate) intersect_tolerance: Real,
    pub(crate) discards: DiscardCounters,
}

impl Graph {
    /// All the nodes, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All the edges, indexed by [`EdgeId`].
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Is this graph empty?
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The node with the given identifier.
    ///
    /// Panics if `id` is out of bounds.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The edge with the given identifier.
    ///
    /// Panics if `id` is out of bounds.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// The identifiers of all the nodes.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// The identifiers of all the edges.
    pub fn edge_ids(&self) -> impl ExactSizeIterator<Item = EdgeId> {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    /// The node whose grid cell contains `pt`, if any.
    pub fn node_at(&self, pt: &Point) -> Option<NodeId> {
        self.node_index.get(&self.grid.cell(pt)).copied()
    }

    /// The edges incident to a node, in insertion order.
    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency[node.index()]
    }

    /// The number of edges incident to a node.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].len()
    }

    /// The nodes adjacent to `node`. A neighbor linked by parallel edges is reported once
    /// per edge.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incident_edges(node)
            .iter()
            .map(move |e| self.edge(*e).other(node))
    }

    /// The sum of the lengths of all the edges.
    pub fn total_length(&self) -> Real {
        self.edges.iter().map(|e| e.length).sum()
    }

    /// The grid the nodes were snapped on.
    pub fn grid(&self) -> &SnapGrid {
        &self.grid
    }

    /// The intersection tolerance this graph was built with.
    pub fn intersect_tolerance(&self) -> Real {
        self.intersect_tolerance
    }

    /// What was dropped or merged while building this graph.
    pub fn discards(&self) -> &DiscardCounters {
        &self.discards
    }

    /// The straight segments of all the edges.
    pub fn to_segments(&self) -> Vec<Segment> {
        self.edges.iter().flat_map(|e| e.segments()).collect()
    }

    /// Dissolves the nodes linking exactly two edges with the same label.
    ///
    /// Each maximal chain of such edges becomes a single polyline edge. Chains closing
    /// on themselves are cut in two at their middle node so no self-loop is created.
    /// Nodes keep their cells but are renumbered.
    pub fn merge_chains(&self) -> Graph {
        let mut visited = vec![false; self.edges.len()];
        let mut builder = GraphBuilder::new(self.grid, self.intersect_tolerance);

        for node in self.node_ids() {
            if self.is_chain_end(node) {
                for edge in self.incident_edges(node) {
                    if !visited[edge.index()] {
                        let chain = self.walk_chain(node, *edge, &mut visited);
                        chain.add_to(&mut builder);
                    }
                }
            }
        }

        // Whatever remains are cycles without any chain end.
        for edge in self.edge_ids() {
            if !visited[edge.index()] {
                let chain = self.walk_chain(self.edge(edge).u, edge, &mut visited);
                chain.add_to(&mut builder);
            }
        }

        let mut result = builder.finish(&LabelPolicy::Unanimous);
        result.discards = self.discards;

        log::debug!(
            "merged {} edges into {} chains",
            self.edges.len(),
            result.edges.len()
        );

        result
    }

    fn is_chain_end(&self, node: NodeId) -> bool {
        match self.incident_edges(node) {
            [e1, e2] => self.edge(*e1).semantic != self.edge(*e2).semantic,
            _ => true,
        }
    }

    fn walk_chain(&self, start: NodeId, first: EdgeId, visited: &mut [bool]) -> Chain {
        let mut points = vec![self.node(start).position];
        let mut interior = vec![];
        let mut current = start;
        let mut edge_id = first;

        loop {
            visited[edge_id.index()] = true;
            let edge = self.edge(edge_id);
            let next = edge.other(current);

            if edge.u == current {
                points.extend_from_slice(&edge.geometry[1..]);
            } else {
                points.extend(edge.geometry.iter().rev().skip(1));
            }

            if next == start || self.is_chain_end(next) {
                return Chain {
                    points,
                    interior,
                    closed: next == start,
                    label: edge.semantic.clone(),
                };
            }

            interior.push(points.len() - 1);
            edge_id = match self.incident_edges(next) {
                [e1, e2] if *e1 == edge_id => *e2,
                [e1, _] => *e1,
                // `next` is not a chain end, so it has exactly two incident edges.
                _ => unreachable!(),
            };
            current = next;
        }
    }
}

struct Chain {
    points: Vec<Point>,
    // Indices in `points` of the dissolved nodes.
    interior: Vec<usize>,
    closed: bool,
    label: EdgeLabel,
}

impl Chain {
    fn add_to(self, builder: &mut GraphBuilder) {
        let tally = LabelTally::from_edge_label(&self.label);

        if self.closed {
            let mid = self.interior[self.interior.len() / 2];
            let _ = builder.add_segment(AtomicSegment::new(
                self.points[..=mid].to_vec(),
                tally.clone(),
            ));
            let _ = builder.add_segment(AtomicSegment::new(self.points[mid..].to_vec(), tally));
        } else {
            let _ = builder.add_segment(AtomicSegment::new(self.points, tally));
        }
    }
}
