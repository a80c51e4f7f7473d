use crate::{assert_interior_disjoint, edge_between, seg};
use planar_topology::math::{Point, Real};
use planar_topology::na;
use planar_topology::topology::{build_topology, DiscardCounters};

#[test]
fn crossing_segments() {
    let graph = build_topology(&[seg(0.0, 0.0, 10.0, 0.0), seg(5.0, -5.0, 5.0, 5.0)], 0.01, 0.01)
        .unwrap();

    assert_eq!(graph.num_nodes(), 5);
    assert_eq!(graph.num_edges(), 4);

    for pt in [[0.0, 0.0], [5.0, 0.0], [10.0, 0.0], [5.0, -5.0], [5.0, 5.0]] {
        assert!(graph.node_at(&pt.into()).is_some(), "missing node {pt:?}");
    }

    for edge in graph.edges() {
        assert_relative_eq!(edge.length, 5.0, epsilon = 1.0e-9);
    }

    let center = graph.node_at(&Point::new(5.0, 0.0)).unwrap();
    assert_eq!(graph.degree(center), 4);
    assert_eq!(*graph.discards(), DiscardCounters::default());
}

#[test]
fn near_coincident_endpoints_share_a_node() {
    let graph = build_topology(
        &[seg(0.0, 0.0, 10.0, 0.0), seg(10.005, 0.0, 20.0, 0.0)],
        0.01,
        0.01,
    )
    .unwrap();

    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 2);

    let junction = graph.node_at(&Point::new(10.0, 0.0)).unwrap();
    assert_eq!(graph.degree(junction), 2);
    assert_relative_eq!(graph.total_length(), 20.0, epsilon = 1.0e-9);
}

#[test]
fn endpoints_rounding_to_the_same_cell_share_a_node() {
    let graph = build_topology(
        &[seg(0.0, 0.0, 10.0, 0.0), seg(10.004, 0.0, 10.0, 8.0)],
        0.01,
        0.01,
    )
    .unwrap();

    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 2);
    assert_eq!(graph.discards().ambiguous_intersections, 0);
}

#[test]
fn tiny_segment_is_discarded() {
    let graph = build_topology(&[seg(0.0, 0.0, 0.0005, 0.0)], 0.01, 0.01).unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.num_nodes(), 0);
    assert_eq!(graph.discards().collapsed_by_snap, 1);

    // Survives snapping on a finer grid, but is still below the intersection tolerance.
    let graph = build_topology(
        &[seg(0.0, 0.0, 0.0005, 0.0), seg(1.0, 1.0, 2.0, 1.0)],
        0.0001,
        0.01,
    )
    .unwrap();
    assert_eq!(graph.num_edges(), 1);
    assert_eq!(graph.num_nodes(), 2);
    assert_eq!(graph.discards().below_intersect_tolerance, 1);
    assert_eq!(graph.discards().total(), 1);
}

#[test]
fn collinear_overlap_is_not_duplicated() {
    let graph = build_topology(&[seg(0.0, 0.0, 10.0, 0.0), seg(5.0, 0.0, 15.0, 0.0)], 0.01, 0.01)
        .unwrap();

    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.num_edges(), 3);
    assert!(edge_between(&graph, [0.0, 0.0], [5.0, 0.0]).is_some());
    assert!(edge_between(&graph, [5.0, 0.0], [10.0, 0.0]).is_some());
    assert!(edge_between(&graph, [10.0, 0.0], [15.0, 0.0]).is_some());
    assert_eq!(graph.discards().merged_duplicates, 1);
    assert_relative_eq!(graph.total_length(), 15.0, epsilon = 1.0e-9);
}

#[test]
fn contained_segment_splits_its_host() {
    let graph = build_topology(&[seg(0.0, 0.0, 10.0, 0.0), seg(7.0, 0.0, 2.0, 0.0)], 0.01, 0.01)
        .unwrap();

    assert_eq!(graph.num_edges(), 3);
    assert!(edge_between(&graph, [0.0, 0.0], [2.0, 0.0]).is_some());
    assert!(edge_between(&graph, [2.0, 0.0], [7.0, 0.0]).is_some());
    assert!(edge_between(&graph, [7.0, 0.0], [10.0, 0.0]).is_some());
}

#[test]
fn t_junction_within_tolerance() {
    // The stem stops 0.003 short of the bar.
    let graph = build_topology(&[seg(0.0, 0.0, 10.0, 0.0), seg(4.0, 0.003, 4.0, 6.0)], 0.001, 0.01)
        .unwrap();

    assert_eq!(graph.num_edges(), 3);
    let junction = graph.node_at(&Point::new(4.0, 0.003)).unwrap();
    assert_eq!(graph.degree(junction), 3);
}

#[test]
fn empty_input_gives_an_empty_graph() {
    let graph = build_topology(&[], 0.01, 0.01).unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.num_nodes(), 0);
    assert_eq!(graph.total_length(), 0.0);
}

#[test]
fn hash_grid_has_all_its_crossings() {
    // Two horizontal and two vertical lines: a `#` pattern.
    let segments = [
        seg(0.0, 1.0, 3.0, 1.0),
        seg(0.0, 2.0, 3.0, 2.0),
        seg(1.0, 0.0, 1.0, 3.0),
        seg(2.0, 0.0, 2.0, 3.0),
    ];
    let graph = build_topology(&segments, 0.01, 0.01).unwrap();

    assert_eq!(graph.num_nodes(), 12);
    assert_eq!(graph.num_edges(), 12);
    assert_eq!(
        graph.node_ids().filter(|n| graph.degree(*n) == 4).count(),
        4
    );
    assert_relative_eq!(graph.total_length(), 12.0, epsilon = 1.0e-9);

    // The output only depends on the segment set, not on its order.
    let mut reversed = segments.to_vec();
    reversed.reverse();
    let other = build_topology(&reversed, 0.01, 0.01).unwrap();
    let mut cells: Vec<_> = graph.nodes().iter().map(|n| n.cell).collect();
    let mut other_cells: Vec<_> = other.nodes().iter().map(|n| n.cell).collect();
    cells.sort();
    other_cells.sort();
    assert_eq!(cells, other_cells);
    assert_eq!(graph.num_edges(), other.num_edges());
}

#[test]
fn run_of_short_chords_does_not_drift() {
    // Fifty chords of 0.01 along y = 0, each one below the intersection tolerance.
    let mut segments: Vec<_> = (0..50)
        .map(|i| {
            let x = 10.0 + i as Real * 0.01;
            seg(x, 0.0, x + 0.01, 0.0)
        })
        .collect();
    segments.push(seg(10.5, 0.0, 10.5, 5.0));
    segments.push(seg(10.25, 1.0, 10.25, 3.0));

    let graph = build_topology(&segments, 0.001, 0.0101).unwrap();
    assert_interior_disjoint(&graph);
    assert!(edge_between(&graph, [10.25, 1.0], [10.25, 3.0]).is_some());

    let top = graph.node_at(&Point::new(10.5, 5.0)).unwrap();
    assert_eq!(graph.degree(top), 1);
    let bottom = graph.edge(graph.incident_edges(top)[0]).other(top);
    assert!(na::distance(&graph.node(bottom).position, &Point::new(10.5, 0.0)) <= 0.0111);

    for node in graph.nodes() {
        if node.position.y < 0.5 {
            assert!(node.position.y.abs() <= 0.0111);
            assert!(node.position.x >= 9.99 && node.position.x <= 10.51);
        }
    }
}

#[test]
fn snapped_crossing_does_not_reroute_across_a_wall() {
    // The crossing at (6, 0.18) snaps to (6, 0.2) and bends the sloped segment over the
    // end of the wall at x = 3.1, which must become a junction.
    let graph = build_topology(
        &[
            seg(0.0, 0.0, 10.0, 0.3),
            seg(6.0, -5.0, 6.0, 5.0),
            seg(3.1, 0.1, 3.1, 3.0),
        ],
        0.1,
        0.001,
    )
    .unwrap();

    assert_interior_disjoint(&graph);
    assert_eq!(graph.num_nodes(), 7);
    assert_eq!(graph.num_edges(), 6);

    let junction = graph.node_at(&Point::new(3.1, 0.1)).unwrap();
    assert_eq!(graph.degree(junction), 3);
    assert_eq!(graph.degree(graph.node_at(&Point::new(6.0, 0.2)).unwrap()), 4);
    assert!(edge_between(&graph, [0.0, 0.0], [3.1, 0.1]).is_some());
}
