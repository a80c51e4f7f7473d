use crate::{edge_between, labeled};
use planar_topology::math::Point;
use planar_topology::shape::Curve;
use planar_topology::topology::{build_topology, EdgeLabel, RawSegment};
use planar_topology::units::LinearUnit;

#[test]
fn square_room_merges_into_two_edges() {
    let graph = build_topology(
        &[
            labeled(0.0, 0.0, 1.0, 0.0, "WALL"),
            labeled(1.0, 0.0, 1.0, 1.0, "WALL"),
            labeled(1.0, 1.0, 0.0, 1.0, "WALL"),
            labeled(0.0, 1.0, 0.0, 0.0, "WALL"),
        ],
        0.01,
        0.01,
    )
    .unwrap();
    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.num_edges(), 4);

    let merged = graph.merge_chains();
    assert_eq!(merged.num_nodes(), 2);
    assert_eq!(merged.num_edges(), 2);

    for edge in merged.edges() {
        assert_ne!(edge.u, edge.v);
        assert_eq!(edge.geometry.len(), 3);
        assert_relative_eq!(edge.length, 2.0, epsilon = 1.0e-9);
        assert_eq!(edge.semantic, EdgeLabel::Tag("WALL".to_owned()));
    }

    assert_relative_eq!(merged.total_length(), 4.0, epsilon = 1.0e-9);
}

#[test]
fn chains_stop_at_junctions_and_label_changes() {
    let graph = build_topology(
        &[
            labeled(0.0, 0.0, 1.0, 0.0, "WALL"),
            labeled(1.0, 0.0, 2.0, 1.0, "WALL"),
            labeled(2.0, 1.0, 3.0, 1.0, "WALL"),
            labeled(1.0, 0.0, 1.0, -1.0, "WALL"),
            labeled(3.0, 1.0, 4.0, 1.0, "DOOR"),
        ],
        0.01,
        0.01,
    )
    .unwrap();
    assert_eq!(graph.num_edges(), 5);

    let merged = graph.merge_chains();
    assert_eq!(merged.num_edges(), 4);
    assert_eq!(merged.num_nodes(), 5);
    assert!(merged.node_at(&Point::new(2.0, 1.0)).is_none());

    let bend = merged.edge(edge_between(&merged, [1.0, 0.0], [3.0, 1.0]).unwrap());
    assert_eq!(bend.geometry.len(), 3);
    assert_relative_eq!(bend.length, 2.0f64.sqrt() + 1.0, epsilon = 1.0e-9);

    assert!(edge_between(&merged, [3.0, 1.0], [4.0, 1.0]).is_some());
    assert_relative_eq!(merged.total_length(), graph.total_length(), epsilon = 1.0e-9);
}

#[test]
fn discretized_circle_is_a_ring() {
    let circle = Curve::Circle {
        center: Point::new(2.0, 2.0),
        radius: 1.0,
    };
    let segments = circle.to_raw_segments(0.1, Some("COLUMN")).unwrap();
    let graph = build_topology(&segments, 0.001, 0.001).unwrap();

    assert_eq!(graph.num_nodes(), segments.len());
    assert_eq!(graph.num_edges(), segments.len());
    assert!(graph.node_ids().all(|n| graph.degree(n) == 2));

    let merged = graph.merge_chains();
    assert_eq!(merged.num_nodes(), 2);
    assert_eq!(merged.num_edges(), 2);
    assert_relative_eq!(merged.total_length(), graph.total_length(), epsilon = 1.0e-9);
}

#[test]
fn drawings_in_millimeters_are_scaled_to_meters() {
    let scale = LinearUnit::from_insunits(4).scale_to_meters();
    let segments: Vec<_> = [
        labeled(0.0, 0.0, 4000.0, 0.0, "WALL"),
        labeled(2000.0, -1000.0, 2000.0, 1000.0, "WALL"),
    ]
    .iter()
    .map(|s: &RawSegment| s.scaled(scale))
    .collect();

    let graph = build_topology(&segments, 0.001, 0.001).unwrap();
    assert_eq!(graph.num_edges(), 4);
    assert_relative_eq!(graph.total_length(), 6.0, epsilon = 1.0e-9);
    assert!(graph.node_at(&Point::new(2.0, 0.0)).is_some());
}
