use crate::{edge_between, labeled, seg};
use planar_topology::layers::{LayerClassifier, LayerNaming, SemanticRule};
use planar_topology::math::Point;
use planar_topology::shape::Segment;
use planar_topology::topology::{
    build_topology, build_topology_with_options, BuildOptions, EdgeLabel, LabelPolicy,
    RawSegment, MIXED_LABEL,
};

fn tag(label: &str) -> EdgeLabel {
    EdgeLabel::Tag(label.to_owned())
}

#[test]
fn labels_survive_splitting() {
    let graph = build_topology(
        &[
            labeled(0.0, 0.0, 10.0, 0.0, "WALL"),
            labeled(5.0, -5.0, 5.0, 5.0, "WINDOW"),
        ],
        0.01,
        0.01,
    )
    .unwrap();

    let wall = edge_between(&graph, [0.0, 0.0], [5.0, 0.0]).unwrap();
    let window = edge_between(&graph, [5.0, 0.0], [5.0, 5.0]).unwrap();
    assert_eq!(graph.edge(wall).semantic, tag("WALL"));
    assert_eq!(graph.edge(window).semantic, tag("WINDOW"));
}

#[test]
fn disagreeing_overlap_is_mixed() {
    let segments = [
        labeled(0.0, 0.0, 10.0, 0.0, "WALL"),
        labeled(5.0, 0.0, 15.0, 0.0, "DOOR"),
    ];
    let graph = build_topology(&segments, 0.01, 0.01).unwrap();

    let shared = graph.edge(edge_between(&graph, [5.0, 0.0], [10.0, 0.0]).unwrap());
    assert_eq!(shared.semantic, EdgeLabel::Mixed);
    assert_eq!(shared.semantic.as_str(), Some(MIXED_LABEL));

    let left = graph.edge(edge_between(&graph, [0.0, 0.0], [5.0, 0.0]).unwrap());
    let right = graph.edge(edge_between(&graph, [10.0, 0.0], [15.0, 0.0]).unwrap());
    assert_eq!(left.semantic, tag("WALL"));
    assert_eq!(right.semantic, tag("DOOR"));
}

#[test]
fn unlabeled_contributions_do_not_conflict() {
    let graph = build_topology(
        &[labeled(0.0, 0.0, 10.0, 0.0, "WALL"), seg(10.0, 0.0, 0.0, 0.0)],
        0.01,
        0.01,
    )
    .unwrap();

    assert_eq!(graph.num_edges(), 1);
    assert_eq!(graph.edges()[0].semantic, tag("WALL"));

    let graph = build_topology(&[seg(0.0, 0.0, 1.0, 0.0)], 0.01, 0.01).unwrap();
    assert_eq!(graph.edges()[0].semantic, EdgeLabel::Unlabeled);
    assert_eq!(graph.edges()[0].semantic.as_str(), None);
}

#[test]
fn label_policies() {
    let segments = [
        labeled(0.0, 0.0, 10.0, 0.0, "WALL"),
        labeled(0.0, 0.0, 10.0, 0.0, "WALL"),
        labeled(10.0, 0.0, 0.0, 0.0, "DOOR"),
    ];
    let build = |policy: LabelPolicy| {
        let options = BuildOptions::new(0.01, 0.01).with_label_policy(policy);
        let graph = build_topology_with_options(&segments, &options).unwrap();
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.discards().merged_duplicates, 2);
        graph.edges()[0].semantic.clone()
    };

    assert_eq!(build(LabelPolicy::Unanimous), EdgeLabel::Mixed);
    assert_eq!(build(LabelPolicy::Majority), tag("WALL"));
    assert_eq!(
        build(LabelPolicy::Priority(vec!["DOOR".to_owned()])),
        tag("DOOR")
    );
    assert_eq!(
        build(LabelPolicy::Priority(vec!["WINDOW".to_owned()])),
        EdgeLabel::Mixed
    );
}

#[test]
fn layer_names_drive_labels() {
    let classifier = LayerClassifier::new(vec![
        SemanticRule::new("wall", "WALL").unwrap(),
        SemanticRule::new("dim", "DIMENSION").unwrap(),
    ])
    .with_naming(LayerNaming {
        strip_chars: vec![' '],
        uppercase: true,
        remove_prefixes: vec!["a-".to_owned()],
    })
    .exclude(["DIMENSION"]);

    let drawing = [
        ("A-Wall", [0.0, 0.0, 10.0, 0.0]),
        ("a-dim", [0.0, -1.0, 10.0, -1.0]),
        ("Furniture", [5.0, -5.0, 5.0, 5.0]),
    ];
    let segments: Vec<RawSegment> = drawing
        .iter()
        .filter_map(|(layer, [ax, ay, bx, by])| {
            let semantic = classifier.semantic(layer);
            classifier.keep(semantic).then(|| {
                RawSegment::new(
                    Segment::new(Point::new(*ax, *ay), Point::new(*bx, *by)),
                    semantic.map(str::to_owned),
                )
            })
        })
        .collect();
    assert_eq!(segments.len(), 2);

    let graph = build_topology(&segments, 0.01, 0.01).unwrap();
    assert_eq!(graph.num_edges(), 4);

    let wall = edge_between(&graph, [0.0, 0.0], [5.0, 0.0]).unwrap();
    let furniture = edge_between(&graph, [5.0, 0.0], [5.0, 5.0]).unwrap();
    assert_eq!(graph.edge(wall).semantic, tag("WALL"));
    assert_eq!(graph.edge(furniture).semantic, EdgeLabel::Unlabeled);
}
