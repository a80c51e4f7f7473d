use crate::seg;
use planar_topology::topology::{
    build_topology, build_topology_with_options, BuildOptions, TopologyError,
    TopologyTolerances,
};

#[test]
fn invalid_tolerances_are_rejected() {
    let segments = [seg(0.0, 0.0, 1.0, 0.0)];

    assert_eq!(
        build_topology(&segments, 0.0, 0.01).unwrap_err(),
        TopologyError::InvalidTolerance {
            name: "snap",
            value: 0.0
        }
    );
    assert_eq!(
        build_topology(&segments, 0.01, -1.0).unwrap_err(),
        TopologyError::InvalidTolerance {
            name: "intersect",
            value: -1.0
        }
    );

    match build_topology(&segments, 0.01, f64::NAN) {
        Err(TopologyError::InvalidTolerance { name, value }) => {
            assert_eq!(name, "intersect");
            assert!(value.is_nan());
        }
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(build_topology(&segments, f64::INFINITY, 0.01).is_err());
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let segments = [
        seg(0.0, 0.0, 1.0, 0.0),
        seg(0.0, 0.0, f64::NAN, 1.0),
        seg(0.0, f64::INFINITY, 1.0, 1.0),
    ];

    assert_eq!(
        build_topology(&segments, 0.01, 0.01).unwrap_err(),
        TopologyError::NonFiniteCoordinate { index: 1 }
    );
}

#[test]
fn default_options_are_valid() {
    let options = BuildOptions::default();
    assert_eq!(options.tolerances, TopologyTolerances::default());
    assert!(options.tolerances.validate().is_ok());

    let graph = build_topology_with_options(&[seg(0.0, 0.0, 1.0, 1.0)], &options).unwrap();
    assert_eq!(graph.num_edges(), 1);

    let error = build_topology(&[], -0.5, 0.01).unwrap_err();
    assert_eq!(
        error.to_string(),
        "the snap tolerance must be positive and finite, found -0.5"
    );
}
