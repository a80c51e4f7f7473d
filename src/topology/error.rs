use crate::math::Real;

/// Errors that prevent a topology from being built.
///
/// Only malformed inputs are errors. Degenerate segments, ambiguous intersections and
/// duplicate geometries are resolved deterministically and reported through
/// [`DiscardCounters`](crate::topology::DiscardCounters) instead.
///
/// # Example
///
/// ```
/// use planar_topology::topology::{build_topology, TopologyError};
///
/// match build_topology(&[], 0.0, 0.01) {
///     Err(TopologyError::InvalidTolerance { name, .. }) => assert_eq!(name, "snap"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum TopologyError {
    /// A tolerance is zero, negative, NaN or infinite.
    #[error("the {name} tolerance must be positive and finite, found {value}")]
    InvalidTolerance {
        /// Which tolerance is invalid (`"snap"` or `"intersect"`).
        name: &'static str,
        /// The rejected value.
        value: Real,
    },
    /// An input segment has a NaN or infinite coordinate.
    #[error("the input segment {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The index of the offending segment in the input slice.
        index: usize,
    },
    /// A curve could not be discretized into segments.
    #[error("invalid curve: {0}")]
    InvalidCurve(&'static str),
}
