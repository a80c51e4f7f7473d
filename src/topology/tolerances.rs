use crate::math::Real;
use crate::topology::{LabelPolicy, TopologyError};

/// Tolerances controlling the topology builder.
///
/// Both values are distances expressed in the same linear unit as the input
/// coordinates.
///
/// # Examples
///
/// ```
/// use planar_topology::topology::TopologyTolerances;
///
/// let tolerances = TopologyTolerances {
///     snap: 0.01,
///     intersect: 0.01,
/// };
/// assert!(tolerances.validate().is_ok());
/// assert!(TopologyTolerances { snap: -1.0, ..tolerances }.validate().is_err());
/// ```
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TopologyTolerances {
    /// The size of the snapping grid: two points rounding to the same grid cell are
    /// the same node.
    pub snap: Real,
    /// Edges shorter than or as long as this value are dropped as numerical noise.
    ///
    /// This is also the distance under which a point is considered to lie on a segment
    /// when detecting intersections.
    pub intersect: Real,
}

impl Default for TopologyTolerances {
    fn default() -> Self {
        Self {
            snap: 1.0e-3,
            intersect: 1.0e-3,
        }
    }
}

impl TopologyTolerances {
    /// Checks that both tolerances are positive and finite.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (name, value) in [("snap", self.snap), ("intersect", self.intersect)] {
            if value <= 0.0 || !value.is_finite() {
                return Err(TopologyError::InvalidTolerance { name, value });
            }
        }

        Ok(())
    }
}

/// The full configuration of [`build_topology_with_options`](crate::topology::build_topology_with_options).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOptions {
    /// The snapping and intersection tolerances.
    pub tolerances: TopologyTolerances,
    /// How disagreeing labels of overlapping segments are reconciled.
    pub label_policy: LabelPolicy,
}

impl BuildOptions {
    /// Options with the given tolerances and the default label policy.
    pub fn new(snap_tolerance: Real, intersect_tolerance: Real) -> Self {
        BuildOptions {
            tolerances: TopologyTolerances {
                snap: snap_tolerance,
                intersect: intersect_tolerance,
            },
            label_policy: LabelPolicy::default(),
        }
    }

    /// Replaces the label policy.
    pub fn with_label_policy(mut self, label_policy: LabelPolicy) -> Self {
        self.label_policy = label_policy;
        self
    }
}
