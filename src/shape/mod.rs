//! Geometric primitives consumed by the topology builder.

pub use self::curve::{Curve, MAX_ARC_POINTS};
pub use self::segment::{Segment, SegmentPointLocation};

mod curve;
mod segment;
