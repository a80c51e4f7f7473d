//! Various unsorted geometrical and logical operators.

pub use self::segments_intersection::{segments_intersection2d, SegmentsIntersection};
pub use self::sorted_pair::SortedPair;

pub mod hashmap;
mod segments_intersection;
mod sorted_pair;
