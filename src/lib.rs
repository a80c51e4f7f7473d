/*!
planar-topology
========

**planar-topology** turns unstructured sets of 2D segments, typically extracted from
vector drawings, into clean planar graphs written with the rust programming language.

Endpoints are snapped onto a grid so that nearly coincident points become a single
node, segments are split at all their mutual intersections, and the resulting pieces
are deduplicated into an undirected graph whose edges only meet at their endpoints.

```
use planar_topology::math::Point;
use planar_topology::topology::{build_topology, RawSegment};

let segments = [
    RawSegment::labeled(Point::new(0.0, 0.0), Point::new(10.0, 0.0), "WALL"),
    RawSegment::labeled(Point::new(10.004, 0.0), Point::new(10.0, 8.0), "WALL"),
];
let graph = build_topology(&segments, 0.01, 0.01).unwrap();

assert_eq!(graph.num_nodes(), 3);
assert_eq!(graph.num_edges(), 2);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![warn(unused_qualifications)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod layers;
pub mod math;
pub mod shape;
pub mod topology;
pub mod units;
pub mod utils;
