/*!
quadray
========

**quadray** is a quad-wide bounding-volume-hierarchy (QBVH) ray-traversal
kernel. It answers nearest-hit and any-hit queries for rays cast against a
scene of triangles, motion-blurred triangles and hair curves, including
single-level object instancing with optionally time-sampled instance
transforms.

The crate does not build trees: it consumes an immutable node array together
with primitive and object tables produced by an external builder, and runs
pure, allocation-free traversals against them. Any number of traversals may
run concurrently against the same immutable [`scene::Scene`].
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]

#[cfg(all(
    feature = "simd-is-enabled",
    not(feature = "simd-stable"),
    not(feature = "simd-nightly")
))]
std::compile_error!("The `simd-is-enabled` feature should not be enabled explicitly. Please enable the `simd-stable` or the `simd-nightly` feature instead.");

#[cfg_attr(test, macro_use)]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;
pub extern crate simba;

pub mod bounding_volume;
pub mod math;
pub mod partitioning;
pub mod query;
pub mod scene;
