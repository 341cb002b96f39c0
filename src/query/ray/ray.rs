//! Structures needed to cast rays.

use crate::math::{Point, Real, Vector};
use crate::scene::PrimitiveKind;

/// A ray for traversal queries.
///
/// A ray is a half-infinite line starting at an origin point and extending
/// in a direction. The direction does not need to be normalized; hit
/// distances are expressed in units of `dir`'s length.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray. Does not need to be normalized.
    pub dir: Vector<Real>,
    /// Time of the ray in `[0, 1]`, sampling motion-blurred geometry and
    /// transforms. Ignored by static primitives.
    pub time: Real,
    /// Upper bound of the valid parametric interval `[0, t_max]`.
    pub t_max: Real,
    /// Visibility mask. A primitive is tested only if the owning object's
    /// visibility mask and this mask share at least one bit.
    pub visibility: u32,
}

impl Ray {
    /// Creates a new ray at time `0` with an unbounded interval and all
    /// visibility bits set.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray {
            origin,
            dir,
            time: 0.0,
            t_max: Real::MAX,
            visibility: u32::MAX,
        }
    }

    /// This ray, with its valid interval clipped to `[0, t_max]`.
    pub fn with_t_max(mut self, t_max: Real) -> Ray {
        self.t_max = t_max;
        self
    }

    /// This ray, sampled at the given time.
    pub fn at_time(mut self, time: Real) -> Ray {
        self.time = time;
        self
    }

    /// Computes the point at the given parameter on this line.
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// The closest (or, for any-hit queries, first) intersection found by a
/// traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The hit distance along the ray, in `[0, t_max]`.
    pub t: Real,
    /// First barycentric-style coordinate of the hit. For triangles this is
    /// the weight of the second vertex; for curves the parameter along the
    /// curve span.
    pub u: Real,
    /// Second barycentric-style coordinate of the hit. For triangles this is
    /// the weight of the third vertex; zero for curves.
    pub v: Real,
    /// Index of the hit primitive in the scene's primitive table.
    pub prim: u32,
    /// Index of the object owning the hit primitive.
    pub object: u32,
    /// The kind of the hit primitive.
    pub kind: PrimitiveKind,
}
