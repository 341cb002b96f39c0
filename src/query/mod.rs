//! Ray-casting queries against the scene acceleration structure.

pub use self::ray::{
    clamped_inverse_direction, ray_curve_intersection, ray_triangle_intersection, Intersection,
    Ray, SimdInvRay,
};

pub mod ray;
