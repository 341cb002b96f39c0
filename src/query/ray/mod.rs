//! Rays, per-primitive intersection routines, and the traversal driver.

pub use self::ray::{Intersection, Ray};
pub use self::ray_curve::ray_curve_intersection;
pub use self::ray_triangle::ray_triangle_intersection;
pub use self::simd_inv_ray::{clamped_inverse_direction, SimdInvRay};

mod ray;
mod ray_curve;
pub(crate) mod ray_scene;
mod ray_triangle;
mod simd_inv_ray;
