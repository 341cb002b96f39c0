//! Bounding volumes: the scalar [`Aabb`] and the four-wide [`SimdAabb`].

pub use self::aabb::Aabb;
pub use self::simd_aabb::SimdAabb;

mod aabb;
mod simd_aabb;
