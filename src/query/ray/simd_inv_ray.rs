use crate::math::{Point, Real, SimdReal, Vector, DIM};
use simba::simd::SimdValue;

/// Componentwise reciprocal of a ray direction, with components too close to
/// zero clamped to a large finite value of matching sign.
///
/// The clamp keeps the slab test free of NaNs for axis-aligned rays: a zero
/// component maps to `±1 / EPSILON` instead of `±inf`, which makes the
/// corresponding slab distances huge but still totally ordered.
pub fn clamped_inverse_direction(dir: Vector<Real>) -> Vector<Real> {
    dir.map(|r| {
        if r.abs() < Real::EPSILON {
            r.signum() / Real::EPSILON
        } else {
            1.0 / r
        }
    })
}

/// A ray prepared for the packed four-wide slab test: splatted origin,
/// clamped inverse direction, and the per-axis direction signs selecting the
/// near/far slab bounds.
///
/// This is rebuilt whenever traversal changes spaces (instance enter/exit),
/// since origin and direction are expressed in the current space.
#[derive(Debug, Copy, Clone)]
pub struct SimdInvRay {
    /// The ray origin, splatted across lanes.
    pub origin: Point<SimdReal>,
    /// The clamped inverse direction, splatted across lanes.
    pub inv_dir: Vector<SimdReal>,
    /// For each axis, `true` if the direction component is negative, i.e.
    /// if the max bound is the near one.
    pub neg: [bool; DIM],
}

impl SimdInvRay {
    /// Precomputes the packed-test data for a ray in the current space.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Self {
        let inv_dir = clamped_inverse_direction(dir);
        Self {
            origin: Point::splat(origin),
            inv_dir: Vector::splat(inv_dir),
            neg: [inv_dir.x < 0.0, inv_dir.y < 0.0, inv_dir.z < 0.0],
        }
    }
}
