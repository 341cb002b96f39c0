use crate::bounding_volume::Aabb;
use crate::math::{Point, SimdBool, SimdReal, DIM, SIMD_WIDTH};
use crate::query::SimdInvRay;
use num::Zero;
use simba::simd::{SimdPartialOrd, SimdValue};

/// Four AABBs represented as a single SoA AABB with SIMD components.
///
/// This is the box storage of one quad-node: lane `i` of each coordinate
/// holds the bounds of the `i`-th child, so that a single slab test
/// intersects a ray against all four children at once. Unused lanes hold
/// the invalid AABB and can never report a hit.
#[derive(Debug, Copy, Clone)]
pub struct SimdAabb {
    /// The min coordinates of the AABBs.
    pub mins: Point<SimdReal>,
    /// The max coordinates of the AABBs.
    pub maxs: Point<SimdReal>,
}

impl SimdAabb {
    /// An invalid SIMD AABB: every lane fails every intersection test.
    pub fn new_invalid() -> Self {
        Self::splat(Aabb::new_invalid())
    }

    /// Builds a SIMD AABB composed of four identical AABBs.
    pub fn splat(aabb: Aabb) -> Self {
        Self {
            mins: Point::splat(aabb.mins),
            maxs: Point::splat(aabb.maxs),
        }
    }

    /// Replaces the `i`-th AABB of this SIMD AABB by the given value.
    pub fn replace(&mut self, i: usize, aabb: Aabb) {
        self.mins.replace(i, aabb.mins);
        self.maxs.replace(i, aabb.maxs);
    }

    /// Extracts the AABB stored in the `i`-th lane.
    pub fn extract(&self, i: usize) -> Aabb {
        Aabb {
            mins: self.mins.extract(i),
            maxs: self.maxs.extract(i),
        }
    }

    /// Casts a ray with precomputed inverse direction on the four AABBs.
    ///
    /// The near and far slab bound of each axis is selected once from the
    /// sign of the corresponding inverse-direction component, so the test
    /// itself is swap-free. Returns, per lane, whether the ray interval
    /// `[0, t_far]` intersects the box, and the entry distance.
    ///
    /// Inverse directions come from [`crate::query::clamped_inverse_direction`]
    /// and are always finite, so zero direction components cannot produce
    /// NaNs here.
    #[inline]
    pub fn cast_inv_ray(&self, ray: &SimdInvRay, t_far: SimdReal) -> (SimdBool, SimdReal) {
        let mut t_near = SimdReal::zero();
        let mut t_far = t_far;

        for i in 0..DIM {
            let (near, far) = if ray.neg[i] {
                (self.maxs[i], self.mins[i])
            } else {
                (self.mins[i], self.maxs[i])
            };

            t_near = t_near.simd_max((near - ray.origin[i]) * ray.inv_dir[i]);
            t_far = t_far.simd_min((far - ray.origin[i]) * ray.inv_dir[i]);
        }

        (t_near.simd_le(t_far), t_near)
    }
}

impl From<[Aabb; SIMD_WIDTH]> for SimdAabb {
    fn from(aabbs: [Aabb; SIMD_WIDTH]) -> Self {
        let mut result = Self::new_invalid();
        for (i, aabb) in aabbs.into_iter().enumerate() {
            result.replace(i, aabb);
        }
        result
    }
}
