//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use num::Bounded;

/// An Axis-Aligned Bounding Box.
///
/// Invariant for a valid AABB: `mins[i] <= maxs[i]` on every axis. An
/// *invalid* AABB (see [`Aabb::new_invalid`]) deliberately breaks this
/// invariant so that it fails every intersection test; unused lanes of a
/// [`super::SimdAabb`] are filled with it.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The minimum coordinates of the AABB.
    pub mins: Point<Real>,
    /// The maximum coordinates of the AABB.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must be smaller than `maxs` on every axis.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `+MAX` and
    /// `maxs` components set to `-MAX`.
    ///
    /// This is often used as the initial values of some AABB merging
    /// algorithms, and marks unused lanes of a packed node.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Computes the AABB of a set of points.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.mins = result.mins.inf(pt);
            result.maxs = result.maxs.sup(pt);
        }

        result
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The smallest AABB that contains both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Enlarges this AABB by `amount` on every axis, in both directions.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        let margin = Vector::repeat(amount);
        Aabb {
            mins: self.mins - margin,
            maxs: self.maxs + margin,
        }
    }

    /// Casts a ray with a precomputed (clamped) inverse direction on this AABB.
    ///
    /// This is the scalar reference for [`super::SimdAabb::cast_inv_ray`]: it
    /// performs the same slab test, selecting the near/far bound on each axis
    /// from the sign of the inverse direction, and makes the exact same hit
    /// decisions. Returns the entry distance, clipped to `[0, max_t]`.
    #[inline]
    pub fn cast_clamped_ray(
        &self,
        origin: &Point<Real>,
        inv_dir: &Vector<Real>,
        max_t: Real,
    ) -> Option<Real> {
        let mut t_near: Real = 0.0;
        let mut t_far = max_t;

        for i in 0..DIM {
            let (near, far) = if inv_dir[i] < 0.0 {
                (self.maxs[i], self.mins[i])
            } else {
                (self.mins[i], self.maxs[i])
            };

            t_near = t_near.max((near - origin[i]) * inv_dir[i]);
            t_far = t_far.min((far - origin[i]) * inv_dir[i]);
        }

        (t_near <= t_far).then_some(t_near)
    }
}
