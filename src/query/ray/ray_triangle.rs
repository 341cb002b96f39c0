use crate::math::{Point, Real, Vector};

/// Computes the intersection between a triangle and a ray.
///
/// If an intersection is found, returns `(t, u, v)` where `t >= 0` is the
/// hit distance along the ray and `(u, v)` are the barycentric weights of
/// the second and third vertices at the hit point. Degenerate (zero-area)
/// triangles and rays parallel to the triangle plane yield `None`.
///
/// The caller is responsible for clipping `t` against its current valid
/// interval.
pub fn ray_triangle_intersection(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    origin: &Point<Real>,
    dir: &Vector<Real>,
) -> Option<(Real, Real, Real)> {
    let ab = *b - *a;
    let ac = *c - *a;

    let n = ab.cross(&ac);
    let d = n.dot(dir);

    // The normal and the ray direction are parallel (this also covers
    // zero-area triangles and zero direction vectors).
    if d == 0.0 {
        return None;
    }

    let ap = *origin - *a;
    let t = ap.dot(&n);

    // The ray does not intersect the halfspace defined by the triangle.
    if (t < 0.0 && d < 0.0) || (t > 0.0 && d > 0.0) {
        return None;
    }

    let d = d.abs();

    // Compute the barycentric coordinates of the intersection.
    let e = -dir.cross(&ap);

    let (toi, u, v) = if t < 0.0 {
        let u = -ac.dot(&e);

        if u < 0.0 || u > d {
            return None;
        }

        let v = ab.dot(&e);

        if v < 0.0 || u + v > d {
            return None;
        }

        let inv_d = 1.0 / d;
        (-t * inv_d, u * inv_d, v * inv_d)
    } else {
        let u = ac.dot(&e);

        if u < 0.0 || u > d {
            return None;
        }

        let v = -ab.dot(&e);

        if v < 0.0 || u + v > d {
            return None;
        }

        let inv_d = 1.0 / d;
        (t * inv_d, u * inv_d, v * inv_d)
    };

    Some((toi, u, v))
}
