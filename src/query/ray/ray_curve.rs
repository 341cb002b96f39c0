use crate::math::{Point, Real, Vector};
use crate::scene::{Curve, CurveBasis};

/// Number of linear pieces a cardinal curve span is flattened into before
/// intersection.
const CURVE_SUBDIVISIONS: usize = 8;

/// Computes the intersection between a hair curve and a ray.
///
/// The curve span is tested as one capsule in [`CurveBasis::Linear`] mode,
/// or flattened into [`CURVE_SUBDIVISIONS`] capsules along the Catmull-Rom
/// interpolation of its control cage in [`CurveBasis::CatmullRom`] mode.
/// Each piece uses the curve radius interpolated at its midpoint.
///
/// Returns `(t, u, v)` where `u` is the curve parameter of the hit along the
/// span and `v` is always zero. Zero-length or zero-radius curves yield
/// `None`.
pub fn ray_curve_intersection(
    curve: &Curve,
    basis: CurveBasis,
    origin: &Point<Real>,
    dir: &Vector<Real>,
) -> Option<(Real, Real, Real)> {
    let mut best: Option<(Real, Real)> = None;

    match basis {
        CurveBasis::Linear => {
            let radius = curve.radius_at(0.5);
            best = ray_capsule_intersection(&curve.ctrl[1], &curve.ctrl[2], radius, origin, dir);
        }
        CurveBasis::CatmullRom => {
            let step = 1.0 / CURVE_SUBDIVISIONS as Real;

            for k in 0..CURVE_SUBDIVISIONS {
                let s0 = k as Real * step;
                let s1 = s0 + step;
                let p0 = curve.eval_catmull_rom(s0);
                let p1 = curve.eval_catmull_rom(s1);
                let radius = curve.radius_at((s0 + s1) * 0.5);

                if let Some((t, u)) = ray_capsule_intersection(&p0, &p1, radius, origin, dir) {
                    if best.map_or(true, |(best_t, _)| t < best_t) {
                        best = Some((t, s0 + u * step));
                    }
                }
            }
        }
    }

    best.map(|(t, u)| (t, u, 0.0))
}

/// Casts a ray on the capsule of the given radius around the segment
/// `[p0, p1]`.
///
/// Returns the smallest non-negative hit distance and the parameter of the
/// hit along the segment axis. Degenerate segments and non-positive radii
/// yield `None`.
fn ray_capsule_intersection(
    p0: &Point<Real>,
    p1: &Point<Real>,
    radius: Real,
    origin: &Point<Real>,
    dir: &Vector<Real>,
) -> Option<(Real, Real)> {
    let ba = *p1 - *p0;
    let oa = *origin - *p0;
    let baba = ba.norm_squared();

    if baba == 0.0 || radius <= 0.0 {
        return None;
    }

    let bard = ba.dot(dir);
    let baoa = ba.dot(&oa);
    let rdoa = dir.dot(&oa);

    let mut best: Option<(Real, Real)> = None;

    // Cylindrical body.
    let a = baba * dir.norm_squared() - bard * bard;
    let b = baba * rdoa - baoa * bard;
    let c = baba * (oa.norm_squared() - radius * radius) - baoa * baoa;
    let h = b * b - a * c;

    if a != 0.0 && h >= 0.0 {
        let sqrt_h = h.sqrt();
        for t in [(-b - sqrt_h) / a, (-b + sqrt_h) / a] {
            let y = baoa + t * bard;
            if t >= 0.0 && y >= 0.0 && y <= baba {
                best = Some((t, y / baba));
                break;
            }
        }
    }

    // Spherical caps.
    for (cap, u) in [(p0, 0.0), (p1, 1.0)] {
        if let Some(t) = ray_sphere_intersection(cap, radius, origin, dir) {
            // Only keep the cap hit if it lies on the capsule surface, i.e.
            // its axis projection falls outside of the cylindrical body.
            let y = baoa + t * bard;
            let on_cap = if u == 0.0 { y <= 0.0 } else { y >= baba };
            if on_cap && best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, u));
            }
        }
    }

    best
}

/// Smallest non-negative `t` at which the ray intersects the sphere, if any.
fn ray_sphere_intersection(
    center: &Point<Real>,
    radius: Real,
    origin: &Point<Real>,
    dir: &Vector<Real>,
) -> Option<Real> {
    let dcenter = *origin - *center;
    let a = dir.norm_squared();
    let b = dcenter.dot(dir);
    let c = dcenter.norm_squared() - radius * radius;

    if a == 0.0 || (c > 0.0 && b > 0.0) {
        return None;
    }

    let delta = b * b - a * c;
    if delta < 0.0 {
        return None;
    }

    let t = (-b - delta.sqrt()) / a;
    if t >= 0.0 {
        Some(t)
    } else {
        // The origin is inside the sphere; report the exit point.
        let t = (-b + delta.sqrt()) / a;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod test {
    use super::ray_curve_intersection;
    use crate::math::{Point, Real, Vector};
    use crate::scene::{Curve, CurveBasis};

    fn straight_curve(radius: Real) -> Curve {
        Curve {
            ctrl: [
                Point::new(-3.0, 0.0, 0.0),
                Point::new(-1.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(3.0, 0.0, 0.0),
            ],
            radius: [radius, radius],
        }
    }

    #[test]
    fn perpendicular_hit_linear() {
        let curve = straight_curve(0.25);
        let origin = Point::new(0.0, 5.0, 0.0);
        let dir = Vector::new(0.0, -1.0, 0.0);

        let (t, u, v) = ray_curve_intersection(&curve, CurveBasis::Linear, &origin, &dir).unwrap();
        assert_relative_eq!(t, 5.0 - 0.25, epsilon = 1.0e-5);
        assert_relative_eq!(u, 0.5, epsilon = 1.0e-5);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn perpendicular_hit_cardinal() {
        // A straight control cage interpolates to the same straight span.
        let curve = straight_curve(0.25);
        let origin = Point::new(0.5, 5.0, 0.0);
        let dir = Vector::new(0.0, -1.0, 0.0);

        let (t, u, _) =
            ray_curve_intersection(&curve, CurveBasis::CatmullRom, &origin, &dir).unwrap();
        assert_relative_eq!(t, 5.0 - 0.25, epsilon = 1.0e-4);
        assert_relative_eq!(u, 0.75, epsilon = 1.0e-4);
    }

    #[test]
    fn cap_hit() {
        let curve = straight_curve(0.25);
        // Aimed at the tip of the span, along its axis.
        let origin = Point::new(5.0, 0.0, 0.0);
        let dir = Vector::new(-1.0, 0.0, 0.0);

        let (t, u, _) =
            ray_curve_intersection(&curve, CurveBasis::Linear, &origin, &dir).unwrap();
        assert_relative_eq!(t, 5.0 - 1.0 - 0.25, epsilon = 1.0e-5);
        assert_relative_eq!(u, 1.0);
    }

    #[test]
    fn degenerate_curve_is_a_miss() {
        let mut curve = straight_curve(0.25);
        curve.ctrl[2] = curve.ctrl[1];
        let origin = Point::new(-1.0, 5.0, 0.0);
        let dir = Vector::new(0.0, -1.0, 0.0);
        assert!(ray_curve_intersection(&curve, CurveBasis::Linear, &origin, &dir).is_none());

        let zero_radius = straight_curve(0.0);
        assert!(
            ray_curve_intersection(&zero_radius, CurveBasis::Linear, &origin, &dir).is_none()
        );
    }
}
