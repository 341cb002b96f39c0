use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// The kind of a primitive, selecting its geometry array and intersection
/// routine.
///
/// Leaf processing dispatches on this tag; a primitive whose geometry index
/// is out of bounds for its kind's array behaves as a miss rather than an
/// error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// A static triangle.
    Triangle,
    /// A triangle with two time steps, interpolated at the ray time.
    MotionTriangle,
    /// A static hair curve span.
    Curve,
    /// A curve span with two time steps, interpolated at the ray time.
    MotionCurve,
}

/// One entry of the scene's primitive table.
#[derive(Copy, Clone, Debug)]
pub struct Primitive {
    /// The kind of this primitive.
    pub kind: PrimitiveKind,
    /// The object owning this primitive. For primitives reached through an
    /// instance leaf, the instance's object id takes precedence.
    pub object: u32,
    /// Index into the geometry array selected by `kind`.
    pub index: u32,
}

/// A triangle, defined by its three vertices.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    /// The first vertex.
    pub a: Point<Real>,
    /// The second vertex.
    pub b: Point<Real>,
    /// The third vertex.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from its vertices.
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Self {
        Self { a, b, c }
    }

    /// The axis-aligned bounding box of this triangle.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b, self.c])
    }
}

/// A triangle sampled at two times, with vertices interpolated linearly at
/// the ray time.
#[derive(Copy, Clone, Debug)]
pub struct MotionTriangle {
    /// The triangle at times `0` and `1`.
    pub steps: [Triangle; 2],
}

impl MotionTriangle {
    /// The triangle at the given time, with each vertex interpolated
    /// linearly between the two steps.
    pub fn interpolate(&self, time: Real) -> Triangle {
        let [t0, t1] = &self.steps;
        Triangle {
            a: t0.a + (t1.a - t0.a) * time,
            b: t0.b + (t1.b - t0.b) * time,
            c: t0.c + (t1.c - t0.c) * time,
        }
    }

    /// The bounding box enclosing this triangle at every time in `[0, 1]`.
    ///
    /// Linear vertex motion stays within the hull of the two steps.
    pub fn aabb(&self) -> Aabb {
        self.steps[0].aabb().merged(&self.steps[1].aabb())
    }
}

/// Selects how a curve's control cage is interpolated during intersection.
///
/// This is a render-wide setting, not a per-primitive one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CurveBasis {
    /// The span between the two middle control points is a straight
    /// segment.
    Linear,
    /// The span is the Catmull-Rom interpolation of the full control cage.
    CatmullRom,
}

/// One span of a hair curve: a cage of four control points and the thickness
/// radii at both ends of the active span.
///
/// The active span runs from `ctrl[1]` to `ctrl[2]`; the outer points only
/// shape the Catmull-Rom interpolation.
#[derive(Copy, Clone, Debug)]
pub struct Curve {
    /// The control cage.
    pub ctrl: [Point<Real>; 4],
    /// The radii at the start and end of the active span.
    pub radius: [Real; 2],
}

impl Curve {
    /// Evaluates the Catmull-Rom interpolation of the control cage at
    /// `s ∈ [0, 1]` along the active span.
    pub fn eval_catmull_rom(&self, s: Real) -> Point<Real> {
        let [p0, p1, p2, p3] = self.ctrl;
        let c0 = p1.coords;
        let c1 = (p2.coords - p0.coords) * 0.5;
        let c2 = p0.coords - p1.coords * 2.5 + p2.coords * 2.0 - p3.coords * 0.5;
        let c3 = (p1.coords - p2.coords) * 1.5 + (p3.coords - p0.coords) * 0.5;
        Point::from(c0 + (c1 + (c2 + c3 * s) * s) * s)
    }

    /// The curve radius at `s ∈ [0, 1]` along the active span, interpolated
    /// linearly between the two end radii.
    pub fn radius_at(&self, s: Real) -> Real {
        self.radius[0] * (1.0 - s) + self.radius[1] * s
    }

    /// A bounding box of this span: the control cage hull, loosened by the
    /// larger end radius.
    ///
    /// The Catmull-Rom interpolation of a cage stays within the cage hull
    /// only up to its thickness, so the box is conservative for both bases.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.ctrl).loosened(self.radius[0].max(self.radius[1]))
    }
}

/// A curve span sampled at two times, with the control cage and radii
/// interpolated linearly at the ray time.
#[derive(Copy, Clone, Debug)]
pub struct MotionCurve {
    /// The curve at times `0` and `1`.
    pub steps: [Curve; 2],
}

impl MotionCurve {
    /// The curve at the given time.
    pub fn interpolate(&self, time: Real) -> Curve {
        let [c0, c1] = &self.steps;
        let mut ctrl = c0.ctrl;
        for (pt, target) in ctrl.iter_mut().zip(c1.ctrl.iter()) {
            *pt += (*target - *pt) * time;
        }
        Curve {
            ctrl,
            radius: [
                c0.radius[0] * (1.0 - time) + c1.radius[0] * time,
                c0.radius[1] * (1.0 - time) + c1.radius[1] * time,
            ],
        }
    }

    /// The bounding box enclosing this curve at every time in `[0, 1]`.
    pub fn aabb(&self) -> Aabb {
        self.steps[0].aabb().merged(&self.steps[1].aabb())
    }
}

#[cfg(test)]
mod test {
    use super::{Curve, MotionTriangle, Triangle};
    use crate::math::Point;

    #[test]
    fn catmull_rom_interpolates_span_endpoints() {
        let curve = Curve {
            ctrl: [
                Point::new(0.0, 3.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(2.0, -1.0, 0.5),
                Point::new(4.0, 0.0, 0.0),
            ],
            radius: [0.1, 0.3],
        };

        assert_relative_eq!(curve.eval_catmull_rom(0.0), curve.ctrl[1]);
        assert_relative_eq!(curve.eval_catmull_rom(1.0), curve.ctrl[2]);
        assert_relative_eq!(curve.radius_at(0.5), 0.2);
    }

    #[test]
    fn motion_triangle_interpolation() {
        let motion = MotionTriangle {
            steps: [
                Triangle::new(
                    Point::new(0.0, 0.0, 0.0),
                    Point::new(1.0, 0.0, 0.0),
                    Point::new(0.0, 1.0, 0.0),
                ),
                Triangle::new(
                    Point::new(0.0, 0.0, 2.0),
                    Point::new(1.0, 0.0, 2.0),
                    Point::new(0.0, 1.0, 2.0),
                ),
            ],
        };

        let mid = motion.interpolate(0.5);
        assert_relative_eq!(mid.a, Point::new(0.0, 0.0, 1.0));
        assert_relative_eq!(mid.b, Point::new(1.0, 0.0, 1.0));
    }
}
