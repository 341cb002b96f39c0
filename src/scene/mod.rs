//! The immutable scene tables consumed by traversal queries.

pub use self::error::SceneError;
pub use self::object::{InterpolatedTransform, Object, ObjectFlags};
pub use self::primitive::{
    Curve, CurveBasis, MotionCurve, MotionTriangle, Primitive, PrimitiveKind, Triangle,
};
pub use self::scene::{Scene, SceneGeometry};

mod error;
mod object;
mod primitive;
mod scene;
