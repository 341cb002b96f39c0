use crate::math::{Isometry, Real};
use crate::partitioning::NodeRef;

bitflags::bitflags! {
    /// Flags qualifying an object for filtered queries.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct ObjectFlags: u32 {
        /// The object participates in volume rendering. Volume queries only
        /// test primitives (and enter instances) owned by objects carrying
        /// this flag.
        const HAS_VOLUME = 1 << 0;
        /// The object is a holdout matte.
        const HOLDOUT = 1 << 1;
    }
}

/// An object-to-world transform sampled at two times, interpolated at the
/// ray time.
///
/// The translational part is interpolated linearly and the rotational part
/// spherically, so intermediate placements stay rigid.
#[derive(Copy, Clone, Debug)]
pub struct InterpolatedTransform {
    /// The transform at time `0`.
    pub start: Isometry<Real>,
    /// The transform at time `1`.
    pub end: Isometry<Real>,
}

impl InterpolatedTransform {
    /// The transform at the given time.
    pub fn position_at_time(&self, time: Real) -> Isometry<Real> {
        self.start.lerp_slerp(&self.end, time)
    }
}

/// One entry of the scene's object table.
#[derive(Clone, Debug)]
pub struct Object {
    /// Flags tested by filtered queries.
    pub flags: ObjectFlags,
    /// Visibility mask. A ray tests this object's primitives only if the
    /// masks share at least one bit.
    pub visibility: u32,
    /// The object-to-world placement of this object.
    pub local_to_world: Isometry<Real>,
    /// Time-sampled placement for motion blur. When present it supersedes
    /// `local_to_world` at every ray time.
    pub motion: Option<InterpolatedTransform>,
    /// Root of this object's local sub-tree. Required for objects
    /// referenced by an instance leaf; `None` for objects whose geometry
    /// lives directly in the top-level tree.
    pub local_root: Option<NodeRef>,
}

impl Object {
    /// An object with world-space geometry, no motion, and all visibility
    /// bits set.
    pub fn new(flags: ObjectFlags) -> Self {
        Self {
            flags,
            visibility: u32::MAX,
            local_to_world: Isometry::identity(),
            motion: None,
            local_root: None,
        }
    }

    /// An instanced object placed at the given transform, with its local
    /// sub-tree rooted at `local_root`.
    pub fn instanced(
        flags: ObjectFlags,
        local_to_world: Isometry<Real>,
        local_root: NodeRef,
    ) -> Self {
        Self {
            flags,
            visibility: u32::MAX,
            local_to_world,
            motion: None,
            local_root: Some(local_root),
        }
    }

    /// The object-to-world transform at the given time.
    pub fn local_to_world_at(&self, time: Real) -> Isometry<Real> {
        match &self.motion {
            Some(motion) => motion.position_at_time(time),
            None => self.local_to_world,
        }
    }
}
