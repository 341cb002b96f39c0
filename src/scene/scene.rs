use log::debug;

use crate::partitioning::{NodeRef, Qbvh};
use crate::query::ray::ray_scene::{self, TRAVERSAL_STACK_SIZE};
use crate::query::{Intersection, Ray};
use crate::scene::{
    Curve, CurveBasis, MotionCurve, MotionTriangle, Object, ObjectFlags, Primitive, SceneError,
    Triangle,
};

/// The per-kind geometry arrays referenced by the primitive table.
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    /// Static triangles.
    pub triangles: Vec<Triangle>,
    /// Time-sampled triangles.
    pub motion_triangles: Vec<MotionTriangle>,
    /// Static curve spans.
    pub curves: Vec<Curve>,
    /// Time-sampled curve spans.
    pub motion_curves: Vec<MotionCurve>,
}

/// An immutable scene ready for traversal: the quad-tree, the primitive and
/// object tables, the geometry arrays and the render-wide curve basis.
///
/// All tables are produced by an external builder and validated once at
/// assembly. Queries never mutate the scene, so arbitrarily many of them may
/// run concurrently against a shared reference.
#[derive(Clone, Debug)]
pub struct Scene {
    qbvh: Qbvh,
    primitives: Vec<Primitive>,
    objects: Vec<Object>,
    geometry: SceneGeometry,
    curve_basis: CurveBasis,
}

impl Scene {
    /// Assembles and validates a scene.
    ///
    /// Every reference stored in the tree and in the tables is checked:
    /// node, leaf and instance references must be in bounds, instanced
    /// objects must carry a local sub-tree root, instancing must be
    /// single-level, and the worst-case traversal depth implied by the tree
    /// must fit the fixed traversal stack.
    ///
    /// Geometry indices of the primitive table are deliberately not
    /// checked: an out-of-range index behaves as a miss at query time, so
    /// forward-compatible primitive kinds degrade gracefully.
    pub fn new(
        qbvh: Qbvh,
        primitives: Vec<Primitive>,
        objects: Vec<Object>,
        geometry: SceneGeometry,
        curve_basis: CurveBasis,
    ) -> Result<Self, SceneError> {
        let primitive_count = primitives.len() as u32;
        let object_count = objects.len() as u32;

        qbvh.validate(primitive_count, object_count)?;

        for (id, prim) in primitives.iter().enumerate() {
            if prim.object >= object_count {
                return Err(SceneError::UnknownPrimitiveObject {
                    prim: id as u32,
                    object: prim.object,
                    table: object_count,
                });
            }
        }

        let mut inner_depth = 0;
        for (id, object) in objects.iter().enumerate() {
            if let Some(root) = object.local_root {
                qbvh.validate_ref(root, primitive_count, object_count)?;
                let metrics = qbvh.subtree_metrics(root)?;
                if metrics.has_instance {
                    return Err(SceneError::NestedInstance { object: id as u32 });
                }
                inner_depth = inner_depth.max(metrics.depth);
            }
        }

        let check_instance = |node_ref: NodeRef| match node_ref {
            NodeRef::Instance(object) if objects[object as usize].local_root.is_none() => {
                Err(SceneError::MissingInstanceRoot { object })
            }
            _ => Ok(()),
        };
        check_instance(qbvh.root())?;
        for node in qbvh.nodes() {
            for child in node.children {
                check_instance(child)?;
            }
        }

        // Each internal-node descent pushes at most three children, and an
        // instance entry pushes one sentinel plus a fresh descent of the
        // instanced sub-tree.
        let outer_depth = qbvh.subtree_metrics(qbvh.root())?.depth;
        let required = 3 * (outer_depth + inner_depth) as usize + 2;
        if required > TRAVERSAL_STACK_SIZE {
            return Err(SceneError::StackTooSmall {
                required,
                capacity: TRAVERSAL_STACK_SIZE,
            });
        }

        debug!(
            "scene assembled: {} nodes, {} primitives, {} objects, depth {}+{}",
            qbvh.nodes().len(),
            primitive_count,
            object_count,
            outer_depth,
            inner_depth
        );

        Ok(Self {
            qbvh,
            primitives,
            objects,
            geometry,
            curve_basis,
        })
    }

    /// The quad-tree of this scene.
    pub fn qbvh(&self) -> &Qbvh {
        &self.qbvh
    }

    /// The primitive table.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The object table.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// The geometry arrays.
    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    /// The render-wide curve interpolation basis.
    pub fn curve_basis(&self) -> CurveBasis {
        self.curve_basis
    }

    /// Finds the closest intersection of `ray` with this scene, if any.
    pub fn cast_ray(&self, ray: &Ray) -> Option<Intersection> {
        ray_scene::trace(self, ray, false, ObjectFlags::empty())
    }

    /// Finds the closest intersection of `ray` among primitives owned by
    /// objects carrying all of the `required` flags.
    ///
    /// Instances of objects failing the filter are skipped before the ray
    /// is transformed into their local space.
    pub fn cast_ray_filtered(&self, ray: &Ray, required: ObjectFlags) -> Option<Intersection> {
        ray_scene::trace(self, ray, false, required)
    }

    /// Finds the closest intersection of `ray` among volumetric objects
    /// only.
    pub fn cast_volume_ray(&self, ray: &Ray) -> Option<Intersection> {
        ray_scene::trace(self, ray, false, ObjectFlags::HAS_VOLUME)
    }

    /// Does `ray` intersect anything in this scene?
    ///
    /// Stops at the first qualifying intersection, which is not necessarily
    /// the closest one.
    pub fn intersects_any(&self, ray: &Ray) -> bool {
        ray_scene::trace(self, ray, true, ObjectFlags::empty()).is_some()
    }

    /// Does `ray` intersect any primitive owned by an object carrying all of
    /// the `required` flags?
    pub fn intersects_any_filtered(&self, ray: &Ray, required: ObjectFlags) -> bool {
        ray_scene::trace(self, ray, true, required).is_some()
    }
}
