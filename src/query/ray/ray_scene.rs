//! The iterative traversal driver answering nearest-hit and any-hit queries.

use arrayvec::ArrayVec;
use simba::simd::{SimdBool, SimdValue};

use crate::math::{Point, Real, SimdReal, Vector, SIMD_WIDTH};
use crate::partitioning::{sort2, sort3, sort4, NodeRef};
use crate::query::ray::SimdInvRay;
use crate::query::{ray_curve_intersection, ray_triangle_intersection, Intersection, Ray};
use crate::scene::{ObjectFlags, PrimitiveKind, Scene};

/// Capacity of the fixed traversal stack.
///
/// Scene validation guarantees the worst-case usage implied by the tree
/// depth fits; on a malformed scene that bypassed validation, overflow
/// panics instead of corrupting memory.
pub(crate) const TRAVERSAL_STACK_SIZE: usize = 192;

/// A pending traversal stack entry.
enum StackEntry {
    /// A node reference still to be visited.
    Node(NodeRef),
    /// Marks the boundary of the active instance: popping it restores the
    /// saved world-space ray before traversal continues underneath.
    ExitInstance,
}

/// The ray expressed in the current traversal space, with the packed-test
/// precomputations for that space.
#[derive(Copy, Clone)]
struct RaySpace {
    origin: Point<Real>,
    dir: Vector<Real>,
    inv: SimdInvRay,
}

impl RaySpace {
    fn new(origin: Point<Real>, dir: Vector<Real>) -> Self {
        Self {
            origin,
            dir,
            inv: SimdInvRay::new(origin, dir),
        }
    }
}

/// Runs one traversal of `ray` against `scene`.
///
/// Only primitives owned by objects carrying all of the `required` flags
/// (and sharing a visibility bit with the ray) are tested; instances of
/// filtered-out objects are skipped before any space transformation. In
/// `any_hit` mode the first qualifying intersection is returned immediately;
/// otherwise the closest one within `[0, ray.t_max]` is.
pub(crate) fn trace(
    scene: &Scene,
    ray: &Ray,
    any_hit: bool,
    required: ObjectFlags,
) -> Option<Intersection> {
    let mut stack: ArrayVec<StackEntry, TRAVERSAL_STACK_SIZE> = ArrayVec::new();
    let mut space = RaySpace::new(ray.origin, ray.dir);
    let mut saved_world: Option<RaySpace> = None;
    let mut instance: Option<u32> = None;

    let mut best: Option<Intersection> = None;
    let mut best_t = ray.t_max;

    let mut current = scene.qbvh().root();

    'traversal: loop {
        // `Some(child)` to descend without touching the stack, `None` to pop.
        let descend = match current {
            NodeRef::Empty => None,
            NodeRef::Internal(id) => {
                let node = &scene.qbvh().nodes()[id as usize];
                let (hits, t_near) = node
                    .simd_aabb
                    .cast_inv_ray(&space.inv, SimdReal::splat(best_t));
                let bitmask = hits.bitmask();

                let mut candidates: ArrayVec<(Real, u8, NodeRef), SIMD_WIDTH> = ArrayVec::new();
                for lane in 0..SIMD_WIDTH {
                    if (bitmask & (1 << lane)) != 0 && node.children[lane] != NodeRef::Empty {
                        candidates.push((t_near.extract(lane), lane as u8, node.children[lane]));
                    }
                }

                match candidates.len() {
                    0 => None,
                    1 => Some(candidates[0].2),
                    len => {
                        match len {
                            2 => sort2(&mut candidates),
                            3 => sort3(&mut candidates),
                            _ => sort4(&mut candidates),
                        }

                        // Push the farther children so pops come near-to-far.
                        for entry in candidates[1..].iter().rev() {
                            stack.push(StackEntry::Node(entry.2));
                        }
                        Some(candidates[0].2)
                    }
                }
            }
            NodeRef::Leaf { first, count } => {
                for prim_id in first..first + count {
                    let prim = scene.primitives()[prim_id as usize];
                    let object_id = instance.unwrap_or(prim.object);
                    let object = &scene.objects()[object_id as usize];

                    if !object.flags.contains(required)
                        || (object.visibility & ray.visibility) == 0
                    {
                        continue;
                    }

                    let geometry = scene.geometry();
                    let index = prim.index as usize;
                    let hit = match prim.kind {
                        PrimitiveKind::Triangle => {
                            geometry.triangles.get(index).and_then(|tri| {
                                ray_triangle_intersection(
                                    &tri.a,
                                    &tri.b,
                                    &tri.c,
                                    &space.origin,
                                    &space.dir,
                                )
                            })
                        }
                        PrimitiveKind::MotionTriangle => {
                            geometry.motion_triangles.get(index).and_then(|motion| {
                                let tri = motion.interpolate(ray.time);
                                ray_triangle_intersection(
                                    &tri.a,
                                    &tri.b,
                                    &tri.c,
                                    &space.origin,
                                    &space.dir,
                                )
                            })
                        }
                        PrimitiveKind::Curve => geometry.curves.get(index).and_then(|curve| {
                            ray_curve_intersection(
                                curve,
                                scene.curve_basis(),
                                &space.origin,
                                &space.dir,
                            )
                        }),
                        PrimitiveKind::MotionCurve => {
                            geometry.motion_curves.get(index).and_then(|motion| {
                                let curve = motion.interpolate(ray.time);
                                ray_curve_intersection(
                                    &curve,
                                    scene.curve_basis(),
                                    &space.origin,
                                    &space.dir,
                                )
                            })
                        }
                    };

                    if let Some((t, u, v)) = hit {
                        // Narrow the valid interval monotonically; ties keep
                        // the earlier primitive.
                        if t < best_t {
                            best_t = t;
                            best = Some(Intersection {
                                t,
                                u,
                                v,
                                prim: prim_id,
                                object: object_id,
                                kind: prim.kind,
                            });

                            if any_hit {
                                return best;
                            }
                        }
                    }
                }

                None
            }
            NodeRef::Instance(object_id) => {
                let object = &scene.objects()[object_id as usize];

                if !object.flags.contains(required) || (object.visibility & ray.visibility) == 0 {
                    // The object cannot contribute: skip it without paying
                    // for the space transformation.
                    None
                } else if let Some(local_root) = object.local_root {
                    stack.push(StackEntry::ExitInstance);
                    saved_world = Some(space);

                    let world_to_local = object.local_to_world_at(ray.time).inverse();
                    space = RaySpace::new(world_to_local * space.origin, world_to_local * space.dir);
                    instance = Some(object_id);

                    Some(local_root)
                } else {
                    None
                }
            }
        };

        current = match descend {
            Some(child) => child,
            None => loop {
                match stack.pop() {
                    None => break 'traversal,
                    Some(StackEntry::ExitInstance) => {
                        if let Some(world) = saved_world.take() {
                            space = world;
                        }
                        instance = None;
                    }
                    Some(StackEntry::Node(node)) => break node,
                }
            },
        };
    }

    best
}
