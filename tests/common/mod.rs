//! Shared helpers for the traversal integration tests: a naive median-split
//! tree builder and a brute-force intersection reference.

#![allow(dead_code)]

use quadray::bounding_volume::Aabb;
use quadray::math::{Point, Real, Vector};
use quadray::partitioning::{NodeRef, Qbvh, QbvhNode};
use quadray::query::{ray_curve_intersection, ray_triangle_intersection, Intersection, Ray};
use quadray::scene::{
    CurveBasis, Object, ObjectFlags, Primitive, PrimitiveKind, Scene, SceneGeometry, Triangle,
};

/// Appends a median-split tree over `items` to `nodes`, returning its root.
///
/// Each item is a ready-made child reference with its bounds, so instance
/// leaves and primitive leaves can be mixed freely. Trees for several
/// sub-scenes can share one node array by calling this repeatedly.
pub fn build_tree_into(nodes: &mut Vec<QbvhNode>, items: &[(Aabb, NodeRef)]) -> NodeRef {
    let mut ids: Vec<usize> = (0..items.len()).collect();
    build_rec(nodes, items, &mut ids)
}

fn build_rec(nodes: &mut Vec<QbvhNode>, items: &[(Aabb, NodeRef)], ids: &mut [usize]) -> NodeRef {
    if ids.is_empty() {
        return NodeRef::Empty;
    }

    if ids.len() <= 4 {
        let children: Vec<_> = ids.iter().map(|&i| items[i]).collect();
        nodes.push(QbvhNode::from_children(&children));
        return NodeRef::Internal(nodes.len() as u32 - 1);
    }

    let bounds = merged_bounds(items, ids);
    let axis = longest_axis(&bounds);
    ids.sort_by(|&a, &b| {
        items[a].0.center()[axis]
            .partial_cmp(&items[b].0.center()[axis])
            .unwrap()
    });

    let mid = ids.len() / 2;
    let (lo, hi) = ids.split_at_mut(mid);
    let lo_mid = lo.len() / 2;
    let hi_mid = hi.len() / 2;
    let (q0, q1) = lo.split_at_mut(lo_mid);
    let (q2, q3) = hi.split_at_mut(hi_mid);

    let mut children = Vec::new();
    for quarter in [q0, q1, q2, q3] {
        if !quarter.is_empty() {
            let aabb = merged_bounds(items, quarter);
            let child = build_rec(nodes, items, quarter);
            children.push((aabb, child));
        }
    }

    nodes.push(QbvhNode::from_children(&children));
    NodeRef::Internal(nodes.len() as u32 - 1)
}

fn merged_bounds(items: &[(Aabb, NodeRef)], ids: &[usize]) -> Aabb {
    let mut result = Aabb::new_invalid();
    for &id in ids {
        result = result.merged(&items[id].0);
    }
    result
}

fn longest_axis(aabb: &Aabb) -> usize {
    let extents = aabb.extents();
    let mut axis = 0;
    for i in 1..3 {
        if extents[i] > extents[axis] {
            axis = i;
        }
    }
    axis
}

/// Builds a scene whose tree has one single-primitive leaf per triangle, all
/// owned by one default object.
pub fn scene_from_triangles(triangles: Vec<Triangle>) -> Scene {
    let primitives: Vec<Primitive> = (0..triangles.len() as u32)
        .map(|i| Primitive {
            kind: PrimitiveKind::Triangle,
            object: 0,
            index: i,
        })
        .collect();

    let items: Vec<(Aabb, NodeRef)> = triangles
        .iter()
        .enumerate()
        .map(|(i, tri)| {
            (
                tri.aabb(),
                NodeRef::Leaf {
                    first: i as u32,
                    count: 1,
                },
            )
        })
        .collect();

    let mut nodes = Vec::new();
    let root = build_tree_into(&mut nodes, &items);

    let geometry = SceneGeometry {
        triangles,
        ..SceneGeometry::default()
    };

    Scene::new(
        Qbvh::new(nodes, root),
        primitives,
        vec![Object::new(ObjectFlags::empty())],
        geometry,
        CurveBasis::Linear,
    )
    .unwrap()
}

/// Linear-scan reference: tests every primitive of the table against the
/// world-space ray, with the same filtering and tie-break rules as the
/// traversal. Only valid for scenes without instance leaves.
pub fn brute_force(scene: &Scene, ray: &Ray, required: ObjectFlags) -> Option<Intersection> {
    let mut best: Option<Intersection> = None;
    let mut best_t = ray.t_max;

    for (prim_id, prim) in scene.primitives().iter().enumerate() {
        let object = &scene.objects()[prim.object as usize];
        if !object.flags.contains(required) || (object.visibility & ray.visibility) == 0 {
            continue;
        }

        let geometry = scene.geometry();
        let index = prim.index as usize;
        let hit = match prim.kind {
            PrimitiveKind::Triangle => geometry.triangles.get(index).and_then(|tri| {
                ray_triangle_intersection(&tri.a, &tri.b, &tri.c, &ray.origin, &ray.dir)
            }),
            PrimitiveKind::MotionTriangle => {
                geometry.motion_triangles.get(index).and_then(|motion| {
                    let tri = motion.interpolate(ray.time);
                    ray_triangle_intersection(&tri.a, &tri.b, &tri.c, &ray.origin, &ray.dir)
                })
            }
            PrimitiveKind::Curve => geometry.curves.get(index).and_then(|curve| {
                ray_curve_intersection(curve, scene.curve_basis(), &ray.origin, &ray.dir)
            }),
            PrimitiveKind::MotionCurve => geometry.motion_curves.get(index).and_then(|motion| {
                let curve = motion.interpolate(ray.time);
                ray_curve_intersection(&curve, scene.curve_basis(), &ray.origin, &ray.dir)
            }),
        };

        if let Some((t, u, v)) = hit {
            if t < best_t {
                best_t = t;
                best = Some(Intersection {
                    t,
                    u,
                    v,
                    prim: prim_id as u32,
                    object: prim.object,
                    kind: prim.kind,
                });
            }
        }
    }

    best
}

/// A small random triangle: a random center in `[0, extent]^3` with random
/// unit-scale edges.
pub fn random_triangle(rng: &mut oorandom::Rand32, extent: Real) -> Triangle {
    let center = random_point(rng, extent);
    Triangle::new(
        center + random_offset(rng),
        center + random_offset(rng),
        center + random_offset(rng),
    )
}

pub fn random_point(rng: &mut oorandom::Rand32, extent: Real) -> Point<Real> {
    Point::new(
        rng.rand_float() * extent,
        rng.rand_float() * extent,
        rng.rand_float() * extent,
    )
}

pub fn random_offset(rng: &mut oorandom::Rand32) -> Vector<Real> {
    Vector::new(
        rng.rand_float() * 2.0 - 1.0,
        rng.rand_float() * 2.0 - 1.0,
        rng.rand_float() * 2.0 - 1.0,
    )
}
