use crate::bounding_volume::{Aabb, SimdAabb};
use crate::math::SIMD_WIDTH;

/// A tagged reference to the content of one child slot of a quad-node.
///
/// The original packed encoding distinguished internal nodes, primitive
/// leaves and instance leaves by the sign and magnitude of a single integer
/// address; this enum makes the three interpretations (plus the absent
/// child) explicit so that correctness never depends on address arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    /// No child in this slot.
    Empty,
    /// Index of an internal node in the tree's node array.
    Internal(u32),
    /// A contiguous range of `count` primitives starting at index `first`
    /// of the scene's primitive table.
    Leaf {
        /// Index of the first primitive of the range.
        first: u32,
        /// Number of primitives in the range.
        count: u32,
    },
    /// The boundary of an instanced object, identified by its object id.
    /// Traversal continues at the object's local sub-tree root, with the
    /// ray transformed into the object's local space.
    Instance(u32),
}

impl Default for NodeRef {
    fn default() -> Self {
        NodeRef::Empty
    }
}

/// One node of the quad-tree: the bounding boxes of its (up to) four
/// children packed for the four-wide slab test, and the matching child
/// references.
///
/// Slots without a child hold [`NodeRef::Empty`] and the invalid AABB, so
/// the packed test can never report them hit.
#[derive(Copy, Clone, Debug)]
pub struct QbvhNode {
    /// The AABBs of the four children, stored SoA for the packed test.
    pub simd_aabb: SimdAabb,
    /// References to the four children.
    pub children: [NodeRef; SIMD_WIDTH],
}

impl QbvhNode {
    /// An internal node without any children.
    pub fn empty() -> Self {
        Self {
            simd_aabb: SimdAabb::new_invalid(),
            children: [NodeRef::Empty; SIMD_WIDTH],
        }
    }

    /// Builds a node from up to four `(aabb, child)` pairs; remaining slots
    /// stay empty.
    pub fn from_children(children: &[(Aabb, NodeRef)]) -> Self {
        let mut result = Self::empty();
        for (i, (aabb, child)) in children.iter().enumerate().take(SIMD_WIDTH) {
            result.simd_aabb.replace(i, *aabb);
            result.children[i] = *child;
        }
        result
    }
}

/// Errors detected while validating the structure of a [`Qbvh`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QbvhError {
    /// An internal node reference points past the end of the node array.
    #[error("internal node reference {node} is out of bounds ({len} nodes)")]
    NodeOutOfBounds {
        /// The offending node index.
        node: u32,
        /// The length of the node array.
        len: usize,
    },
    /// A leaf's primitive range exceeds the primitive table.
    #[error("leaf range {first}..{first}+{count} exceeds the primitive table ({table} primitives)")]
    LeafOutOfBounds {
        /// First primitive of the range.
        first: u32,
        /// Number of primitives in the range.
        count: u32,
        /// Size of the primitive table.
        table: u32,
    },
    /// An instance leaf references an object id not present in the object
    /// table.
    #[error("instance leaf references unknown object {object} ({table} objects)")]
    InstanceOutOfBounds {
        /// The offending object id.
        object: u32,
        /// Size of the object table.
        table: u32,
    },
    /// The children of the node array form a cycle, so the tree's depth is
    /// unbounded.
    #[error("the node array contains a cycle through node {node}")]
    CyclicTree {
        /// A node reached twice along a single descending path.
        node: u32,
    },
}

/// Aggregate structural facts about one sub-tree, computed by
/// [`Qbvh::subtree_metrics`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubtreeMetrics {
    /// Depth of the sub-tree, counting internal nodes only.
    pub depth: u32,
    /// Does the sub-tree contain an instance leaf?
    pub has_instance: bool,
}

/// An immutable quad-wide bounding-volume-hierarchy.
///
/// The tree is built externally and consumed as-is: a flat node array plus
/// a root reference. Sub-trees of instanced objects live in the same array;
/// the object table maps each instanced object to its local root.
///
/// The tree must remain unchanged while any traversal runs against it; the
/// traversal itself never mutates it, so arbitrarily many traversals may
/// run concurrently.
#[derive(Clone, Debug, Default)]
pub struct Qbvh {
    nodes: Vec<QbvhNode>,
    root: NodeRef,
}

impl Qbvh {
    /// Wraps an externally built node array and root reference.
    pub fn new(nodes: Vec<QbvhNode>, root: NodeRef) -> Self {
        Self { nodes, root }
    }

    /// The root reference of this tree.
    pub fn root(&self) -> NodeRef {
        self.root
    }

    /// The raw nodes of this tree.
    pub fn nodes(&self) -> &[QbvhNode] {
        &self.nodes
    }

    /// Does this tree contain no node at all?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.root == NodeRef::Empty
    }

    /// Checks that a single reference is within the bounds of this tree and
    /// of the given primitive/object tables.
    pub fn validate_ref(
        &self,
        node_ref: NodeRef,
        primitive_count: u32,
        object_count: u32,
    ) -> Result<(), QbvhError> {
        match node_ref {
            NodeRef::Empty => Ok(()),
            NodeRef::Internal(node) => {
                if (node as usize) < self.nodes.len() {
                    Ok(())
                } else {
                    Err(QbvhError::NodeOutOfBounds {
                        node,
                        len: self.nodes.len(),
                    })
                }
            }
            NodeRef::Leaf { first, count } => {
                if first.checked_add(count).is_some_and(|end| end <= primitive_count) {
                    Ok(())
                } else {
                    Err(QbvhError::LeafOutOfBounds {
                        first,
                        count,
                        table: primitive_count,
                    })
                }
            }
            NodeRef::Instance(object) => {
                if object < object_count {
                    Ok(())
                } else {
                    Err(QbvhError::InstanceOutOfBounds {
                        object,
                        table: object_count,
                    })
                }
            }
        }
    }

    /// Checks every reference stored in this tree against the tree and
    /// table bounds.
    pub fn validate(&self, primitive_count: u32, object_count: u32) -> Result<(), QbvhError> {
        self.validate_ref(self.root, primitive_count, object_count)?;

        for node in &self.nodes {
            for child in node.children {
                self.validate_ref(child, primitive_count, object_count)?;
            }
        }

        Ok(())
    }

    /// Walks the sub-tree rooted at `root` and reports its depth (counting
    /// internal nodes only) and whether it contains an instance leaf.
    ///
    /// The walk is iterative and visits every node at most once, so shared
    /// sub-trees cost nothing extra and a cycle in the node array is
    /// detected and reported instead of looping. References to
    /// out-of-bounds nodes contribute nothing (they are rejected by
    /// [`Qbvh::validate`]).
    ///
    /// Scene validation relies on both facts: the depth bounds the
    /// traversal stack, and an instanced object's own sub-tree must not
    /// cross another instance boundary (instancing is single-level).
    pub fn subtree_metrics(&self, root: NodeRef) -> Result<SubtreeMetrics, QbvhError> {
        #[derive(Copy, Clone, PartialEq)]
        enum Mark {
            Unvisited,
            Open,
            Done,
        }

        let root_id = match root {
            NodeRef::Internal(id) if (id as usize) < self.nodes.len() => id as usize,
            other => {
                return Ok(SubtreeMetrics {
                    depth: 0,
                    has_instance: matches!(other, NodeRef::Instance(_)),
                })
            }
        };

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut metrics = vec![
            SubtreeMetrics {
                depth: 0,
                has_instance: false
            };
            self.nodes.len()
        ];

        // Post-order over (node id, next child lane) entries; a node is
        // `Open` while any of its descendants is still being walked.
        let mut stack = vec![(root_id, 0usize)];
        marks[root_id] = Mark::Open;

        while let Some(&(id, lane)) = stack.last() {
            if lane < SIMD_WIDTH {
                let top = stack.len() - 1;
                stack[top].1 += 1;

                match self.nodes[id].children[lane] {
                    NodeRef::Internal(child) if (child as usize) < self.nodes.len() => {
                        let child = child as usize;
                        match marks[child] {
                            Mark::Open => {
                                return Err(QbvhError::CyclicTree {
                                    node: child as u32,
                                })
                            }
                            Mark::Unvisited => {
                                marks[child] = Mark::Open;
                                stack.push((child, 0));
                            }
                            Mark::Done => {
                                metrics[id].depth = metrics[id].depth.max(metrics[child].depth);
                                metrics[id].has_instance |= metrics[child].has_instance;
                            }
                        }
                    }
                    NodeRef::Instance(_) => metrics[id].has_instance = true,
                    _ => {}
                }
            } else {
                marks[id] = Mark::Done;
                metrics[id].depth += 1;
                let _ = stack.pop();

                if let Some(&(parent, _)) = stack.last() {
                    metrics[parent].depth = metrics[parent].depth.max(metrics[id].depth);
                    metrics[parent].has_instance |= metrics[id].has_instance;
                }
            }
        }

        Ok(metrics[root_id])
    }
}
