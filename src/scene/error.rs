use crate::partitioning::QbvhError;

/// Errors detected while validating the scene tables at assembly time.
///
/// Traversal itself is infallible; every condition listed here is checked
/// once, when the scene is assembled.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// A reference stored in the tree is out of bounds.
    #[error(transparent)]
    Tree(#[from] QbvhError),
    /// A primitive's owning object id is not in the object table.
    #[error("primitive {prim} references unknown object {object} ({table} objects)")]
    UnknownPrimitiveObject {
        /// Index of the offending primitive.
        prim: u32,
        /// The unknown object id.
        object: u32,
        /// Size of the object table.
        table: u32,
    },
    /// An instance leaf references an object without a local sub-tree root.
    #[error("object {object} is instanced but has no local sub-tree root")]
    MissingInstanceRoot {
        /// The offending object id.
        object: u32,
    },
    /// An instanced object's sub-tree crosses another instance boundary.
    /// Instancing is single-level.
    #[error("the sub-tree of instanced object {object} contains another instance leaf")]
    NestedInstance {
        /// The offending object id.
        object: u32,
    },
    /// The worst-case traversal stack usage implied by the tree depth
    /// exceeds the fixed stack capacity.
    #[error("worst-case traversal stack usage {required} exceeds the capacity {capacity}")]
    StackTooSmall {
        /// Worst-case number of stack entries.
        required: usize,
        /// The fixed stack capacity.
        capacity: usize,
    },
}
