//! The quad-wide bounding-volume-hierarchy consumed by the traversal kernel.

pub use self::qbvh::{NodeRef, Qbvh, QbvhError, QbvhNode, SubtreeMetrics};
pub use self::sort::{sort2, sort3, sort4};

mod qbvh;
mod sort;
