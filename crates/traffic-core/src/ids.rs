//! Strongly typed arena indices for graph nodes and edges.
//!
//! Nodes are addressed by name at the API boundary, but the graph stores them
//! in a `Vec` and every internal structure (queue, spanning tree, agent
//! position) refers to them by index.  The inner integer is `pub` so callers
//! can index directly, but `.index()` reads better.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a node in the graph's node arena.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed edge in the graph's edge arena.
    pub struct EdgeId(u32);
}
