//! Dense indices into the road network's per-node and per-edge arrays.
//!
//! The inner integer is `pub`; `u32` keeps the CSR arrays compact while
//! covering any city-scale extract.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty), $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Marks an unset slot, e.g. a node the search never reached.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Id for position `i` of a network array.  Networks are built
            /// with fewer than `u32::MAX` nodes and edges.
            #[inline(always)]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < <$inner>::MAX as usize);
                $name(i as $inner)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node (an intersection or way vertex).
    pub struct NodeId(u32), "node";
}

typed_id! {
    /// Index of a directed road segment in the network's edge arrays.
    pub struct EdgeId(u32), "edge";
}
