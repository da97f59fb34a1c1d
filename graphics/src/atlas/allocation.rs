/// How an [`Atlas`] picks the map a new fragment lands in.
///
/// [`Atlas`]: crate::atlas::Atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// Share maps with other fragments, creating one only when none fits.
    Shared,
    /// Create a map for this fragment alone. The map is at least as large as
    /// the given size, the fragment and the default map size.
    Dedicated {
        /// Lower bound on the map width.
        min_width: u32,
        /// Lower bound on the map height.
        min_height: u32,
    },
}

impl Allocation {
    /// A dedicated map sized by the fragment and the default map size only.
    pub const fn dedicated() -> Self {
        Allocation::Dedicated {
            min_width: 0,
            min_height: 0,
        }
    }
}

impl Default for Allocation {
    fn default() -> Self {
        Allocation::Shared
    }
}
