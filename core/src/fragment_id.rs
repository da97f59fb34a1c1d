use std::fmt;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// The content key of a bitmap fragment.
///
/// Usually the 32-bit FNV-1a hash of a file name or of a tag chosen by the
/// caller. Two different labels hashing to the same id is a bug in the
/// caller, not something the atlas recovers from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FragmentId(u32);

impl FragmentId {
    /// Creates a [`FragmentId`] from a raw hash value.
    pub const fn new(raw: u32) -> Self {
        FragmentId(raw)
    }

    /// Hashes `label` into a [`FragmentId`].
    ///
    /// The empty label maps to the null id `0`.
    pub fn from_label(label: &str) -> Self {
        if label.is_empty() {
            return FragmentId(0);
        }

        let hash = label.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        });

        FragmentId(hash)
    }

    /// Returns the raw hash value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<&str> for FragmentId {
    fn from(label: &str) -> Self {
        FragmentId::from_label(label)
    }
}

impl From<u32> for FragmentId {
    fn from(raw: u32) -> Self {
        FragmentId(raw)
    }
}

impl fmt::Debug for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FragmentId({:#010x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::FragmentId;

    #[test]
    fn matches_reference_fnv1a_values() {
        assert_eq!(FragmentId::from_label("a").raw(), 0xe40c_292c);
        assert_eq!(FragmentId::from_label("foobar").raw(), 0xbf9c_f968);
    }

    #[test]
    fn empty_label_is_null() {
        assert_eq!(FragmentId::from_label(""), FragmentId::new(0));
    }

    #[test]
    fn label_conversion_is_stable() {
        let id: FragmentId = "skin/button.png".into();

        assert_eq!(id, FragmentId::from_label("skin/button.png"));
        assert_ne!(id, FragmentId::from_label("skin/button_pressed.png"));
    }
}
