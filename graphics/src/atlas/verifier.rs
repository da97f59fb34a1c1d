use std::collections::HashMap;

use crate::FragmentId;

/// Catches two labels hashing to the same [`FragmentId`].
///
/// Install one with [`Atlas::set_verifier`] in test and debug builds; it
/// keeps every label it has seen, so it is not meant for release builds.
///
/// [`Atlas::set_verifier`]: crate::atlas::Atlas::set_verifier
#[derive(Debug, Default)]
pub struct Verifier {
    labels: HashMap<FragmentId, String>,
}

impl Verifier {
    /// Creates a verifier that has seen no labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `label` under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was previously recorded for a different label.
    pub fn check(&mut self, id: FragmentId, label: &str) {
        match self.labels.get(&id) {
            Some(known) => assert!(
                known == label,
                "{:?} collides: {:?} and {:?} hash to the same id",
                id,
                known,
                label
            ),
            None => {
                let _ = self.labels.insert(id, label.to_owned());
            }
        }
    }

    /// The amount of distinct labels seen.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no label was seen.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_label_twice_is_fine() {
        let mut verifier = Verifier::new();
        let id = FragmentId::from_label("icons/close.png");

        verifier.check(id, "icons/close.png");
        verifier.check(id, "icons/close.png");

        assert_eq!(verifier.len(), 1);
    }

    #[test]
    #[should_panic(expected = "collides")]
    fn different_labels_on_one_id_panic() {
        let mut verifier = Verifier::new();
        let id = FragmentId::new(7);

        verifier.check(id, "glyph_A");
        verifier.check(id, "glyph_B");
    }
}
