//! Ephemeral numeric positions for the notes of one listing.

/// An ordered set of note titles produced by `list` or a search.
///
/// Positions are 1-based and stay fixed for the lifetime of the listing:
/// deleting a note leaves a hole instead of shifting later entries, so a
/// position never silently starts pointing at a different note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    slots: Vec<Option<String>>,
}

impl Listing {
    /// Creates a listing from titles in display order.
    pub fn new(titles: impl IntoIterator<Item = String>) -> Self {
        Self {
            slots: titles.into_iter().map(Some).collect(),
        }
    }

    /// Returns the title at a 1-based position.
    ///
    /// Returns `None` for 0, for positions past the end, and for positions
    /// whose note was removed from this listing.
    pub fn get(&self, position: usize) -> Option<&str> {
        let index = position.checked_sub(1)?;
        self.slots.get(index)?.as_deref()
    }

    /// Returns the 1-based position of `title`.
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_deref() == Some(title))
            .map(|index| index + 1)
    }

    /// Marks the slot holding `title` as removed. Returns true if it was present.
    pub fn invalidate(&mut self, title: &str) -> bool {
        match self.position_of(title) {
            Some(position) => {
                self.slots[position - 1] = None;
                true
            }
            None => false,
        }
    }

    /// Points the slot holding `old` at `new`, keeping its position.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        match self.position_of(old) {
            Some(position) => {
                self.slots[position - 1] = Some(new.to_string());
                true
            }
            None => false,
        }
    }

    /// Iterates live entries as `(position, title)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|title| (index + 1, title)))
    }

    /// Returns the number of slots, including removed ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(titles: &[&str]) -> Listing {
        Listing::new(titles.iter().map(|t| t.to_string()))
    }

    #[test]
    fn positions_are_one_based() {
        let l = listing(&["a", "b", "c"]);
        assert_eq!(l.get(0), None);
        assert_eq!(l.get(1), Some("a"));
        assert_eq!(l.get(3), Some("c"));
        assert_eq!(l.get(4), None);
        assert_eq!(l.position_of("b"), Some(2));
        assert_eq!(l.position_of("z"), None);
    }

    #[test]
    fn invalidate_leaves_hole() {
        let mut l = listing(&["a", "b", "c"]);

        assert!(l.invalidate("b"));
        assert!(!l.invalidate("b"));

        assert_eq!(l.get(2), None);
        assert_eq!(l.get(3), Some("c"));
        assert_eq!(l.len(), 3);
        assert_eq!(l.iter().collect::<Vec<_>>(), vec![(1, "a"), (3, "c")]);
    }

    #[test]
    fn rename_keeps_position() {
        let mut l = listing(&["a", "b"]);
        assert!(l.rename("a", "z"));
        assert_eq!(l.get(1), Some("z"));
        assert_eq!(l.position_of("a"), None);
    }

    #[test]
    fn empty_listing() {
        let l = Listing::default();
        assert!(l.is_empty());
        assert_eq!(l.get(1), None);
        assert_eq!(l.iter().count(), 0);
    }
}
