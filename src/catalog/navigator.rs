//! Bounds-checked position within a catalog.

use super::CatalogError;

/// Current index into a catalog of `count` items.
///
/// With `count == 0` there is no current item and every move is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    index: usize,
    count: usize,
}

impl Navigator {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    /// Current index, or `None` for an empty catalog.
    pub fn index(&self) -> Option<usize> {
        (self.count > 0).then_some(self.index)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.count == 0 || self.index + 1 == self.count
    }

    /// Moves to the next item. Returns `true` when the caller should reload.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Moves to the previous item. Returns `true` when the caller should reload.
    pub fn retreat(&mut self) -> bool {
        if self.count == 0 || self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jumps directly to `index`.
    pub fn go_to(&mut self, index: usize) -> Result<(), CatalogError> {
        if index >= self.count {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retreat_at_first_and_advance_at_last_are_noops() {
        let mut nav = Navigator::new(5);
        assert!(!nav.retreat());
        assert_eq!(nav.index(), Some(0));

        for _ in 0..4 {
            assert!(nav.advance());
        }
        assert_eq!(nav.index(), Some(4));
        assert!(!nav.advance());
        assert_eq!(nav.index(), Some(4));

        assert!(nav.retreat());
        assert_eq!(nav.index(), Some(3));
    }

    #[test]
    fn empty_catalog_has_no_index() {
        let mut nav = Navigator::new(0);
        assert_eq!(nav.index(), None);
        assert!(!nav.advance());
        assert!(!nav.retreat());
        assert_eq!(nav.index(), None);
    }

    #[test]
    fn single_item_cannot_move() {
        let mut nav = Navigator::new(1);
        assert!(nav.is_first() && nav.is_last());
        assert!(!nav.advance());
        assert!(!nav.retreat());
    }

    #[test]
    fn go_to_is_bounds_checked() {
        let mut nav = Navigator::new(3);
        nav.go_to(2).unwrap();
        assert_eq!(nav.index(), Some(2));
        assert!(matches!(
            nav.go_to(3),
            Err(CatalogError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(nav.index(), Some(2));
    }
}
