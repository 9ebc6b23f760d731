//! Scroll offset state.

use crate::types::{ScrollOffset, ScrollUpdate};

/// Holds the translation applied to scrolled content.
///
/// No clamping: any offset, negative or past the content, is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    offset: ScrollOffset,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    /// Merge the provided axes into the current offset.
    ///
    /// Returns true if the offset changed.
    pub fn set_offset(&mut self, update: ScrollUpdate) -> bool {
        let before = self.offset;
        if let Some(x) = update.x {
            self.offset.x = x;
        }
        if let Some(y) = update.y {
            self.offset.y = y;
        }
        before != self.offset
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_merge() {
        let mut scroll = ScrollState::new();
        assert!(scroll.set_offset(ScrollUpdate::both(-10.0, 40.0)));
        assert!(scroll.set_offset(ScrollUpdate::x(5.0)));
        assert_eq!(scroll.offset(), ScrollOffset { x: 5.0, y: 40.0 });
        assert!(scroll.set_offset(ScrollUpdate::y(-1e6)));
        assert_eq!(scroll.offset().x, 5.0);
        assert_eq!(scroll.offset().y, -1e6);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut scroll = ScrollState::new();
        assert!(!scroll.set_offset(ScrollUpdate::default()));
        assert_eq!(scroll.offset(), ScrollOffset::default());
    }
}
