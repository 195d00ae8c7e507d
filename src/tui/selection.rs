use std::ops::Range;

/// Direction for page and half-page moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn signed(self, amount: usize) -> isize {
        let amount = amount as isize;
        match self {
            Direction::Up => -amount,
            Direction::Down => amount,
        }
    }
}

/// Selected record plus the visible window into the list.
///
/// Selection and scrolling are tied together by one ensure-visible rule:
/// whenever the selection, list length or window height changes, the
/// window is shifted just enough to keep the selection inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Option<usize>,
    viewport_top: usize,
    visible_count: usize,
    /// Store length as of the last `on_store_mutated`
    len: usize,
}

impl Selection {
    pub fn new(visible_count: usize) -> Self {
        Selection {
            selected: None,
            viewport_top: 0,
            visible_count: visible_count.max(1),
            len: 0,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Move the selection by `delta`, clamped to the list bounds.
    /// Returns whether the selection changed.
    pub fn move_by(&mut self, delta: isize) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let max = self.len.saturating_sub(1) as isize;
        let target = (current as isize).saturating_add(delta).clamp(0, max) as usize;
        if target == current {
            return false;
        }
        self.selected = Some(target);
        self.ensure_visible();
        true
    }

    pub fn move_by_page(&mut self, direction: Direction) -> bool {
        self.move_by(direction.signed(self.visible_count))
    }

    pub fn move_by_half_page(&mut self, direction: Direction) -> bool {
        self.move_by(direction.signed(self.visible_count / 2))
    }

    /// Select a specific index (clamped to the list). Returns whether the
    /// selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if self.len == 0 {
            return false;
        }
        let target = index.min(self.len - 1);
        let changed = self.selected != Some(target);
        self.selected = Some(target);
        self.ensure_visible();
        changed
    }

    /// Resynchronise with the record store after any mutation.
    pub fn on_store_mutated(&mut self, new_len: usize) {
        self.len = new_len;
        self.selected = match (new_len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(sel)) => Some(sel.min(n - 1)),
        };
        self.ensure_visible();
    }

    /// Apply a new window height without touching the selection.
    pub fn on_resize(&mut self, visible_count: usize) {
        self.visible_count = visible_count.max(1);
        self.ensure_visible();
    }

    /// Indexes of the records currently in the window.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.viewport_top + self.visible_count).min(self.len);
        self.viewport_top.min(end)..end
    }

    fn ensure_visible(&mut self) {
        let max_top = self.len.saturating_sub(self.visible_count);
        self.viewport_top = self.viewport_top.min(max_top);
        if let Some(sel) = self.selected {
            if sel < self.viewport_top {
                self.viewport_top = sel;
            } else if sel >= self.viewport_top + self.visible_count {
                self.viewport_top = sel + 1 - self.visible_count;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selection(len: usize, visible: usize) -> Selection {
        let mut s = Selection::new(visible);
        s.on_store_mutated(len);
        s
    }

    fn assert_invariants(s: &Selection) {
        match s.selected() {
            None => assert_eq!(s.len, 0),
            Some(sel) => {
                assert!(sel < s.len);
                assert!(s.viewport_top() <= sel);
                assert!(sel < s.viewport_top() + s.visible_count());
            }
        }
        assert!(s.viewport_top() <= s.len.saturating_sub(s.visible_count()));
    }

    #[test]
    fn test_empty_has_no_selection() {
        let mut s = selection(0, 3);
        assert_eq!(s.selected(), None);
        assert!(!s.move_by(1));
        assert!(!s.move_by_page(Direction::Down));
        assert!(!s.select(4));
        assert_eq!(s.visible_range(), 0..0);
    }

    #[test]
    fn test_first_record_gets_selected() {
        let s = selection(1, 3);
        assert_eq!(s.selected(), Some(0));
        assert_eq!(s.visible_range(), 0..1);
    }

    #[test]
    fn test_move_pulls_window_forward() {
        let mut s = selection(10, 3);
        assert!(s.move_by(5));
        assert_eq!(s.selected(), Some(5));
        assert_eq!(s.viewport_top(), 3);
        assert_eq!(s.visible_range(), 3..6);
    }

    #[test]
    fn test_move_pulls_window_back() {
        let mut s = selection(10, 3);
        s.select(9);
        assert_eq!(s.viewport_top(), 7);
        s.move_by(-4);
        assert_eq!(s.selected(), Some(5));
        assert_eq!(s.viewport_top(), 5);
    }

    #[test]
    fn test_boundaries_are_unchanged() {
        let mut s = selection(4, 3);
        assert!(!s.move_by(-1));
        assert_eq!(s.selected(), Some(0));
        s.select(3);
        assert!(!s.move_by(1));
        assert_eq!(s.selected(), Some(3));
        // Large jumps clamp rather than fail
        assert!(s.move_by(-100));
        assert_eq!(s.selected(), Some(0));
    }

    #[test]
    fn test_move_by_zero_is_idempotent() {
        let mut s = selection(10, 3);
        s.move_by(6);
        let before = s.clone();
        assert!(!s.move_by(0));
        assert_eq!(s, before);
    }

    #[test]
    fn test_page_and_half_page() {
        let mut s = selection(20, 6);
        assert!(s.move_by_page(Direction::Down));
        assert_eq!(s.selected(), Some(6));
        assert!(s.move_by_half_page(Direction::Down));
        assert_eq!(s.selected(), Some(9));
        assert!(s.move_by_half_page(Direction::Up));
        assert_eq!(s.selected(), Some(6));
        assert!(s.move_by_page(Direction::Up));
        assert_eq!(s.selected(), Some(0));
        assert_invariants(&s);
    }

    #[test]
    fn test_half_page_of_one_row_does_nothing() {
        let mut s = selection(5, 1);
        assert!(!s.move_by_half_page(Direction::Down));
        assert_eq!(s.selected(), Some(0));
    }

    #[test]
    fn test_delete_last_selected_clamps() {
        let mut s = selection(4, 10);
        s.select(3);
        s.on_store_mutated(3);
        assert_eq!(s.selected(), Some(2));
        assert_invariants(&s);
    }

    #[test]
    fn test_delete_shrinks_window_top() {
        let mut s = selection(10, 3);
        s.select(7);
        assert_eq!(s.viewport_top(), 5);
        s.select(9);
        s.move_by(-2);
        assert_eq!((s.selected(), s.viewport_top()), (Some(7), 7));
        s.on_store_mutated(9);
        // 9 records, 3 visible: top can be at most 6
        assert_eq!(s.viewport_top(), 6);
        assert_eq!(s.selected(), Some(7));
        assert_invariants(&s);
    }

    #[test]
    fn test_emptying_clears_selection() {
        let mut s = selection(2, 3);
        s.select(1);
        s.on_store_mutated(0);
        assert_eq!(s.selected(), None);
        assert_eq!(s.viewport_top(), 0);
    }

    #[test]
    fn test_resize_keeps_selection_visible() {
        let mut s = selection(10, 8);
        s.select(7);
        assert_eq!(s.viewport_top(), 0);
        s.on_resize(3);
        assert_eq!(s.selected(), Some(7));
        assert_eq!(s.viewport_top(), 5);
        s.on_resize(10);
        assert_eq!(s.viewport_top(), 0);
        s.on_resize(0);
        assert_eq!(s.visible_count(), 1);
        assert_eq!(s.viewport_top(), 7);
        assert_invariants(&s);
    }

    #[test]
    fn test_invariants_over_mixed_sequence() {
        let mut s = Selection::new(4);
        let mut len = 0usize;
        for step in 0..60usize {
            match step % 6 {
                0 | 1 => {
                    len += 1;
                    s.on_store_mutated(len);
                    s.select(len - 1);
                }
                2 => {
                    s.move_by(-3);
                }
                3 if len > 0 => {
                    len -= 1;
                    s.on_store_mutated(len);
                }
                4 => s.on_resize(step % 5 + 1),
                _ => {
                    s.move_by_page(Direction::Down);
                }
            }
            assert_invariants(&s);
        }
    }
}
