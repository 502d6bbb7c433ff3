//! Grid-aware cursor over the current result set.
//!
//! The cursor is only ever meaningful together with the length of the result
//! set it points into, so both live in one `Copy` value. Horizontal moves wrap,
//! vertical moves step by the column count and clamp at the edges. Every move
//! on an empty set is a silent no-op.

/// Navigation input, independent of any key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    /// Pointer selection; clamped into range
    To(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCursor {
    cursor: usize,
    len: usize,
    columns: usize,
}

impl Default for SelectionCursor {
    fn default() -> Self {
        Self {
            cursor: 0,
            len: 0,
            columns: 1,
        }
    }
}

impl SelectionCursor {
    pub fn new(len: usize, columns: usize) -> Self {
        let mut state = Self {
            columns: columns.max(1),
            ..Self::default()
        };
        state.on_result_set_changed(len);
        state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Re-clamp against a freshly produced result set. Must run before any
    /// navigation is applied to the new set.
    pub fn on_result_set_changed(&mut self, new_len: usize) {
        self.len = new_len;
        if new_len == 0 {
            self.cursor = 0;
        } else if self.cursor >= new_len {
            self.cursor = new_len - 1;
        }
    }

    /// Column count from the rendering surface; 0 is treated as 1.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn move_right(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % self.len;
    }

    pub fn move_left(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = (self.cursor + self.len - 1) % self.len;
    }

    pub fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add(self.columns).min(self.len - 1);
    }

    pub fn move_up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_sub(self.columns);
    }

    pub fn move_to(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.cursor = index.min(self.len - 1);
    }

    pub fn apply(&mut self, key: NavKey) {
        match key {
            NavKey::Left => self.move_left(),
            NavKey::Right => self.move_right(),
            NavKey::Up => self.move_up(),
            NavKey::Down => self.move_down(),
            NavKey::To(index) => self.move_to(index),
        }
    }
}

/// Pure navigation step: `(state, input) -> state`
pub fn reduce(state: SelectionCursor, key: NavKey) -> SelectionCursor {
    let mut next = state;
    next.apply(key);
    next
}
