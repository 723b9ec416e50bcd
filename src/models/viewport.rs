//! Per-document viewport: first visible line and visible height.
//!
//! The minimap reads this state to place its indicator; the editor view
//! keeps it following the cursor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self { offset: 0, height }
    }

    pub fn first_visible_line(&self) -> usize {
        self.offset
    }

    pub fn visible_line_count(&self) -> usize {
        self.height
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    pub fn scroll_by(&mut self, delta: isize, total_lines: usize) {
        if delta > 0 {
            let max_offset = total_lines.saturating_sub(self.height);
            self.offset = (self.offset + delta as usize).min(max_offset);
        } else {
            self.offset = self.offset.saturating_sub((-delta) as usize);
        }
    }

    pub fn scroll_to(&mut self, first: usize, total_lines: usize) {
        self.offset = first.min(total_lines.saturating_sub(self.height));
    }

    /// Keep the given row on screen, scrolling the minimum distance.
    pub fn follow(&mut self, row: usize) {
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.height {
            self.offset = row + 1 - self.height;
        }
    }

    pub fn visible_range(&self, total_lines: usize) -> (usize, usize) {
        let start = self.offset;
        let end = (start + self.height).min(total_lines);
        (start, end)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(20)
    }
}
