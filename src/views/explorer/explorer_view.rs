//! File explorer sidebar: renders the flattened tree and maps clicks
//! back to rows. Tree mutation stays in the workbench.

use crate::models::{FileTree, FileTreeRow, NodeId};
use crate::services::ThemeProvider;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct ExplorerView {
    area: Option<Rect>,
    scroll_offset: usize,
}

impl ExplorerView {
    pub fn new() -> Self {
        Self {
            area: None,
            scroll_offset: 0,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    pub fn view_height(&self) -> usize {
        self.area.map(|a| a.height.saturating_sub(1) as usize).unwrap_or(0)
    }

    pub fn scroll_by(&mut self, delta: isize, row_count: usize) {
        let max_offset = row_count.saturating_sub(self.view_height().max(1));
        if delta > 0 {
            self.scroll_offset = (self.scroll_offset + delta as usize).min(max_offset);
        } else {
            self.scroll_offset = self.scroll_offset.saturating_sub((-delta) as usize);
        }
    }

    /// Keep `index` visible after keyboard selection moves.
    pub fn scroll_into_view(&mut self, index: usize) {
        let height = self.view_height().max(1);
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + height {
            self.scroll_offset = index + 1 - height;
        }
    }

    /// Row index under the given cell, accounting for the header line
    /// and scroll offset.
    pub fn hit_test_row(&self, y: u16, rows: &[FileTreeRow]) -> Option<usize> {
        let area = self.area?;
        if y <= area.y || y >= area.y + area.height {
            return None;
        }
        let index = (y - area.y - 1) as usize + self.scroll_offset;
        (index < rows.len()).then_some(index)
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        tree: &FileTree,
        rows: &[FileTreeRow],
        theme: &ThemeProvider,
    ) {
        self.area = Some(area);

        let bg = theme.get_color("sidebar.background", Color::Reset);
        let fg = theme.get_color("sidebar.foreground", Color::Gray);
        let selected_bg = theme.get_color("sidebar.selectedBackground", Color::Blue);
        let selected_fg = theme.get_color("sidebar.selectedForeground", Color::White);
        let header_fg = theme.get_color("header.foreground", Color::Cyan);

        let mut lines = Vec::with_capacity(area.height as usize);
        let root_name = tree
            .absolute_root()
            .file_name()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "FILES".to_string());
        lines.push(Line::from(Span::styled(
            format!(" {root_name}"),
            Style::default().fg(header_fg).add_modifier(Modifier::BOLD),
        )));

        let height = self.view_height();
        let end = (self.scroll_offset + height).min(rows.len());
        for row in &rows[self.scroll_offset..end] {
            lines.push(self.row_line(row, tree.selected(), fg, selected_fg, selected_bg, bg));
        }

        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
    }

    fn row_line(
        &self,
        row: &FileTreeRow,
        selected: Option<NodeId>,
        fg: Color,
        selected_fg: Color,
        selected_bg: Color,
        bg: Color,
    ) -> Line<'static> {
        let glyph = if row.is_dir {
            if row.is_expanded {
                "▾ "
            } else {
                "▸ "
            }
        } else {
            "  "
        };

        let indent = " ".repeat(row.depth as usize * 2 + 1);
        let name = row.name.to_string_lossy();
        let style = if selected == Some(row.id) {
            Style::default().fg(selected_fg).bg(selected_bg)
        } else {
            Style::default().fg(fg).bg(bg)
        };

        Line::from(Span::styled(format!("{indent}{glyph}{name}"), style))
    }
}

impl Default for ExplorerView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::build_file_tree;
    use std::fs;
    use tempfile::tempdir;

    fn rows_fixture() -> (tempfile::TempDir, FileTree) {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();
        let tree = build_file_tree(dir.path()).unwrap();
        (dir, tree)
    }

    #[test]
    fn test_hit_test_skips_header() {
        let (_dir, tree) = rows_fixture();
        let rows = tree.flatten_for_view();
        let mut view = ExplorerView::new();
        view.area = Some(Rect::new(0, 0, 20, 10));

        // Header row maps to nothing.
        assert_eq!(view.hit_test_row(0, &rows), None);
        assert_eq!(view.hit_test_row(1, &rows), Some(0));
        assert_eq!(view.hit_test_row(2, &rows), Some(1));
        assert_eq!(view.hit_test_row(9, &rows), None);
    }

    #[test]
    fn test_hit_test_honors_scroll() {
        let (_dir, tree) = rows_fixture();
        let rows = tree.flatten_for_view();
        let mut view = ExplorerView::new();
        view.area = Some(Rect::new(0, 0, 20, 10));
        view.scroll_offset = 1;

        assert_eq!(view.hit_test_row(1, &rows), Some(1));
    }

    #[test]
    fn test_scroll_into_view() {
        let mut view = ExplorerView::new();
        view.area = Some(Rect::new(0, 0, 20, 6));

        view.scroll_into_view(10);
        assert_eq!(view.scroll_offset, 6);

        view.scroll_into_view(2);
        assert_eq!(view.scroll_offset, 2);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut view = ExplorerView::new();
        view.area = Some(Rect::new(0, 0, 20, 6));

        view.scroll_by(100, 8);
        assert_eq!(view.scroll_offset, 3);
        view.scroll_by(-100, 8);
        assert_eq!(view.scroll_offset, 0);
    }
}
