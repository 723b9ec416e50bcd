//! Text editing pane: line-number gutter, current-line highlight and
//! cursor movement over the active document's buffer.

use crate::models::{DocumentHandle, TextBuffer};
use crate::services::{EditorConfig, ThemeProvider};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct EditorView {
    area: Option<Rect>,
    gutter_width: u16,
}

impl EditorView {
    pub fn new() -> Self {
        Self {
            area: None,
            gutter_width: 0,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    /// Apply one key to the buffer. Returns true when the content
    /// changed (movement alone does not count).
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        doc: &mut DocumentHandle,
        config: &EditorConfig,
    ) -> bool {
        let page = doc.viewport.visible_line_count();
        let buffer = doc.buffer_mut();
        let (row, col) = buffer.cursor();

        let edited = match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                buffer.insert_char(c);
                true
            }
            KeyCode::Enter => {
                buffer.insert_char('\n');
                true
            }
            KeyCode::Tab => {
                buffer.insert_str(&" ".repeat(config.tab_size as usize));
                true
            }
            KeyCode::Backspace => buffer.delete_backward(),
            KeyCode::Delete => buffer.delete_forward(),
            KeyCode::Left => {
                if col > 0 {
                    buffer.set_cursor(row, col - 1);
                } else if row > 0 {
                    let prev_len = buffer.line_grapheme_len(row - 1);
                    buffer.set_cursor(row - 1, prev_len);
                }
                false
            }
            KeyCode::Right => {
                if col < buffer.line_grapheme_len(row) {
                    buffer.set_cursor(row, col + 1);
                } else if row + 1 < buffer.len_lines() {
                    buffer.set_cursor(row + 1, 0);
                }
                false
            }
            KeyCode::Up => {
                if row > 0 {
                    buffer.set_cursor(row - 1, col);
                }
                false
            }
            KeyCode::Down => {
                buffer.set_cursor(row + 1, col);
                false
            }
            KeyCode::Home => {
                buffer.set_cursor(row, 0);
                false
            }
            KeyCode::End => {
                let len = buffer.line_grapheme_len(row);
                buffer.set_cursor(row, len);
                false
            }
            KeyCode::PageUp => {
                buffer.set_cursor(row.saturating_sub(page), col);
                false
            }
            KeyCode::PageDown => {
                buffer.set_cursor(row + page, col);
                false
            }
            _ => false,
        };

        let row = doc.buffer().cursor().0;
        doc.viewport.follow(row);
        edited
    }

    pub fn handle_scroll(&self, delta: isize, doc: &mut DocumentHandle, config: &EditorConfig) {
        let total = doc.buffer().len_lines();
        doc.viewport
            .scroll_by(delta * config.scroll_lines as isize, total);
    }

    /// Move the cursor to the clicked cell.
    pub fn handle_click(&self, x: u16, y: u16, doc: &mut DocumentHandle) {
        let Some(area) = self.area else { return };
        let row = doc.viewport.first_visible_line() + (y.saturating_sub(area.y)) as usize;
        let row = row.min(doc.buffer().len_lines().saturating_sub(1));

        let text_x = (area.x + self.gutter_width).min(area.x + area.width);
        let target = x.saturating_sub(text_x) as usize;
        let line = doc.buffer().line(row).unwrap_or_default();
        let col = column_at_width(&line, target);
        doc.buffer_mut().set_cursor(row, col);
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        doc: &mut DocumentHandle,
        theme: &ThemeProvider,
        config: &EditorConfig,
    ) {
        self.area = Some(area);
        doc.viewport.set_height(area.height as usize);

        let total = doc.buffer().len_lines();
        self.gutter_width = if config.show_line_numbers {
            (digits(total) + 1).max(4) as u16
        } else {
            0
        };

        let bg = theme.get_color("editor.background", Color::Reset);
        let fg = theme.get_color("editor.foreground", Color::Reset);
        let number_fg = theme.get_color("editor.lineNumber.foreground", Color::DarkGray);
        let current_bg = theme.get_color("editor.currentLine", Color::Reset);

        let cursor_row = doc.buffer().cursor().0;
        let (start, end) = doc.viewport.visible_range(total);

        let mut lines = Vec::with_capacity(end - start);
        for row in start..end {
            let is_current = row == cursor_row;
            let line_bg = if is_current { current_bg } else { bg };
            let mut spans = Vec::with_capacity(2);

            if self.gutter_width > 0 {
                spans.push(Span::styled(
                    format!("{:>width$} ", row + 1, width = self.gutter_width as usize - 1),
                    Style::default().fg(number_fg).bg(line_bg),
                ));
            }

            let raw = doc.buffer().line(row).unwrap_or_default();
            let text = expand_tabs(&raw, config.tab_size as usize);
            spans.push(Span::styled(
                text.into_owned(),
                Style::default().fg(fg).bg(line_bg),
            ));

            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
    }

    /// Terminal cell of the cursor, if it is inside the visible area.
    pub fn cursor_position(&self, doc: &DocumentHandle, config: &EditorConfig) -> Option<(u16, u16)> {
        let area = self.area?;
        let (row, col) = doc.buffer().cursor();
        let (start, end) = doc.viewport.visible_range(doc.buffer().len_lines());
        if row < start || row >= end {
            return None;
        }

        let line = doc.buffer().line(row).unwrap_or_default();
        let prefix: String = line.graphemes(true).take(col).collect();
        let expanded = expand_tabs(&prefix, config.tab_size as usize);
        let x_offset = UnicodeWidthStr::width(expanded.as_ref()) as u16;

        let x = (area.x + self.gutter_width).saturating_add(x_offset);
        let y = area.y + (row - start) as u16;
        if x >= area.x + area.width {
            return None;
        }
        Some((x, y))
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new()
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn expand_tabs(line: &str, tab_size: usize) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len() + tab_size);
    for ch in line.chars() {
        if ch == '\t' {
            let pad = tab_size - (UnicodeWidthStr::width(out.as_str()) % tab_size);
            out.extend(std::iter::repeat(' ').take(pad));
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Grapheme column whose display position covers cell `target`.
fn column_at_width(line: &str, target: usize) -> usize {
    let mut used = 0;
    for (col, g) in line.graphemes(true).enumerate() {
        if used >= target {
            return col;
        }
        used += UnicodeWidthStr::width(g);
    }
    line.graphemes(true).count()
}
