//! Minimap: a compressed overview of the active document with a
//! viewport indicator. Regeneration is debounced so bursts of edits
//! produce a single rebuild.

use crate::models::{DocumentHandle, TextBuffer};
use crate::services::{EditorConfig, ThemeProvider};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegenState {
    Idle,
    /// A rebuild is scheduled; further requests before the deadline
    /// coalesce into it.
    Pending(Instant),
}

pub struct MinimapView {
    state: RegenState,
    rows: Option<Vec<String>>,
    area: Option<Rect>,
    debounce: Duration,
    max_line_chars: usize,
}

impl MinimapView {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: RegenState::Idle,
            rows: None,
            area: None,
            debounce: Duration::from_millis(config.minimap_debounce_ms),
            max_line_chars: config.minimap_max_line_chars,
        }
    }

    /// Request a rebuild. Starts the debounce window only when none is
    /// running, so repeated calls within the window collapse into one
    /// regeneration.
    pub fn schedule_update(&mut self, now: Instant) {
        if self.state == RegenState::Idle {
            self.state = RegenState::Pending(now + self.debounce);
        }
    }

    /// Rebuild immediately, bypassing the debounce. Used when the
    /// active document itself changes.
    pub fn refresh_now(&mut self, doc: Option<&DocumentHandle>) {
        self.state = RegenState::Idle;
        self.regenerate(doc);
    }

    /// Fire the pending rebuild once its deadline has passed. Returns
    /// true when the overview was regenerated.
    pub fn tick(&mut self, doc: Option<&DocumentHandle>, now: Instant) -> bool {
        match self.state {
            RegenState::Pending(deadline) if now >= deadline => {
                self.state = RegenState::Idle;
                self.regenerate(doc);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    /// Center the viewport on the clicked overview row.
    pub fn handle_click(&self, y: u16, doc: &mut DocumentHandle) {
        let Some(area) = self.area else { return };
        let total = doc.buffer().len_lines();
        let target = click_target_line(y.saturating_sub(area.y), area.height, total);
        let visible = doc.viewport.visible_line_count();
        let first = target.saturating_sub(visible / 2);
        doc.viewport.scroll_to(first, total);
    }

    fn regenerate(&mut self, doc: Option<&DocumentHandle>) {
        self.rows = None;
        let Some(area) = self.area else { return };
        let Some(doc) = doc else { return };

        let text = doc.buffer().text();
        if text.is_empty() {
            return;
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let count = lines.len();
        let height = area.height as usize;
        if count == 0 || height == 0 {
            return;
        }

        let mut rows = Vec::with_capacity(height);
        for r in 0..height {
            // Uniform sampling; short documents stretch, long ones skip.
            let line_index = (r * count / height).min(count - 1);
            let row: String = lines[line_index].chars().take(self.max_line_chars).collect();
            rows.push(row);
        }
        self.rows = Some(rows);
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        doc: Option<&DocumentHandle>,
        theme: &ThemeProvider,
    ) {
        if self.area != Some(area) {
            self.area = Some(area);
            self.regenerate(doc);
        } else if self.rows.is_none() {
            self.regenerate(doc);
        }

        let bg = theme.get_color("editor.background", Color::Reset);
        let fg = theme.get_color("minimap.foreground", Color::DarkGray);
        let indicator_bg = theme.get_color("minimap.viewportBackground", Color::Gray);

        let Some(rows) = &self.rows else {
            let pad = (area.height / 2) as usize;
            let mut lines: Vec<Line> = std::iter::repeat_with(Line::default).take(pad).collect();
            lines.push(Line::from("Minimap"));
            let placeholder = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().fg(fg).bg(bg));
            frame.render_widget(placeholder, area);
            return;
        };

        let indicator = doc.and_then(|doc| {
            indicator_span(
                doc.viewport.first_visible_line(),
                doc.viewport.visible_line_count(),
                doc.buffer().len_lines(),
                area.height,
            )
        });

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut style = Style::default().fg(fg).bg(bg);
                if let Some((top, len)) = indicator {
                    let i = i as u16;
                    if i >= top && i < top + len {
                        style = style.bg(indicator_bg);
                    }
                }
                Line::styled(row.clone(), style)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
    }
}

/// Overview row span covering the visible part of the document, as
/// (top, height) in cells. The span position and size come from the
/// line fractions alone; a non-empty document always gets at least one
/// cell.
pub fn indicator_span(first: usize, visible: usize, total: usize, height: u16) -> Option<(u16, u16)> {
    if total == 0 || height == 0 {
        return None;
    }
    let cells = height as f32;
    let top = ((first as f32 / total as f32) * cells).floor() as u16;
    let top = top.min(height - 1);
    let len = ((visible as f32 / total as f32) * cells).round().max(1.0) as u16;
    let len = len.min(height - top);
    Some((top, len))
}

/// Map an overview row back to a document line.
pub fn click_target_line(row: u16, height: u16, total: usize) -> usize {
    if total == 0 || height == 0 {
        return 0;
    }
    let ratio = row as f32 / height as f32;
    let target = (ratio * total as f32) as usize;
    target.min(total - 1)
}
