//! Tab strip: a projection of the open-document list, kept in sync by
//! replaying session events rather than by re-reading the registry.

use super::tab_row::{self, TabSlot};
use crate::models::SessionEvent;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use crate::services::ThemeProvider;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub label: String,
    pub modified: bool,
    /// Full path, shown in the status line while hovering.
    pub tooltip: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    Tab(usize),
    Close(usize),
}

pub struct TabStrip {
    entries: Vec<TabEntry>,
    active: Option<usize>,
    hovered: Option<usize>,
    area: Option<Rect>,
}

impl TabStrip {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            active: None,
            hovered: None,
            area: None,
        }
    }

    pub fn entries(&self) -> &[TabEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Replay one session event against the projection. Events arrive in
    /// emission order, so indices are valid at application time.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Opened { index, label, path } => {
                let entry = TabEntry {
                    label: label.clone(),
                    modified: false,
                    tooltip: path.clone(),
                };
                if *index <= self.entries.len() {
                    self.entries.insert(*index, entry);
                } else {
                    self.entries.push(entry);
                }
            }
            SessionEvent::Closed { index } => {
                if *index < self.entries.len() {
                    self.entries.remove(*index);
                }
                // A close below the focused tab shifts its index without
                // a focus change; mirror the shift. Closing the focused
                // tab itself is always followed by an Activated event.
                if let Some(active) = self.active {
                    if active > *index {
                        self.active = Some(active - 1);
                    }
                }
                self.hovered = None;
            }
            SessionEvent::Activated { index } => {
                self.active = *index;
            }
            SessionEvent::Reordered { from, to } => {
                if *from < self.entries.len() && *to < self.entries.len() {
                    let entry = self.entries.remove(*from);
                    self.entries.insert(*to, entry);
                }
                self.active = self.active.map(|a| {
                    if a == *from {
                        *to
                    } else if *from < a && a <= *to {
                        a - 1
                    } else if *to <= a && a < *from {
                        a + 1
                    } else {
                        a
                    }
                });
            }
            SessionEvent::ModificationChanged { index, dirty } => {
                if let Some(entry) = self.entries.get_mut(*index) {
                    entry.modified = *dirty;
                }
            }
            SessionEvent::Saved { .. } => {}
        }
    }

    pub fn set_hovered(&mut self, hovered: Option<usize>) -> bool {
        if self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    /// Map a cell position to the tab (or its close button) under it.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<TabHit> {
        let area = self.area?;
        if y < area.y || y >= area.y + area.height {
            return None;
        }
        for slot in self.layout(area) {
            if x < slot.start || x >= slot.end {
                continue;
            }
            if let Some(close_x) = slot.close_x {
                if x >= close_x {
                    return Some(TabHit::Close(slot.index));
                }
            }
            return Some(TabHit::Tab(slot.index));
        }
        None
    }

    /// Tooltip path for the hovered tab, if any.
    pub fn hovered_path(&self) -> Option<&PathBuf> {
        let index = self.hovered?;
        self.entries.get(index)?.tooltip.as_ref()
    }

    fn layout(&self, area: Rect) -> Vec<TabSlot> {
        tab_row::layout_tabs(area, &self.entries, self.hovered)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &ThemeProvider) {
        self.area = Some(area);

        let strip_bg = theme.get_color("editor.tab.background", ratatui::style::Color::DarkGray);
        let active_bg = theme.get_color("editor.tab.activeBackground", ratatui::style::Color::Black);
        let fg = theme.get_color("sidebar.foreground", ratatui::style::Color::Gray);
        let dirty_fg = theme.get_color("editor.modifiedIndicator", ratatui::style::Color::Yellow);

        let slots = self.layout(area);
        let mut spans: Vec<Span> = Vec::new();
        let mut x = area.x;

        for slot in &slots {
            let entry = &self.entries[slot.index];
            let is_active = self.active == Some(slot.index);
            let bg = if is_active { active_bg } else { strip_bg };
            let mut base = Style::default().fg(fg).bg(bg);
            if is_active {
                base = base.add_modifier(Modifier::BOLD);
            }

            if slot.start > x {
                spans.push(Span::styled(
                    " ".repeat((slot.start - x) as usize),
                    Style::default().bg(strip_bg),
                ));
            }

            let mut cell = String::new();
            cell.push(' ');
            if slot.dirty_x.is_some() {
                spans.push(Span::styled(cell.clone(), base));
                spans.push(Span::styled("● ", Style::default().fg(dirty_fg).bg(bg)));
                cell.clear();
            }
            let title = tab_row::ellipsize(&entry.label, slot.title_width);
            cell.push_str(&tab_row::pad_to_width(&title, slot.title_width));
            cell.push(' ');
            spans.push(Span::styled(cell, base));
            if slot.close_x.is_some() {
                spans.push(Span::styled("× ", base));
            }
            x = slot.end;

            if slot.index + 1 < self.entries.len() {
                spans.push(Span::styled("│", Style::default().fg(fg).bg(strip_bg)));
                x += 1;
            }
        }

        let row = Paragraph::new(Line::from(spans)).style(Style::default().bg(strip_bg));
        frame.render_widget(row, area);
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(index: usize, label: &str) -> SessionEvent {
        SessionEvent::Opened {
            index,
            label: label.to_string(),
            path: Some(PathBuf::from("/tmp").join(label)),
        }
    }

    #[test]
    fn test_apply_open_and_activate() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        strip.apply(&SessionEvent::Activated { index: Some(0) });
        strip.apply(&opened(1, "b.rs"));
        strip.apply(&SessionEvent::Activated { index: Some(1) });

        assert_eq!(strip.entries().len(), 2);
        assert_eq!(strip.entries()[1].label, "b.rs");
        assert_eq!(strip.active(), Some(1));
    }

    #[test]
    fn test_apply_close_and_clear() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        strip.apply(&SessionEvent::Activated { index: Some(0) });
        strip.apply(&SessionEvent::Closed { index: 0 });
        strip.apply(&SessionEvent::Activated { index: None });

        assert!(strip.entries().is_empty());
        assert_eq!(strip.active(), None);
    }

    #[test]
    fn test_apply_modification_flip() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        assert!(!strip.entries()[0].modified);

        strip.apply(&SessionEvent::ModificationChanged {
            index: 0,
            dirty: true,
        });
        assert!(strip.entries()[0].modified);

        strip.apply(&SessionEvent::ModificationChanged {
            index: 0,
            dirty: false,
        });
        assert!(!strip.entries()[0].modified);
    }

    #[test]
    fn test_apply_reorder() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        strip.apply(&opened(1, "b.rs"));
        strip.apply(&opened(2, "c.rs"));
        strip.apply(&SessionEvent::Activated { index: Some(2) });
        strip.apply(&SessionEvent::Reordered { from: 2, to: 0 });

        let labels: Vec<&str> = strip.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["c.rs", "a.rs", "b.rs"]);
        // Focus follows the moved tab.
        assert_eq!(strip.active(), Some(0));
    }

    #[test]
    fn test_close_below_active_shifts_focus_index() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        strip.apply(&opened(1, "b.rs"));
        strip.apply(&SessionEvent::Activated { index: Some(1) });

        // No Activated event follows: the focused document is unchanged.
        strip.apply(&SessionEvent::Closed { index: 0 });
        assert_eq!(strip.active(), Some(0));
        assert_eq!(strip.entries()[0].label, "b.rs");
    }

    #[test]
    fn test_stale_indices_are_ignored() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        strip.apply(&SessionEvent::Closed { index: 5 });
        strip.apply(&SessionEvent::ModificationChanged {
            index: 9,
            dirty: true,
        });
        assert_eq!(strip.entries().len(), 1);
    }

    #[test]
    fn test_hit_test_tab_and_close() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        strip.apply(&opened(1, "b.rs"));
        strip.area = Some(Rect::new(0, 0, 40, 1));
        strip.set_hovered(Some(0));

        let slots = strip.layout(Rect::new(0, 0, 40, 1));
        let close_x = slots[0].close_x.unwrap();
        assert_eq!(strip.hit_test(close_x, 0), Some(TabHit::Close(0)));
        assert_eq!(strip.hit_test(slots[0].title_x, 0), Some(TabHit::Tab(0)));
        assert_eq!(strip.hit_test(slots[1].title_x, 0), Some(TabHit::Tab(1)));
        assert_eq!(strip.hit_test(39, 0), None);
    }

    #[test]
    fn test_set_hovered_reports_change() {
        let mut strip = TabStrip::new();
        strip.apply(&opened(0, "a.rs"));
        assert!(strip.set_hovered(Some(0)));
        assert!(!strip.set_hovered(Some(0)));
        assert!(strip.set_hovered(None));
    }
}
