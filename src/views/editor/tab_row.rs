//! Tab row layout: horizontal slot positions for each tab entry.

use super::tab_strip::TabEntry;
use ratatui::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthStr, UnicodeWidthChar};

const PADDING: u16 = 1;
const DIRTY_WIDTH: u16 = 2;
const CLOSE_WIDTH: u16 = 2;
const DIVIDER_WIDTH: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSlot {
    pub index: usize,
    pub start: u16,
    pub end: u16,
    pub dirty_x: Option<u16>,
    pub title_x: u16,
    pub title_width: u16,
    pub close_x: Option<u16>,
}

pub fn layout_tabs(area: Rect, entries: &[TabEntry], hovered: Option<usize>) -> Vec<TabSlot> {
    if area.width == 0 || entries.is_empty() {
        return Vec::new();
    }

    let preferred: Vec<usize> = entries
        .iter()
        .map(|e| UnicodeWidthStr::width(e.label.as_str()))
        .collect();
    let fixed = fixed_width(entries, hovered);
    let budget = (area.width as usize).saturating_sub(fixed);
    let title_widths = allocate_titles(&preferred, budget);

    let right = area.x + area.width;
    let mut x = area.x;
    let mut slots = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if x >= right {
            break;
        }

        let start = x;
        x = (x + PADDING).min(right);

        let dirty_x = if entry.modified && x < right {
            let pos = x;
            x = (x + DIRTY_WIDTH).min(right);
            Some(pos)
        } else {
            None
        };

        let title_x = x;
        let title_width = (title_widths[index] as u16).min(right.saturating_sub(title_x));
        x = (x + title_width + PADDING).min(right);

        let close_x = if hovered == Some(index) && x < right {
            let pos = x;
            x = (x + CLOSE_WIDTH).min(right);
            Some(pos)
        } else {
            None
        };

        slots.push(TabSlot {
            index,
            start,
            end: x,
            dirty_x,
            title_x,
            title_width,
            close_x,
        });

        if index + 1 < entries.len() {
            x = (x + DIVIDER_WIDTH).min(right);
        }
    }

    slots
}

fn fixed_width(entries: &[TabEntry], hovered: Option<usize>) -> usize {
    let mut total = entries.len().saturating_sub(1) * DIVIDER_WIDTH as usize;
    for (index, entry) in entries.iter().enumerate() {
        total += 2 * PADDING as usize;
        if entry.modified {
            total += DIRTY_WIDTH as usize;
        }
        if hovered == Some(index) {
            total += CLOSE_WIDTH as usize;
        }
    }
    total
}

/// Distribute the title budget: every tab gets at least one cell, then
/// remaining cells go round-robin to tabs still below their preferred
/// width.
fn allocate_titles(preferred: &[usize], budget: usize) -> Vec<usize> {
    let mut widths = vec![0; preferred.len()];
    let mut remaining = budget;

    for width in widths.iter_mut() {
        if remaining == 0 {
            return widths;
        }
        *width = 1;
        remaining -= 1;
    }

    while remaining > 0 {
        let mut progressed = false;
        for (width, &want) in widths.iter_mut().zip(preferred.iter()) {
            if *width >= want {
                continue;
            }
            *width += 1;
            remaining -= 1;
            progressed = true;
            if remaining == 0 {
                break;
            }
        }
        if !progressed {
            break;
        }
    }

    widths
}

/// Fit `title` into `max_width` display cells, appending an ellipsis
/// when it had to be cut.
pub fn ellipsize(title: &str, max_width: u16) -> String {
    let max_width = max_width as usize;
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(title) <= max_width {
        return title.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for g in title.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > max_width - 1 {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `text` with spaces on the right up to `width` display cells.
pub fn pad_to_width(text: &str, width: u16) -> String {
    let mut out = text.to_string();
    let mut used = UnicodeWidthStr::width(text);
    while used < width as usize {
        out.push(' ');
        used += ' '.width().unwrap_or(1);
    }
    out
}
