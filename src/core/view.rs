//! View trait: the contract every renderable, interactive component implements.

use super::event::InputEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect);

    fn cursor_position(&self) -> Option<(u16, u16)> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResult::Ignored)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveArea {
    Explorer,
    Editor,
}

impl Default for ActiveArea {
    fn default() -> Self {
        ActiveArea::Editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_result() {
        assert!(EventResult::Consumed.is_consumed());
        assert!(EventResult::Ignored.is_ignored());
        assert!(EventResult::Quit.is_quit());
    }

    #[test]
    fn test_active_area_default() {
        assert_eq!(ActiveArea::default(), ActiveArea::Editor);
    }
}
