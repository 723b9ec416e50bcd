//! Workbench: owns the session registry, the services and every view,
//! and routes input between them. Views never talk to each other;
//! state changes flow through the session event queue and are fanned
//! out here once per loop iteration.

use crate::core::{ActiveArea, EventResult, InputEvent, View};
use crate::models::{build_file_tree, FileTree, SessionEvent, SessionRegistry, TextBuffer};
use crate::services::{EditorConfig, FileService, ThemeProvider};
use crate::views::{EditorView, ExplorerView, MinimapView, TabStrip};
use crate::views::editor::TabHit;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::{Path, PathBuf};
use std::time::Instant;

const WELCOME_TEXT: &str = "Welcome to Volt\n\n\
    Ctrl+S  save          Ctrl+W  close tab\n\
    Ctrl+B  toggle files  Ctrl+T  switch theme\n\
    Alt+O   close others  Alt+R   close to the right\n\
    Alt+←/→ move tab      Ctrl+Q  quit\n";

enum ExplorerAction {
    ToggleDir(crate::models::NodeId),
    OpenFile(PathBuf),
}

pub struct Workbench {
    session: SessionRegistry,
    files: FileService,
    theme: ThemeProvider,
    config: EditorConfig,
    tree: Option<FileTree>,
    explorer: ExplorerView,
    editor: EditorView,
    tabs: TabStrip,
    minimap: MinimapView,
    active_area: ActiveArea,
    sidebar_visible: bool,
    status: Option<String>,
    drag_from: Option<usize>,
}

impl Workbench {
    pub fn new(config: EditorConfig) -> Self {
        let minimap = MinimapView::new(&config);
        let mut workbench = Self {
            session: SessionRegistry::new(),
            files: FileService::new(),
            theme: ThemeProvider::dark(),
            config,
            tree: None,
            explorer: ExplorerView::new(),
            editor: EditorView::new(),
            tabs: TabStrip::new(),
            minimap,
            active_area: ActiveArea::Editor,
            sidebar_visible: true,
            status: None,
            drag_from: None,
        };
        workbench.session.open_untitled("Welcome", WELCOME_TEXT);
        workbench.sync_session_events();
        workbench
    }

    pub fn session(&self) -> &SessionRegistry {
        &self.session
    }

    /// Open a file or folder given on the command line.
    pub fn open_path(&mut self, path: &Path) {
        if path.is_dir() {
            self.open_folder(path);
        } else {
            self.open_file(path);
        }
    }

    pub fn open_folder(&mut self, path: &Path) {
        match build_file_tree(path) {
            Ok(tree) => {
                self.tree = Some(tree);
                self.sidebar_visible = true;
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to open folder");
                self.status = Some(format!("Cannot open folder: {}", path.display()));
            }
        }
    }

    pub fn open_file(&mut self, path: &Path) {
        match self.session.open_file(&self.files, path) {
            Ok(_) => self.status = None,
            Err(e) => {
                tracing::error!(error = %e, "open failed");
                self.status = Some(e.to_string());
            }
        }
        self.sync_session_events();
    }

    /// Drain the session queue and fan each event out to the
    /// projections, in emission order.
    fn sync_session_events(&mut self) {
        for event in self.session.drain_events() {
            self.tabs.apply(&event);
            match event {
                SessionEvent::Activated { .. } | SessionEvent::Closed { .. } => {
                    self.minimap.refresh_now(self.session.active_document());
                }
                _ => {}
            }
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        let result = match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(text) => {
                let text = text.clone();
                self.paste(&text);
                EventResult::Consumed
            }
            InputEvent::Resize(..) => EventResult::Consumed,
            InputEvent::FocusGained | InputEvent::FocusLost => EventResult::Ignored,
        };
        self.sync_session_events();
        result
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('q') if ctrl => return EventResult::Quit,
            KeyCode::Char('s') if ctrl => {
                self.save_active();
                return EventResult::Consumed;
            }
            KeyCode::Char('w') if ctrl => {
                if let Some(active) = self.session.active_index() {
                    self.session.close(active);
                }
                return EventResult::Consumed;
            }
            KeyCode::Char('b') if ctrl => {
                self.sidebar_visible = !self.sidebar_visible;
                if !self.sidebar_visible && self.active_area == ActiveArea::Explorer {
                    self.active_area = ActiveArea::Editor;
                }
                return EventResult::Consumed;
            }
            KeyCode::Char('t') if ctrl => {
                let next = if self.theme.name() == "dark" { "light" } else { "dark" };
                self.switch_theme(next);
                return EventResult::Consumed;
            }
            KeyCode::Char('e') if ctrl => {
                self.active_area = if self.active_area == ActiveArea::Editor
                    && self.sidebar_visible
                    && self.tree.is_some()
                {
                    ActiveArea::Explorer
                } else {
                    ActiveArea::Editor
                };
                return EventResult::Consumed;
            }
            KeyCode::Tab if ctrl => {
                self.session.next_tab();
                return EventResult::Consumed;
            }
            KeyCode::BackTab if ctrl => {
                self.session.prev_tab();
                return EventResult::Consumed;
            }
            KeyCode::Char('o') if alt => {
                if let Some(active) = self.session.active_index() {
                    self.session.close_others(active);
                }
                return EventResult::Consumed;
            }
            KeyCode::Char('r') if alt => {
                if let Some(active) = self.session.active_index() {
                    self.session.close_right_of(active);
                }
                return EventResult::Consumed;
            }
            KeyCode::Left if alt => {
                if let Some(active) = self.session.active_index() {
                    if active > 0 {
                        self.session.move_document(active, active - 1);
                    }
                }
                return EventResult::Consumed;
            }
            KeyCode::Right if alt => {
                if let Some(active) = self.session.active_index() {
                    if active + 1 < self.session.len() {
                        self.session.move_document(active, active + 1);
                    }
                }
                return EventResult::Consumed;
            }
            _ => {}
        }

        match self.active_area {
            ActiveArea::Editor => self.handle_editor_key(key),
            ActiveArea::Explorer => self.handle_explorer_key(key),
        }
    }

    fn handle_editor_key(&mut self, key: &KeyEvent) -> EventResult {
        let Some(active) = self.session.active_index() else {
            return EventResult::Ignored;
        };
        let edited = {
            let Some(doc) = self.session.get_mut(active) else {
                return EventResult::Ignored;
            };
            self.editor.handle_key(key, doc, &self.config)
        };
        if edited {
            self.session.notify_content_changed(active);
            self.minimap.schedule_update(Instant::now());
        }
        EventResult::Consumed
    }

    fn handle_explorer_key(&mut self, key: &KeyEvent) -> EventResult {
        let Some(tree) = &mut self.tree else {
            return EventResult::Ignored;
        };
        let rows = tree.flatten_for_view();
        if rows.is_empty() {
            return EventResult::Ignored;
        }
        let current = tree
            .selected()
            .and_then(|sel| rows.iter().position(|r| r.id == sel));

        match key.code {
            KeyCode::Up => {
                let next = current.map(|i| i.saturating_sub(1)).unwrap_or(0);
                tree.set_selected(Some(rows[next].id));
                self.explorer.scroll_into_view(next);
                EventResult::Consumed
            }
            KeyCode::Down => {
                let next = current.map(|i| (i + 1).min(rows.len() - 1)).unwrap_or(0);
                tree.set_selected(Some(rows[next].id));
                self.explorer.scroll_into_view(next);
                EventResult::Consumed
            }
            KeyCode::Enter => {
                let Some(index) = current else {
                    return EventResult::Consumed;
                };
                let action = Self::explorer_action(tree, &rows[index]);
                self.run_explorer_action(action);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn explorer_action(tree: &FileTree, row: &crate::models::FileTreeRow) -> ExplorerAction {
        if row.is_dir {
            ExplorerAction::ToggleDir(row.id)
        } else {
            ExplorerAction::OpenFile(tree.full_path(row.id))
        }
    }

    fn run_explorer_action(&mut self, action: ExplorerAction) {
        match action {
            ExplorerAction::ToggleDir(id) => {
                if let Some(tree) = &mut self.tree {
                    if let Err(e) = tree.ensure_loaded(id) {
                        tracing::warn!(error = %e, "failed to read directory");
                    }
                    tree.toggle_expand(id);
                }
            }
            ExplorerAction::OpenFile(path) => {
                self.open_file(&path);
                self.active_area = ActiveArea::Editor;
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> EventResult {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_click(x, y),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let (Some(from), Some(TabHit::Tab(to))) =
                    (self.drag_from, self.tabs.hit_test(x, y))
                {
                    if from != to {
                        self.session.move_document(from, to);
                        self.drag_from = Some(to);
                    }
                }
                EventResult::Consumed
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_from = None;
                EventResult::Consumed
            }
            MouseEventKind::Moved => {
                let hovered = match self.tabs.hit_test(x, y) {
                    Some(TabHit::Tab(i)) | Some(TabHit::Close(i)) => Some(i),
                    None => None,
                };
                self.tabs.set_hovered(hovered);
                EventResult::Consumed
            }
            MouseEventKind::ScrollUp => self.handle_scroll(x, y, -1),
            MouseEventKind::ScrollDown => self.handle_scroll(x, y, 1),
            _ => EventResult::Ignored,
        }
    }

    fn handle_left_click(&mut self, x: u16, y: u16) -> EventResult {
        if self.tabs.contains(x, y) {
            match self.tabs.hit_test(x, y) {
                Some(TabHit::Close(index)) => {
                    self.session.close(index);
                    self.drag_from = None;
                }
                Some(TabHit::Tab(index)) => {
                    self.session.activate(index);
                    self.drag_from = Some(index);
                }
                None => {}
            }
            return EventResult::Consumed;
        }

        if self.minimap.contains(x, y) {
            if let Some(doc) = self.session.active_document_mut() {
                self.minimap.handle_click(y, doc);
            }
            self.active_area = ActiveArea::Editor;
            return EventResult::Consumed;
        }

        if self.editor.contains(x, y) {
            if let Some(doc) = self.session.active_document_mut() {
                self.editor.handle_click(x, y, doc);
            }
            self.active_area = ActiveArea::Editor;
            return EventResult::Consumed;
        }

        if self.explorer.contains(x, y) {
            self.active_area = ActiveArea::Explorer;
            let action = {
                let Some(tree) = &mut self.tree else {
                    return EventResult::Consumed;
                };
                let rows = tree.flatten_for_view();
                let Some(index) = self.explorer.hit_test_row(y, &rows) else {
                    return EventResult::Consumed;
                };
                tree.set_selected(Some(rows[index].id));
                Self::explorer_action(tree, &rows[index])
            };
            self.run_explorer_action(action);
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn handle_scroll(&mut self, x: u16, y: u16, delta: isize) -> EventResult {
        if self.explorer.contains(x, y) {
            if let Some(tree) = &self.tree {
                let count = tree.flatten_for_view().len();
                self.explorer.scroll_by(delta * self.config.scroll_lines as isize, count);
            }
            return EventResult::Consumed;
        }
        if let Some(doc) = self.session.active_document_mut() {
            self.editor.handle_scroll(delta, doc, &self.config);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn paste(&mut self, text: &str) {
        let Some(active) = self.session.active_index() else {
            return;
        };
        if let Some(doc) = self.session.get_mut(active) {
            doc.buffer_mut().insert_str(text);
            let row = doc.buffer().cursor().0;
            doc.viewport.follow(row);
        }
        self.session.notify_content_changed(active);
        self.minimap.schedule_update(Instant::now());
    }

    /// Switch to a built-in palette, then overlay `<theme_dir>/<name>.json`
    /// when present.
    fn switch_theme(&mut self, name: &str) {
        self.theme.switch_builtin(name);
        self.theme.load_from_dir(&self.config.theme_dir, name);
        self.status = Some(format!("Theme: {}", self.theme.name()));
    }

    fn save_active(&mut self) {
        let Some(active) = self.session.active_index() else {
            return;
        };
        let Some(doc) = self.session.get(active) else {
            return;
        };
        let Some(path) = doc.path().map(Path::to_path_buf) else {
            self.status = Some("Cannot save: tab has no file".to_string());
            return;
        };

        let content = doc.buffer().text();
        match self.files.write_file(&path, &content) {
            Ok(()) => {
                self.session.mark_saved(active, &content);
                self.status = Some(format!("Saved {}", path.display()));
                tracing::info!(path = %path.display(), "saved file");
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "save failed");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Deliver the periodic tick; fires any due minimap rebuild.
    pub fn tick(&mut self, now: Instant) {
        self.minimap.tick(self.session.active_document(), now);
    }

    pub fn window_title(&self) -> String {
        match self.session.active_document() {
            Some(doc) => {
                let marker = if doc.is_dirty() { "● " } else { "" };
                format!("{marker}{} - Volt", doc.resolved_title())
            }
            None => "Volt".to_string(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, vertical[0]);

        let show_sidebar = self.sidebar_visible && self.tree.is_some();
        let sidebar_percent = self.sidebar_percent();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(if show_sidebar {
                vec![
                    Constraint::Percentage(sidebar_percent),
                    Constraint::Percentage(100 - sidebar_percent),
                ]
            } else {
                vec![Constraint::Percentage(100)]
            })
            .split(vertical[1]);

        if show_sidebar {
            if let Some(tree) = &self.tree {
                let rows = tree.flatten_for_view();
                self.explorer.render(frame, columns[0], tree, &rows, &self.theme);
            }
        }

        let editor_column = *columns.last().unwrap_or(&vertical[1]);
        let editor_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(editor_column);

        self.tabs.render(frame, editor_rows[0], &self.theme);

        let minimap_width = self.minimap_width();
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(minimap_width)])
            .split(editor_rows[1]);

        if let Some(active) = self.session.active_index() {
            if let Some(doc) = self.session.get_mut(active) {
                self.editor.render(frame, panes[0], doc, &self.theme, &self.config);
            }
        } else {
            let bg = self.theme.get_color("editor.background", Color::Reset);
            frame.render_widget(Paragraph::new("").style(Style::default().bg(bg)), panes[0]);
        }

        self.minimap
            .render(frame, panes[1], self.session.active_document(), &self.theme);

        self.render_status(frame, vertical[2]);

        if self.active_area == ActiveArea::Editor {
            if let Some(doc) = self.session.active_document() {
                if let Some(pos) = self.editor.cursor_position(doc, &self.config) {
                    frame.set_cursor_position(pos);
                }
            }
        }
    }

    /// Theme dimensions feed layout constraints, so out-of-range values
    /// from a theme file are clamped rather than trusted.
    fn sidebar_percent(&self) -> u16 {
        self.theme
            .get_dimension("sidebar.widthPercent", self.config.sidebar_width_percent as i64)
            .clamp(5, 80) as u16
    }

    fn minimap_width(&self) -> u16 {
        self.theme
            .get_dimension("minimap.width", self.config.minimap_width as i64)
            .clamp(4, 60) as u16
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let fg = self.theme.get_color("header.foreground", Color::Cyan);
        let bg = self.theme.get_color("sidebar.background", Color::Reset);
        let line = Line::from(Span::styled(
            format!(" {}", self.window_title()),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let fg = self.theme.get_color("statusbar.foreground", Color::Gray);
        let bg = self.theme.get_color("sidebar.background", Color::Reset);

        let text = if let Some(status) = &self.status {
            status.clone()
        } else if let Some(path) = self.tabs.hovered_path() {
            path.display().to_string()
        } else if let Some(doc) = self.session.active_document() {
            let (row, col) = doc.buffer().cursor();
            let location = doc
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| doc.label().to_string());
            format!("{location}  {}:{}", row + 1, col + 1)
        } else {
            String::new()
        };

        let line = Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(fg).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        Workbench::handle_input(self, event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        Workbench::render(self, frame, area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        if self.active_area != ActiveArea::Editor {
            return None;
        }
        let doc = self.session.active_document()?;
        self.editor.cursor_position(doc, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use std::fs;
    use tempfile::tempdir;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_starts_with_welcome_tab() {
        let workbench = Workbench::new(EditorConfig::default());
        assert_eq!(workbench.session().len(), 1);
        assert_eq!(workbench.session().active_index(), Some(0));
        assert!(!workbench.session().get(0).unwrap().is_dirty());
        assert_eq!(workbench.tabs.entries()[0].label, "Welcome");
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut workbench = Workbench::new(EditorConfig::default());
        let result = workbench.handle_input(&key(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(result.is_quit());
    }

    #[test]
    fn test_typing_marks_tab_modified() {
        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.handle_input(&key(KeyCode::Char('x'), KeyModifiers::NONE));

        assert!(workbench.session().get(0).unwrap().is_dirty());
        assert!(workbench.tabs.entries()[0].modified);
    }

    #[test]
    fn test_open_and_save_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "one").unwrap();

        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.open_file(&path);
        assert_eq!(workbench.session().len(), 2);
        assert_eq!(workbench.session().active_index(), Some(1));

        workbench.handle_input(&key(KeyCode::Char('!'), KeyModifiers::NONE));
        assert!(workbench.tabs.entries()[1].modified);

        workbench.handle_input(&key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!workbench.session().get(1).unwrap().is_dirty());
        assert!(!workbench.tabs.entries()[1].modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), "!one");
    }

    #[test]
    fn test_open_missing_file_sets_status() {
        let dir = tempdir().unwrap();
        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.open_file(&dir.path().join("missing.txt"));

        assert_eq!(workbench.session().len(), 1);
        assert!(workbench.status.as_deref().unwrap().contains("Not found"));
    }

    #[test]
    fn test_close_falls_back_to_left_neighbor() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.open_file(&a);
        workbench.open_file(&b);
        assert_eq!(workbench.session().active_index(), Some(2));

        workbench.handle_input(&key(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(workbench.session().len(), 2);
        assert_eq!(workbench.session().active_index(), Some(1));
        assert_eq!(workbench.tabs.active(), Some(1));
        assert_eq!(workbench.tabs.entries().len(), 2);
    }

    #[test]
    fn test_save_untitled_reports_status() {
        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.handle_input(&key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(workbench.status.as_deref().unwrap().contains("no file"));
    }

    #[test]
    fn test_alt_arrows_reorder_tabs() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "a").unwrap();

        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.open_file(&a);
        assert_eq!(workbench.tabs.entries()[1].label, "a.txt");

        workbench.handle_input(&key(KeyCode::Left, KeyModifiers::ALT));
        assert_eq!(workbench.tabs.entries()[0].label, "a.txt");
        assert_eq!(workbench.session().active_index(), Some(0));
        assert_eq!(workbench.session().get(0).unwrap().label(), "a.txt");
    }

    #[test]
    fn test_alt_o_closes_other_tabs() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.open_file(&a);
        workbench.open_file(&b);

        workbench.handle_input(&key(KeyCode::Char('o'), KeyModifiers::ALT));
        assert_eq!(workbench.session().len(), 1);
        assert_eq!(workbench.session().get(0).unwrap().label(), "b.txt");
        assert_eq!(workbench.tabs.entries().len(), 1);
        assert_eq!(workbench.tabs.active(), Some(0));
    }

    #[test]
    fn test_theme_toggle() {
        let mut workbench = Workbench::new(EditorConfig::default());
        let before = workbench.theme.generation();
        workbench.handle_input(&key(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(workbench.theme.name(), "light");
        assert!(workbench.theme.generation() > before);
    }

    #[test]
    fn test_theme_switch_applies_json_overlay() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("light.json"),
            r##"{"colors": {"editor.background": "#101010"}}"##,
        )
        .unwrap();

        let mut config = EditorConfig::default();
        config.theme_dir = dir.path().to_path_buf();
        let mut workbench = Workbench::new(config);

        workbench.handle_input(&key(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(workbench.theme.name(), "light");
        assert_eq!(
            workbench.theme.get_color("editor.background", Color::Reset),
            Color::Rgb(0x10, 0x10, 0x10)
        );

        // Toggling back to a theme with no file restores the built-in.
        workbench.handle_input(&key(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(workbench.theme.name(), "dark");
        assert_eq!(
            workbench.theme.get_color("editor.background", Color::Reset),
            Color::Rgb(0x1e, 0x1e, 0x1e)
        );
    }

    #[test]
    fn test_layout_dimensions_are_clamped() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("dark.json"),
            r##"{"dimensions": {"sidebar.widthPercent": 500, "minimap.width": -3}}"##,
        )
        .unwrap();

        let mut config = EditorConfig::default();
        config.theme_dir = dir.path().to_path_buf();
        let mut workbench = Workbench::new(config);
        assert_eq!(workbench.sidebar_percent(), 20);
        assert_eq!(workbench.minimap_width(), 20);

        workbench.switch_theme("dark");
        assert_eq!(workbench.sidebar_percent(), 80);
        assert_eq!(workbench.minimap_width(), 4);
    }

    #[test]
    fn test_window_title_tracks_active_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "n").unwrap();

        let mut workbench = Workbench::new(EditorConfig::default());
        assert_eq!(workbench.window_title(), "Welcome - Volt");

        workbench.open_file(&path);
        assert_eq!(workbench.window_title(), "notes.txt - Volt");

        workbench.handle_input(&key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(workbench.window_title(), "● notes.txt - Volt");
    }

    #[test]
    fn test_explorer_enter_opens_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        let mut workbench = Workbench::new(EditorConfig::default());
        workbench.open_folder(dir.path());
        workbench.active_area = ActiveArea::Explorer;

        workbench.handle_input(&key(KeyCode::Down, KeyModifiers::NONE));
        workbench.handle_input(&key(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(workbench.session().len(), 2);
        assert_eq!(workbench.active_area, ActiveArea::Editor);
        assert_eq!(workbench.session().active_document().unwrap().label(), "main.rs");
    }

    #[test]
    fn test_tick_regenerates_minimap_after_debounce() {
        let mut workbench = Workbench::new(EditorConfig::default());
        let now = Instant::now();

        workbench.handle_input(&key(KeyCode::Char('z'), KeyModifiers::NONE));
        workbench.tick(now + std::time::Duration::from_millis(200));
        // No assertion beyond not panicking without a rendered area.
    }
}
