//! Session registry: the single source of truth for which files are
//! open and which one is active.
//!
//! State changes are published on an ordered event queue instead of
//! direct callbacks; the workbench drains the queue once per loop
//! iteration and forwards each event to the tab strip and minimap.

use super::buffer::TextBuffer;
use super::document::DocumentHandle;
use crate::services::file::{FileService, Result as FileResult};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Opened {
        index: usize,
        label: String,
        path: Option<PathBuf>,
    },
    Closed {
        index: usize,
    },
    Activated {
        index: Option<usize>,
    },
    Reordered {
        from: usize,
        to: usize,
    },
    ModificationChanged {
        index: usize,
        dirty: bool,
    },
    Saved {
        index: usize,
    },
}

pub struct SessionRegistry {
    documents: Vec<DocumentHandle>,
    active_index: Option<usize>,
    events: VecDeque<SessionEvent>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active_index: None,
            events: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentHandle> {
        self.documents.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DocumentHandle> {
        self.documents.get_mut(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_document(&self) -> Option<&DocumentHandle> {
        self.active_index.and_then(|i| self.documents.get(i))
    }

    pub fn active_document_mut(&mut self) -> Option<&mut DocumentHandle> {
        match self.active_index {
            Some(i) => self.documents.get_mut(i),
            None => None,
        }
    }

    /// Open a file, idempotent by exact path: a second open of the same
    /// path activates the existing tab instead of creating a duplicate.
    pub fn open_file(&mut self, files: &FileService, path: &Path) -> FileResult<usize> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(existing) = self.find_by_path(&path) {
            self.activate(existing);
            return Ok(existing);
        }

        let content = files.read_file(&path)?;

        let mut doc = DocumentHandle::for_file(path.clone());
        doc.set_loading_suppressed(true);
        doc.buffer_mut().set_text(&content);
        doc.set_loading_suppressed(false);
        doc.mark_saved(&content);

        let index = self.documents.len();
        self.events.push_back(SessionEvent::Opened {
            index,
            label: doc.label().to_string(),
            path: Some(path.clone()),
        });
        self.documents.push(doc);
        self.activate(index);

        tracing::info!(path = %path.display(), index, "opened file");
        Ok(index)
    }

    /// Open an unsaved document; the initial content is the saved baseline.
    pub fn open_untitled(&mut self, label: &str, initial_content: &str) -> usize {
        let doc = DocumentHandle::untitled(label, initial_content);
        let index = self.documents.len();
        self.events.push_back(SessionEvent::Opened {
            index,
            label: doc.label().to_string(),
            path: None,
        });
        self.documents.push(doc);
        self.activate(index);
        index
    }

    pub fn activate(&mut self, index: usize) {
        if index < self.documents.len() && self.active_index != Some(index) {
            self.active_index = Some(index);
            self.events
                .push_back(SessionEvent::Activated { index: Some(index) });
        }
    }

    /// Close the document at `index`. Out-of-range indices are a silent
    /// no-op. When the active tab closes, its left neighbor takes over.
    pub fn close(&mut self, index: usize) {
        if index >= self.documents.len() {
            return;
        }

        let doc = self.documents.remove(index);
        if doc.is_dirty() {
            tracing::warn!(label = doc.label(), "discarding unsaved changes on close");
        }
        self.events.push_back(SessionEvent::Closed { index });

        let remaining = self.documents.len();
        match self.active_index {
            Some(a) if a == index => {
                let next = if remaining == 0 {
                    None
                } else {
                    Some(index.saturating_sub(1).min(remaining - 1))
                };
                self.active_index = next;
                self.events.push_back(SessionEvent::Activated { index: next });
            }
            Some(a) if a > index => {
                // Same document stays focused, only its index shifted.
                self.active_index = Some(a - 1);
            }
            _ => {}
        }
    }

    /// Close every tab except `keep`. The target set is snapshotted up
    /// front and removed highest index first, so earlier removals never
    /// invalidate later targets.
    pub fn close_others(&mut self, keep: usize) {
        if keep >= self.documents.len() {
            return;
        }
        let targets: Vec<usize> = (0..self.documents.len())
            .filter(|&i| i != keep)
            .rev()
            .collect();
        for index in targets {
            self.close(index);
        }
        self.activate(0);
    }

    /// Close every tab to the right of `index`, highest first.
    pub fn close_right_of(&mut self, index: usize) {
        let targets: Vec<usize> = (index + 1..self.documents.len()).rev().collect();
        for i in targets {
            self.close(i);
        }
    }

    /// Exact-path lookup. Unsaved documents never match.
    pub fn find_by_path(&self, path: &Path) -> Option<usize> {
        self.documents.iter().position(|d| d.path() == Some(path))
    }

    pub fn mark_saved(&mut self, index: usize, content: &str) {
        if let Some(doc) = self.documents.get_mut(index) {
            if doc.mark_saved(content) {
                self.events.push_back(SessionEvent::ModificationChanged {
                    index,
                    dirty: false,
                });
            }
            self.events.push_back(SessionEvent::Saved { index });
        }
    }

    /// Recompute the dirty flag for one document and publish a
    /// modification-changed event only when the value flips. No-op
    /// while the handle is loading-suppressed.
    pub fn notify_content_changed(&mut self, index: usize) {
        if let Some(doc) = self.documents.get_mut(index) {
            if let Some(dirty) = doc.refresh_dirty() {
                self.events
                    .push_back(SessionEvent::ModificationChanged { index, dirty });
            }
        }
    }

    /// Drag-reorder: a pure permutation of the sequence. Handle identity,
    /// content and dirty state survive; the active index follows.
    pub fn move_document(&mut self, from: usize, to: usize) {
        let len = self.documents.len();
        if from >= len || to >= len || from == to {
            return;
        }

        let doc = self.documents.remove(from);
        self.documents.insert(to, doc);

        self.active_index = self.active_index.map(|a| {
            if a == from {
                to
            } else if from < a && a <= to {
                a - 1
            } else if to <= a && a < from {
                a + 1
            } else {
                a
            }
        });

        self.events.push_back(SessionEvent::Reordered { from, to });
    }

    pub fn next_tab(&mut self) {
        if let Some(a) = self.active_index {
            if !self.documents.is_empty() {
                self.activate((a + 1) % self.documents.len());
            }
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(a) = self.active_index {
            if !self.documents.is_empty() {
                let len = self.documents.len();
                self.activate((a + len - 1) % len);
            }
        }
    }

    /// Drain pending events in emission order.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn mods(events: &[SessionEvent]) -> Vec<(usize, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::ModificationChanged { index, dirty } => Some((*index, *dirty)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_open_file_is_idempotent_by_path() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "a.txt", "hello");
        let files = FileService::new();
        let mut session = SessionRegistry::new();

        let first = session.open_file(&files, &path).unwrap();
        session.open_untitled("Untitled", "");
        let second = session.open_file(&files, &path).unwrap();

        assert_eq!(first, second);
        assert_eq!(session.len(), 2);
        assert_eq!(session.active_index(), Some(first));

        let canonical = path.canonicalize().unwrap();
        let matching = session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Opened { path: Some(p), .. } if *p == canonical))
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempdir().unwrap();
        let files = FileService::new();
        let mut session = SessionRegistry::new();

        let result = session.open_file(&files, &dir.path().join("missing.txt"));
        assert!(result.is_err());
        assert!(session.is_empty());
    }

    #[test]
    fn test_open_starts_clean() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "a.txt", "hello");
        let files = FileService::new();
        let mut session = SessionRegistry::new();

        let index = session.open_file(&files, &path).unwrap();
        let doc = session.get(index).unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(doc.last_saved_content(), "hello");
        assert_eq!(doc.buffer().text(), "hello");
    }

    #[test]
    fn test_close_activates_left_neighbor() {
        let mut session = SessionRegistry::new();
        session.open_untitled("a", "");
        session.open_untitled("b", "");
        session.open_untitled("c", "");
        assert_eq!(session.active_index(), Some(2));

        session.close(2);
        assert_eq!(session.active_index(), Some(1));
        assert_eq!(session.len(), 2);

        session.close(0);
        assert_eq!(session.active_index(), Some(0));
        assert_eq!(session.get(0).unwrap().label(), "b");
    }

    #[test]
    fn test_close_last_tab_clears_selection() {
        let mut session = SessionRegistry::new();
        session.open_untitled("a", "");
        session.close(0);
        assert_eq!(session.active_index(), None);
        assert!(session.is_empty());
    }

    #[test]
    fn test_close_out_of_range_is_noop() {
        let mut session = SessionRegistry::new();
        session.open_untitled("a", "");
        session.close(5);
        assert_eq!(session.len(), 1);
        assert_eq!(session.active_index(), Some(0));
    }

    #[test]
    fn test_close_others_keeps_one() {
        for keep in 0..4 {
            let mut session = SessionRegistry::new();
            for name in ["a", "b", "c", "d"] {
                session.open_untitled(name, "");
            }
            let kept_label = session.get(keep).unwrap().label().to_string();

            session.close_others(keep);
            assert_eq!(session.len(), 1);
            assert_eq!(session.get(0).unwrap().label(), kept_label);
            assert_eq!(session.active_index(), Some(0));
        }
    }

    #[test]
    fn test_close_right_of() {
        let mut session = SessionRegistry::new();
        for name in ["a", "b", "c", "d"] {
            session.open_untitled(name, "");
        }
        session.activate(1);
        session.close_right_of(1);

        assert_eq!(session.len(), 2);
        assert_eq!(session.get(0).unwrap().label(), "a");
        assert_eq!(session.get(1).unwrap().label(), "b");
        assert_eq!(session.active_index(), Some(1));
    }

    #[test]
    fn test_modification_event_fires_once_per_flip() {
        let mut session = SessionRegistry::new();
        let index = session.open_untitled("Untitled", "");
        session.drain_events();

        session.get_mut(index).unwrap().buffer_mut().insert_char('x');
        session.notify_content_changed(index);
        session.notify_content_changed(index);
        assert_eq!(mods(&session.drain_events()), vec![(index, true)]);

        session.get_mut(index).unwrap().buffer_mut().delete_backward();
        session.notify_content_changed(index);
        assert_eq!(mods(&session.drain_events()), vec![(index, false)]);
    }

    #[test]
    fn test_mark_saved_idempotent() {
        let mut session = SessionRegistry::new();
        let index = session.open_untitled("Untitled", "");
        session.get_mut(index).unwrap().buffer_mut().insert_char('x');
        session.notify_content_changed(index);
        session.drain_events();

        session.mark_saved(index, "x");
        assert_eq!(mods(&session.drain_events()), vec![(index, false)]);

        session.mark_saved(index, "x");
        assert_eq!(mods(&session.drain_events()), vec![]);
        assert!(!session.get(index).unwrap().is_dirty());
    }

    #[test]
    fn test_move_document_preserves_state() {
        let mut session = SessionRegistry::new();
        for name in ["a", "b", "c"] {
            session.open_untitled(name, "");
        }
        session.get_mut(0).unwrap().buffer_mut().insert_char('!');
        session.notify_content_changed(0);
        session.activate(0);
        session.drain_events();

        session.move_document(0, 2);
        assert_eq!(session.get(2).unwrap().label(), "a");
        assert!(session.get(2).unwrap().is_dirty());
        assert_eq!(session.get(2).unwrap().buffer().text(), "!");
        assert_eq!(session.active_index(), Some(2));
    }

    #[test]
    fn test_full_edit_save_scenario() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "main.cpp", "int main() {}\n");
        let files = FileService::new();
        let mut session = SessionRegistry::new();
        session.open_untitled("Welcome", "welcome");
        let before = session.len();
        session.drain_events();

        let index = session.open_file(&files, &path).unwrap();
        assert_eq!(session.len(), before + 1);
        assert_eq!(session.active_index(), Some(index));
        assert!(!session.get(index).unwrap().is_dirty());

        let doc = session.get_mut(index).unwrap();
        doc.buffer_mut().set_cursor(0, 0);
        doc.buffer_mut().insert_char('/');
        session.notify_content_changed(index);

        let doc = session.get_mut(index).unwrap();
        doc.buffer_mut().delete_backward();
        session.notify_content_changed(index);

        let events = session.drain_events();
        assert_eq!(mods(&events), vec![(index, true), (index, false)]);

        let content = session.get(index).unwrap().buffer().text();
        session.mark_saved(index, &content);
        let doc = session.get(index).unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(doc.last_saved_content(), "int main() {}\n");
    }
}
