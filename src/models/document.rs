//! Document handle: identity and state for one open file.

use super::buffer::{RopeBuffer, TextBuffer};
use super::viewport::Viewport;
use std::path::{Path, PathBuf};

pub struct DocumentHandle {
    path: Option<PathBuf>,
    label: String,
    buffer: Box<dyn TextBuffer>,
    last_saved_content: String,
    dirty: bool,
    loading_suppressed: bool,
    pub viewport: Viewport,
}

impl DocumentHandle {
    /// Handle for a file on disk. The buffer starts empty; the caller
    /// populates it under loading suppression and then marks it saved.
    pub fn for_file(path: PathBuf) -> Self {
        let label = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());

        Self {
            path: Some(path),
            label,
            buffer: Box::new(RopeBuffer::new()),
            last_saved_content: String::new(),
            dirty: false,
            loading_suppressed: false,
            viewport: Viewport::default(),
        }
    }

    /// Unsaved document. The initial content is the saved baseline, so a
    /// freshly created Welcome tab is not considered a pending change.
    pub fn untitled(label: &str, initial_content: &str) -> Self {
        Self {
            path: None,
            label: label.to_string(),
            buffer: Box::new(RopeBuffer::from_text(initial_content)),
            last_saved_content: initial_content.to_string(),
            dirty: false,
            loading_suppressed: false,
            viewport: Viewport::default(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Title for the window header: the filename while the file still
    /// exists on disk, otherwise the stored tab label.
    pub fn resolved_title(&self) -> String {
        if let Some(p) = &self.path {
            if p.is_file() {
                if let Some(name) = p.file_name() {
                    return name.to_string_lossy().to_string();
                }
            }
        }
        self.label.clone()
    }

    pub fn buffer(&self) -> &dyn TextBuffer {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> &mut dyn TextBuffer {
        self.buffer.as_mut()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loading_suppressed(&self) -> bool {
        self.loading_suppressed
    }

    pub fn set_loading_suppressed(&mut self, suppressed: bool) {
        self.loading_suppressed = suppressed;
    }

    pub fn last_saved_content(&self) -> &str {
        &self.last_saved_content
    }

    /// Recompute the dirty flag against the saved baseline. Returns the
    /// new value only when it flipped; None while loading is suppressed
    /// or the flag is unchanged.
    pub fn refresh_dirty(&mut self) -> Option<bool> {
        if self.loading_suppressed {
            return None;
        }
        let dirty = self.buffer.text() != self.last_saved_content;
        if dirty != self.dirty {
            self.dirty = dirty;
            Some(dirty)
        } else {
            None
        }
    }

    /// Record a successful save. Returns true when the dirty flag flipped.
    pub fn mark_saved(&mut self, content: &str) -> bool {
        self.last_saved_content = content.to_string();
        let flipped = self.dirty;
        self.dirty = false;
        flipped
    }
}
