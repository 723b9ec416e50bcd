pub mod editor_view;
pub mod minimap;
pub mod tab_row;
pub mod tab_strip;

pub use editor_view::EditorView;
pub use minimap::MinimapView;
pub use tab_strip::{TabEntry, TabHit, TabStrip};
