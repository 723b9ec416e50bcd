pub mod editor;
pub mod explorer;

pub use editor::{EditorView, MinimapView, TabStrip};
pub use explorer::ExplorerView;
