pub mod buffer;
pub mod document;
pub mod file_tree;
pub mod session;
pub mod viewport;

pub use buffer::{RopeBuffer, TextBuffer};
pub use document::DocumentHandle;
pub use file_tree::{build_file_tree, FileTree, FileTreeRow, LoadState, NodeId, NodeKind};
pub use session::{SessionEvent, SessionRegistry};
pub use viewport::Viewport;
