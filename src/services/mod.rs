pub mod config;
pub mod file;
pub mod theme;

pub use config::EditorConfig;
pub use file::{FileError, FileService};
pub use theme::ThemeProvider;
