//! volt - terminal source-code editor shell
//!
//! Module structure:
//! - core: framework (InputEvent, View, EventResult)
//! - models: data model (TextBuffer, DocumentHandle, SessionRegistry, FileTree)
//! - services: service layer (FileService, ThemeProvider, EditorConfig)
//! - views: view layer (EditorView, TabStrip, MinimapView, ExplorerView)
//! - app: application layer (Workbench)

pub mod app;
pub mod core;
pub mod logging;
pub mod models;
pub mod services;
pub mod views;
