//! File service: synchronous reads and writes with a small error
//! taxonomy the session model can surface to the user.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    Io(io::Error),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::PermissionDenied(p) => write!(f, "Permission denied: {}", p.display()),
            FileError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

fn classify(e: io::Error, path: &Path) -> FileError {
    match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
        _ => FileError::Io(e),
    }
}

pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        Self
    }

    /// Read a regular file to a string. Directories and other
    /// non-regular paths count as not found.
    pub fn read_file(&self, path: &Path) -> Result<String> {
        let meta = std::fs::metadata(path).map_err(|e| classify(e, path))?;
        if !meta.is_file() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        std::fs::read_to_string(path).map_err(|e| classify(e, path))
    }

    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|e| classify(e, path))
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}
