//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::io::{self, Read};
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Standard input abstraction.
pub trait InputReader: Send + Sync {
    /// Read stdin to end.
    fn read_stdin(&self) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Reads the process stdin.
#[derive(Debug, Default)]
pub struct RealInputReader;

impl InputReader for RealInputReader {
    fn read_stdin(&self) -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    }
}

/// Fixed stdin content, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct StaticInputReader {
    content: String,
}

impl StaticInputReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl InputReader for StaticInputReader {
    fn read_stdin(&self) -> io::Result<String> {
        Ok(self.content.clone())
    }
}
