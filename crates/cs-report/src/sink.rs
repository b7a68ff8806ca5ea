//! Output sinks for the finished document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::{ReportError, Result};

/// Destination for a finished report.
pub trait ReportSink: Send + Sync + std::fmt::Debug {
    /// Persist `document` at `path`.
    fn write(&self, path: &Path, document: &str) -> Result<()>;
}

/// Writes to the filesystem, creating parent directories as needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl ReportSink for FileSink {
    fn write(&self, path: &Path, document: &str) -> Result<()> {
        let to_err = |source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_err)?;
        }
        fs::write(path, document).map_err(to_err)?;
        debug!(path = %path.display(), bytes = document.len(), "Report written");
        Ok(())
    }
}

/// Keeps written documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    written: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(path, document)` written so far, in order.
    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent document, if any.
    pub fn last(&self) -> Option<String> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|(_, doc)| doc.clone())
    }
}

impl ReportSink for MemorySink {
    fn write(&self, path: &Path, document: &str) -> Result<()> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.to_path_buf(), document.to_string()));
        Ok(())
    }
}
