use std::path::{Path, PathBuf};

use crate::persist::{AtomicFileWriter, PersistError};

/// Destination for finished exports ("save as file").
pub trait SaveSink: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError>;
}

/// Saves exports into one directory, replacing earlier files of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    writer: AtomicFileWriter,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }
}

impl SaveSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        self.writer.write(filename, bytes)
    }
}
