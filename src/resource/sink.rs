//! Write side: directories and archives receiving descriptors.

use crate::error::{MetadataError, Result};

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Write target for descriptors.
pub trait Sink {
    /// Open a stream for `path` (relative, `/`-separated). The stream is
    /// released when the returned writer is dropped.
    fn open(&mut self, path: &str) -> Result<Box<dyn Write + '_>>;

    /// Human readable name used in error messages.
    fn describe(&self, path: &str) -> String;
}

/// Writes each entry as a file under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory every entry path is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Sink for DirectorySink {
    fn open(&mut self, path: &str) -> Result<Box<dyn Write + '_>> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| MetadataError::io(parent.display(), e))?;
        }
        let file = File::create(&full).map_err(|e| MetadataError::io(full.display(), e))?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn describe(&self, path: &str) -> String {
        format!("file:{}/{}", self.root().display(), path)
    }
}

/// Writes entries into a zip archive under construction.
pub struct ArchiveSink<W: Write + Seek> {
    zip: ZipWriter<W>,
    label: String,
}

impl ArchiveSink<File> {
    /// Create (or truncate) an archive file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| MetadataError::io(path.display(), e))?;
        Ok(Self::new(file, path.display().to_string()))
    }
}

impl<W: Write + Seek> ArchiveSink<W> {
    pub fn new(writer: W, label: impl Into<String>) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            label: label.into(),
        }
    }

    /// Write the central directory and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        let label = self.label;
        self.zip
            .finish()
            .map_err(|e| MetadataError::archive(label, e))
    }
}

impl<W: Write + Seek> Sink for ArchiveSink<W> {
    fn open(&mut self, path: &str) -> Result<Box<dyn Write + '_>> {
        self.zip
            .start_file(path, SimpleFileOptions::default())
            .map_err(|e| MetadataError::archive(format!("{}!/{}", self.label, path), e))?;
        Ok(Box::new(&mut self.zip))
    }

    fn describe(&self, path: &str) -> String {
        format!("jar:file:{}!/{}", self.label, path)
    }
}
