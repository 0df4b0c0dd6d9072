//! Read side: sources and the ordered search path over them.

use crate::error::{MetadataError, Result};
use crate::resource::Location;
use crate::spec::Codec;

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// A packaged source of descriptors. The variant is fixed when the source is
/// created and never re-inspected per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl Source {
    /// Directories become directory sources, regular files archive sources.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let meta = fs::metadata(&path).map_err(|e| MetadataError::io(path.display(), e))?;
        if meta.is_dir() {
            Ok(Source::Directory(path))
        } else {
            Ok(Source::Archive(path))
        }
    }

    /// Location of `rel_path` in this source, if the source has it.
    pub fn locate(&self, rel_path: &str) -> Result<Option<Location>> {
        match self {
            Source::Directory(root) => {
                let full = root.join(rel_path);
                match fs::metadata(&full) {
                    Ok(meta) if meta.is_file() => Ok(Some(Location::Directory {
                        root: root.clone(),
                        path: rel_path.to_string(),
                    })),
                    Ok(_) => Ok(None),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(MetadataError::io(full.display(), e)),
                }
            }
            Source::Archive(archive) => {
                let zip = open_archive(archive)?;
                Ok(zip.index_for_name(rel_path).map(|_| Location::Archive {
                    archive: archive.clone(),
                    entry: rel_path.to_string(),
                }))
            }
        }
    }

    /// Visit every descriptor this source exposes, in a stable order.
    ///
    /// Directory sources list the immediate children of the specifications
    /// directory. Archive sources scan all entries and keep those whose path is
    /// a descriptor path.
    pub fn for_each_descriptor<F>(&self, codec: &Codec, mut visit: F) -> Result<()>
    where
        F: FnMut(Location, Vec<u8>) -> Result<()>,
    {
        let layout = codec.layout();
        let rules = codec.rules();
        match self {
            Source::Directory(root) => {
                let dir = root.join(layout.directory());
                match fs::metadata(&dir) {
                    Ok(meta) if meta.is_dir() => {}
                    Ok(_) => return Ok(()),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
                    Err(e) => return Err(MetadataError::io(dir.display(), e)),
                }
                let mut files: Vec<String> = Vec::new();
                let listing = fs::read_dir(&dir).map_err(|e| MetadataError::io(dir.display(), e))?;
                for entry in listing {
                    let entry = entry.map_err(|e| MetadataError::io(dir.display(), e))?;
                    let file_name = entry.file_name().to_string_lossy().into_owned();
                    if !layout.is_spec_file_name(rules, &file_name) {
                        continue;
                    }
                    let is_file = entry
                        .file_type()
                        .map_err(|e| MetadataError::io(entry.path().display(), e))?
                        .is_file();
                    if is_file {
                        files.push(file_name);
                    }
                }
                files.sort();

                for file_name in files {
                    let location = Location::Directory {
                        root: root.clone(),
                        path: format!("{}/{}", layout.directory(), file_name),
                    };
                    let bytes = read_location(&location)?;
                    visit(location, bytes)?;
                }
                Ok(())
            }
            Source::Archive(archive) => {
                let mut zip = open_archive(archive)?;
                for i in 0..zip.len() {
                    let (entry, bytes) = {
                        let mut file = zip
                            .by_index(i)
                            .map_err(|e| MetadataError::archive(archive.display(), e))?;
                        if file.is_dir() || !layout.is_spec_path(rules, file.name()) {
                            continue;
                        }
                        let entry = file.name().to_string();
                        let mut bytes = Vec::new();
                        file.read_to_end(&mut bytes).map_err(|e| {
                            MetadataError::io(format!("{}!/{}", archive.display(), entry), e)
                        })?;
                        (entry, bytes)
                    };
                    visit(
                        Location::Archive {
                            archive: archive.clone(),
                            entry,
                        },
                        bytes,
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Ordered collection of sources searched for a given resource path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    sources: Vec<Source>,
}

impl SearchPath {
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Build from filesystem paths, classifying each one once.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let sources = paths
            .into_iter()
            .map(Source::from_path)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Every location exposing `rel_path`, in search path order.
    pub fn locate(&self, rel_path: &str) -> Result<Vec<Location>> {
        let mut found = Vec::new();
        for source in &self.sources {
            if let Some(location) = source.locate(rel_path)? {
                found.push(location);
            }
        }
        debug!(path = rel_path, count = found.len(), "located resource");
        Ok(found)
    }

    pub fn read(&self, location: &Location) -> Result<Vec<u8>> {
        read_location(location)
    }
}

/// Read the full contents of one location.
pub fn read_location(location: &Location) -> Result<Vec<u8>> {
    match location {
        Location::Directory { root, path } => {
            fs::read(root.join(path)).map_err(|e| MetadataError::io(location, e))
        }
        Location::Archive { archive, entry } => {
            let mut zip = open_archive(archive)?;
            let mut file = zip
                .by_name(entry)
                .map_err(|e| MetadataError::archive(location, e))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| MetadataError::io(location, e))?;
            Ok(bytes)
        }
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path).map_err(|e| MetadataError::io(path.display(), e))?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| MetadataError::archive(path.display(), e))
}
