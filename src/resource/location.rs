//! Location of a single descriptor inside a source.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// A file at `path` (relative, `/`-separated) under a directory root.
    Directory { root: PathBuf, path: String },
    /// An entry inside a zip archive.
    Archive { archive: PathBuf, entry: String },
}

impl Location {
    /// Directory root or archive file this location belongs to.
    pub fn source_path(&self) -> &Path {
        match self {
            Location::Directory { root, .. } => root,
            Location::Archive { archive, .. } => archive,
        }
    }

    /// Relative resource path inside the source.
    pub fn resource_path(&self) -> &str {
        match self {
            Location::Directory { path, .. } => path,
            Location::Archive { entry, .. } => entry,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Directory { root, path } => {
                write!(f, "file:{}/{}", root.display(), path)
            }
            Location::Archive { archive, entry } => {
                write!(f, "jar:file:{}!/{}", archive.display(), entry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_mirrors_url_style() {
        let dir = Location::Directory {
            root: PathBuf::from("/work/classes"),
            path: "metadata/specs/a.json".to_string(),
        };
        let jar = Location::Archive {
            archive: PathBuf::from("/libs/core.zip"),
            entry: "metadata/specs/a.json".to_string(),
        };
        assert_eq!(dir.to_string(), "file:/work/classes/metadata/specs/a.json");
        assert_eq!(jar.to_string(), "jar:file:/libs/core.zip!/metadata/specs/a.json");
        assert_eq!(jar.source_path(), Path::new("/libs/core.zip"));
        assert_eq!(dir.resource_path(), "metadata/specs/a.json");
    }
}
