//! Error taxonomy for specification handling.
//!
//! Every failure carries typed fields so callers can inspect what went wrong
//! without parsing messages. The closure resolver wraps its underlying failure
//! in [`MetadataError::Resolution`] together with how far it got.

use crate::resource::Location;
use crate::spec::Specification;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetadataError>;

/// Appended to every closure resolution failure.
pub const RESOLUTION_HINT: &str = "The requested specifications are discovered by scanning projects and modules on the search path. You may not have included the project containing the distributed metadata.";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Invalid metadata name: {}", display_name(.name.as_deref()))]
    InvalidName { name: Option<String> },

    #[error("{}", invalid_dependencies_message(.invalid))]
    InvalidDependencyName {
        /// Offending entries, sorted with absent entries first.
        invalid: Vec<Option<String>>,
    },

    #[error("Cannot find metadata \"{name}\" (resource name \"{path}\")")]
    NotFound { name: String, path: String },

    #[error("{}", conflict_message(.name, .definitions))]
    ConflictingDefinition {
        name: String,
        /// Every occurrence seen for `name`, in discovery order.
        definitions: Vec<(Location, Specification)>,
    },

    #[error("Error reading definition from {location}: {source}")]
    MalformedDescriptor {
        location: Location,
        #[source]
        source: Box<MetadataError>,
    },

    #[error("Invalid descriptor body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error writing definition for {spec}: {source}")]
    Encode {
        spec: Specification,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Archive error at {location}: {source}")]
    Archive {
        location: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{}", resolution_message(.source, .requested, .loaded))]
    Resolution {
        requested: Vec<String>,
        /// Name to dependency set for every specification loaded before the failure.
        loaded: BTreeMap<String, BTreeSet<String>>,
        #[source]
        source: Box<MetadataError>,
    },
}

impl MetadataError {
    pub(crate) fn io(location: impl ToString, source: io::Error) -> Self {
        MetadataError::Io {
            location: location.to_string(),
            source,
        }
    }

    pub(crate) fn archive(location: impl ToString, source: zip::result::ZipError) -> Self {
        MetadataError::Archive {
            location: location.to_string(),
            source,
        }
    }

    pub(crate) fn malformed(location: Location, source: MetadataError) -> Self {
        MetadataError::MalformedDescriptor {
            location,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through resolution and descriptor wrappers.
    pub fn root_cause(&self) -> &MetadataError {
        match self {
            MetadataError::Resolution { source, .. }
            | MetadataError::MalformedDescriptor { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn display_name(name: Option<&str>) -> String {
    match name {
        Some(n) => format!("\"{}\"", n),
        None => "null".to_string(),
    }
}

fn invalid_dependencies_message(invalid: &[Option<String>]) -> String {
    let label = if invalid.len() == 1 {
        "Invalid dependency: "
    } else {
        "Invalid dependencies: "
    };
    let names: Vec<String> = invalid.iter().map(|d| display_name(d.as_deref())).collect();
    format!("{}{}", label, names.join(", "))
}

fn conflict_message(name: &str, definitions: &[(Location, Specification)]) -> String {
    let mut out = format!("Conflicting definitions of metadata \"{}\": ", name);
    for (i, (location, spec)) in definitions.iter().enumerate() {
        if i > 0 {
            out.push_str(" vs ");
        }
        let _ = write!(out, "{} (from {})", spec, location);
    }
    out
}

fn resolution_message(
    source: &MetadataError,
    requested: &[String],
    loaded: &BTreeMap<String, BTreeSet<String>>,
) -> String {
    let loaded: Vec<String> = loaded
        .iter()
        .map(|(name, deps)| {
            let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
            format!("{}=[{}]", name, deps.join(", "))
        })
        .collect();
    format!(
        "{}\nDirectly asked for: [{}]\nLoaded up to now (with dependencies): {{{}}}\n{}",
        source,
        requested.join(", "),
        loaded.join(", "),
        RESOLUTION_HINT
    )
}
