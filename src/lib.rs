//! Distributed metadata specifications.
//!
//! A specification names a unit of distributed model metadata and the other
//! specifications it depends on. This crate writes specification descriptors
//! into directories and zip archives, and reads them back from an ordered
//! search path of such sources:
//! - [`load_from_search_path`] loads one name and checks every source agrees
//! - [`resolve_closure`] loads requested names plus their transitive dependencies
//! - [`discover_all`] indexes every descriptor visible on the search path

pub mod config;
pub mod error;
pub mod load;
pub mod logging;
pub mod resource;
pub mod spec;
pub mod write;

pub use config::Config;
pub use error::{MetadataError, Result};
pub use load::{discover_all, load_from_search_path, resolve_closure};
pub use resource::{ArchiveSink, DirectorySink, Location, SearchPath, Sink, Source};
pub use spec::{Codec, Layout, NameRules, Specification};
pub use write::{write_specification, write_specifications};
