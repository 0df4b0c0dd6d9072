//! Resource access: where descriptors are read from and written to.
//!
//! Sources are directories or zip archives on an ordered search path. Sinks
//! are directories or archives being built. Every stream, listing and archive
//! handle is opened, consumed and dropped within a single call.

pub mod location;
pub mod sink;
pub mod source;

pub use location::Location;
pub use sink::{ArchiveSink, DirectorySink, Sink};
pub use source::{SearchPath, Source};
