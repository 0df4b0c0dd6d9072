//! Writing specifications to their canonical locations in a sink.
//!
//! Batches are not atomic: if one entry fails, the entries before it stay
//! written and the error is returned.

use crate::error::{MetadataError, Result};
use crate::resource::Sink;
use crate::spec::{Codec, Specification};

use std::io::Write;
use tracing::{debug, info};

/// Write one descriptor and return the relative path it was written to.
pub fn write_specification<S>(sink: &mut S, codec: &Codec, spec: &Specification) -> Result<String>
where
    S: Sink + ?Sized,
{
    // Encode before touching the sink so a bad value never leaves an empty entry.
    let bytes = codec.encode(spec)?;
    let path = codec.spec_path(spec.name())?;
    let written = {
        let mut stream = sink.open(&path)?;
        stream.write_all(&bytes).and_then(|_| stream.flush())
    };
    written.map_err(|e| MetadataError::io(sink.describe(&path), e))?;
    debug!(name = spec.name(), path = %path, "wrote specification");
    Ok(path)
}

/// Write every specification in order, returning the paths written.
pub fn write_specifications<'a, S, I>(sink: &mut S, codec: &Codec, specs: I) -> Result<Vec<String>>
where
    S: Sink + ?Sized,
    I: IntoIterator<Item = &'a Specification>,
{
    let mut paths = Vec::new();
    for spec in specs {
        paths.push(write_specification(sink, codec, spec)?);
    }
    info!(count = paths.len(), "wrote specifications");
    Ok(paths)
}
