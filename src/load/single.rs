//! Single-name loading with a cross-source agreement check.

use crate::error::{MetadataError, Result};
use crate::resource::{Location, SearchPath};
use crate::spec::{Codec, Specification};

use tracing::debug;

/// Load `name` from every location on `search_path` that exposes its
/// descriptor and make sure they all agree.
///
/// All occurrences are read, even after the first, since the point is to
/// catch two packaged sources that silently disagree.
pub fn load_from_search_path(
    search_path: &SearchPath,
    codec: &Codec,
    name: &str,
) -> Result<Specification> {
    let path = codec.spec_path(name)?;
    let locations = search_path.locate(&path)?;
    if locations.is_empty() {
        return Err(MetadataError::NotFound {
            name: name.to_string(),
            path,
        });
    }

    let mut definitions: Vec<(Location, Specification)> = Vec::with_capacity(locations.len());
    for location in locations {
        let spec = decode_at(search_path, codec, &location)?;
        debug!(spec = name, location = %location, "read specification");
        definitions.push((location, spec));
    }

    let first = &definitions[0].1;
    if definitions.iter().any(|(_, other)| other != first) {
        return Err(MetadataError::ConflictingDefinition {
            name: name.to_string(),
            definitions,
        });
    }

    let (_, spec) = definitions.swap_remove(0);
    Ok(spec)
}

/// Read and decode one location, attaching the location to decode failures.
pub(crate) fn decode_at(
    search_path: &SearchPath,
    codec: &Codec,
    location: &Location,
) -> Result<Specification> {
    let bytes = search_path.read(location)?;
    codec
        .decode(&bytes)
        .map_err(|e| MetadataError::malformed(location.clone(), e))
}
