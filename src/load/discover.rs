//! Bulk discovery of every descriptor on a search path.
//!
//! No closure is computed here: whatever is visible gets indexed by name. The
//! same descriptor showing up in several sources is fine; the same name with
//! different content is a conflict.

use crate::error::{MetadataError, Result};
use crate::resource::{Location, SearchPath};
use crate::spec::{Codec, Specification};

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, info};

/// Name-indexed view of discovered specifications, remembering where each
/// one was first seen.
#[derive(Debug, Default)]
struct Registry {
    entries: BTreeMap<String, (Location, Specification)>,
}

impl Registry {
    /// Check-then-insert for one name; equal duplicates are accepted.
    fn register(&mut self, location: Location, spec: Specification) -> Result<()> {
        match self.entries.entry(spec.name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert((location, spec));
                Ok(())
            }
            Entry::Occupied(slot) => {
                let (first_location, first) = slot.get();
                if *first != spec {
                    return Err(MetadataError::ConflictingDefinition {
                        name: spec.name().to_string(),
                        definitions: vec![(first_location.clone(), first.clone()), (location, spec)],
                    });
                }
                debug!(
                    spec = spec.name(),
                    first = %first_location,
                    again = %location,
                    "identical specification seen again"
                );
                Ok(())
            }
        }
    }

    fn into_specifications(self) -> BTreeMap<String, Specification> {
        self.entries
            .into_iter()
            .map(|(name, (_, spec))| (name, spec))
            .collect()
    }
}

/// Index every specification visible anywhere on `search_path`.
///
/// Dependencies are not checked for presence. A search path without any
/// descriptors yields an empty map.
pub fn discover_all(
    search_path: &SearchPath,
    codec: &Codec,
) -> Result<BTreeMap<String, Specification>> {
    let mut registry = Registry::default();
    for source in search_path.sources() {
        source.for_each_descriptor(codec, |location, bytes| {
            let spec = codec
                .decode(&bytes)
                .map_err(|e| MetadataError::malformed(location.clone(), e))?;
            debug!(spec = spec.name(), location = %location, "discovered specification");
            registry.register(location, spec)
        })?;
    }

    let specs = registry.into_specifications();
    info!(
        sources = search_path.sources().len(),
        found = specs.len(),
        "discovered specifications"
    );
    Ok(specs)
}
