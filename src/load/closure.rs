//! Dependency closure resolution.
//!
//! Names are processed last-in-first-out from a pending stack seeded with the
//! requested names. The resulting set does not depend on that order, but the
//! load order (and so which failure is hit first) does, and it is stable for a
//! given input order and search path.

use crate::error::{MetadataError, Result};
use crate::load::single::load_from_search_path;
use crate::resource::SearchPath;
use crate::spec::{Codec, Specification};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

/// Load the requested specifications and everything they depend on.
///
/// On failure the error is wrapped in [`MetadataError::Resolution`] carrying
/// the requested names and the dependencies of everything loaded so far.
pub fn resolve_closure<I, S>(
    search_path: &SearchPath,
    codec: &Codec,
    names: I,
) -> Result<Vec<Specification>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let requested: Vec<String> = names.into_iter().map(Into::into).collect();
    resolve_with(&requested, |name| {
        load_from_search_path(search_path, codec, name)
    })
}

/// Closure walk over an arbitrary single-name loader.
pub(crate) fn resolve_with<F>(requested: &[String], mut load: F) -> Result<Vec<Specification>>
where
    F: FnMut(&str) -> Result<Specification>,
{
    let mut visited: HashSet<String> = HashSet::new();
    let mut loaded: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut pending: Vec<String> = requested.to_vec();
    let mut out: Vec<Specification> = Vec::new();

    while let Some(name) = pending.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }

        let spec = match load(&name) {
            Ok(spec) => spec,
            Err(source) => {
                return Err(MetadataError::Resolution {
                    requested: requested.to_vec(),
                    loaded,
                    source: Box::new(source),
                });
            }
        };
        debug!(spec = %name, dependencies = spec.dependencies().len(), "resolved");

        pending.extend(spec.dependencies().iter().cloned());
        loaded.insert(name, spec.dependencies().clone());
        out.push(spec);
    }

    info!(
        requested = requested.len(),
        resolved = out.len(),
        "resolved specification closure"
    );
    Ok(out)
}
