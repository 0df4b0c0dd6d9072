//! Descriptor codec.
//!
//! JSON shape:
//! {
//!   "dependencies": ["a", "b"],   // optional on read, may be null
//!   "name": "core"                // required, may not be null
//! }
//!
//! Output keys are in alphabetical order and dependencies are sorted, so two
//! writers of the same specification produce identical bytes. Conflict checks
//! compare decoded values, never raw bytes.

use crate::config::Config;
use crate::error::{MetadataError, Result};
use crate::spec::{Layout, NameRules, Specification};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Field order here is the on-disk key order.
#[derive(Serialize)]
struct DescriptorOut<'a> {
    dependencies: &'a BTreeSet<String>,
    name: &'a str,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DescriptorIn {
    // Required, but null is let through so it reports as an invalid name.
    #[serde(deserialize_with = "Option::deserialize")]
    name: Option<String>,

    #[serde(default)]
    dependencies: Option<Vec<Option<String>>>,
}

/// Immutable codec settings, built once and shared by writers and loaders.
#[derive(Debug, Clone)]
pub struct Codec {
    rules: NameRules,
    layout: Layout,
    indent: Vec<u8>,
}

impl Codec {
    pub fn new(rules: NameRules, layout: Layout, indent: usize) -> Self {
        Self {
            rules,
            layout,
            indent: vec![b' '; indent.max(1)],
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.check()?;
        Ok(Self::new(
            NameRules::new(&config.name_pattern)?,
            Layout::new(&config.specs_directory, &config.extension),
            config.indent,
        ))
    }

    pub fn rules(&self) -> &NameRules {
        &self.rules
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Canonical descriptor path for `name`.
    pub fn spec_path(&self, name: &str) -> Result<String> {
        self.layout.spec_path(&self.rules, name)
    }

    pub fn encode(&self, spec: &Specification) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(64);
        self.encode_to_writer(spec, &mut out)?;
        Ok(out)
    }

    pub fn encode_to_writer<W: Write>(&self, spec: &Specification, writer: W) -> Result<()> {
        let body = DescriptorOut {
            dependencies: spec.dependencies(),
            name: spec.name(),
        };
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        body.serialize(&mut ser)
            .map_err(|source| MetadataError::Encode {
                spec: spec.clone(),
                source,
            })
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Specification> {
        let raw: DescriptorIn = serde_json::from_slice(bytes)?;
        self.build(raw)
    }

    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Specification> {
        let raw: DescriptorIn = serde_json::from_reader(reader)?;
        self.build(raw)
    }

    /// Read a single descriptor file from disk.
    pub fn read_file(&self, path: &Path) -> Result<Specification> {
        let file = File::open(path).map_err(|e| MetadataError::io(path.display(), e))?;
        self.decode_reader(BufReader::new(file))
    }

    fn build(&self, raw: DescriptorIn) -> Result<Specification> {
        Specification::from_nullable(&self.rules, raw.name, raw.dependencies)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(NameRules::default(), Layout::default(), 2)
    }
}
