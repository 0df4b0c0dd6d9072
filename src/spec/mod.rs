//! Spec layer: specification values, names, canonical layout and JSON codec.
//!
//! This module is intentionally separate from resource access.
//! It owns:
//! - name validation rules
//! - the immutable Specification value
//! - the canonical name -> descriptor path mapping
//! - descriptor encoding/decoding

pub mod codec;
pub mod layout;
pub mod model;
pub mod name;

pub use codec::Codec;
pub use layout::Layout;
pub use model::Specification;
pub use name::NameRules;
