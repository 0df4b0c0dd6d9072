//! Loading specifications from a search path.
//!
//! - single: one name, checked for agreement across every source exposing it
//! - closure: requested names plus everything they transitively depend on
//! - discover: every descriptor on the search path, indexed by name

pub mod closure;
pub mod discover;
pub mod single;

pub use closure::resolve_closure;
pub use discover::discover_all;
pub use single::load_from_search_path;
