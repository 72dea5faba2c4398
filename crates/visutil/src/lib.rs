//! Option merging and ordered search helpers for visualization libraries.
//!
//! This is the main entry point for applications: it re-exports the value
//! model, the merge engine and the ordered searches, and adds [`OptionSet`],
//! which keeps a component's options as a live overlay over shared defaults.

pub mod options;

pub use options::OptionSet;

// Re-export the building blocks
pub use visutil_merge::{
    bridge_object, bridge_record, copy_or_delete, deep_extend, deep_object_assign, extend,
    fill_if_defined, merge_options, selective_bridge_object, selective_deep_extend,
    selective_extend, selective_not_deep_extend, ExtendOptions, MergeError, MergeResult,
};
pub use visutil_search::{
    binary_search_custom, binary_search_value, binary_search_value_by, search_exact_by,
    search_nearest_by, FieldPath, SearchError, SearchOutcome, SidePreference, MAX_PROBES,
};
pub use visutil_types::{Field, Handle, Record, TypeError, Value};
