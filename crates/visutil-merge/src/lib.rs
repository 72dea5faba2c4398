//! Merge engine for visutil.
//!
//! Combines option records in place: a caller-owned target is updated from a
//! read-only source according to deletion, selection, exclusion and
//! inheritance rules. Everything operates on the [`visutil_types`] value
//! model and never touches a host environment.
//!
//! # Key Operations
//!
//! - [`copy_or_delete`] -- Leaf step: copy one key, or delete it on explicit null
//! - [`fill_if_defined`] -- Override keys the target already has, never add new ones
//! - [`deep_extend`] -- Recursive merge; lists replaced, records merged
//! - [`selective_deep_extend`] / [`selective_not_deep_extend`] -- Allow-list and exclusion variants
//! - [`bridge_object`] / [`selective_bridge_object`] -- Live-inheriting overlays over shared defaults
//! - [`merge_options`] -- Normalize a toggle-able option block with an `enabled` flag
//! - [`extend`] / [`selective_extend`] / [`deep_object_assign`] -- Shallow and non-mutating helpers

pub mod bridge;
pub mod config;
pub mod enabled;
pub mod error;
pub mod extend;

pub use bridge::{bridge_object, bridge_record, selective_bridge_object};
pub use config::ExtendOptions;
pub use enabled::merge_options;
pub use error::{MergeError, MergeResult};
pub use extend::{
    copy_or_delete, deep_extend, deep_object_assign, extend, fill_if_defined,
    selective_deep_extend, selective_extend, selective_not_deep_extend,
};
