//! Ordered search for visutil.
//!
//! Binary searches over sequences the caller guarantees are sorted under the
//! comparator it supplies. Sortedness is assumed, not checked. Both searches
//! stop after [`MAX_PROBES`] probes so a malformed comparator can never keep
//! them running, and report that case separately from a plain miss.
//!
//! # Key Types
//!
//! - [`SearchOutcome`] -- Found / not found / probe budget exhausted
//! - [`SidePreference`] -- Tie-break direction for nearest-value search
//! - [`FieldPath`] -- Which field (or field of a field) of a record to compare
//!
//! # Key Operations
//!
//! - [`binary_search_custom`] / [`search_exact_by`] -- Exact match with a one-argument comparator
//! - [`binary_search_value`] / [`search_nearest_by`] -- Nearest match with a side preference

pub mod error;
pub mod exact;
pub mod nearest;
pub mod outcome;
pub mod path;

pub use error::{SearchError, SearchResult};
pub use exact::{binary_search_custom, search_exact_by};
pub use nearest::{binary_search_value, binary_search_value_by, search_nearest_by};
pub use outcome::{SearchOutcome, SidePreference, MAX_PROBES};
pub use path::FieldPath;
