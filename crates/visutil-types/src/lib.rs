//! Value model for visutil.
//!
//! Option trees handed to the merge engine and sequences handed to the
//! ordered searches are built from the types in this crate. The set of
//! shapes is closed: every value is a scalar, a list, a record, or an opaque
//! host handle.
//!
//! # Key Types
//!
//! - [`Value`] -- Dynamic value (null, bool, number, string, list, record, opaque)
//! - [`Record`] -- Shared, layered keyed record with an optional live fallback
//! - [`Field`] -- Three-state lookup result: absent, explicit null, or present
//! - [`Handle`] -- Opaque host value that is never merged into or bridged

pub mod error;
pub mod field;
pub mod handle;
pub mod record;
pub mod value;

pub use error::TypeError;
pub use field::Field;
pub use handle::Handle;
pub use record::Record;
pub use value::Value;
