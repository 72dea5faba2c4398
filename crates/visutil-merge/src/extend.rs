//! In-place record merges.
//!
//! All functions here mutate the target record through its shared handle and
//! read the source without modifying it. Values are copied by handle: a
//! record copied from the source is shared with it, while lists are copied
//! element by element.

use tracing::{debug, trace};
use visutil_types::{Field, Record, Value};

use crate::config::ExtendOptions;
use crate::error::{MergeError, MergeResult};

/// Copy `b[key]` onto `a`, or delete `a[key]` when deletion is allowed,
/// `b[key]` is an explicit null and `a[key]` resolves.
///
/// A key absent from `b` is removed from `a`'s own keys.
pub fn copy_or_delete(a: &Record, b: &Record, key: &str, allow_deletion: bool) {
    let source = b.field(key);
    if allow_deletion && source.is_null() && a.contains_key(key) {
        debug!(key, "explicit null deletes key");
        a.remove(key);
        return;
    }
    match source.into_value() {
        Some(value) => {
            a.insert(key, value);
        }
        None => {
            a.remove(key);
        }
    }
}

/// Apply `b` onto the keys `a` already has, own or inherited.
///
/// Keys only present in `b` are never added. A record in `b` is merged only
/// when `a` holds a record under the same key; every other defined value is
/// handed to [`copy_or_delete`].
pub fn fill_if_defined(a: &Record, b: &Record, allow_deletion: bool) {
    for key in a.keys() {
        match b.field(&key) {
            Field::Absent => {}
            Field::Present(Value::Record(source)) => {
                if let Some(Value::Record(target)) = a.get(&key) {
                    fill_if_defined(&target, &source, allow_deletion);
                }
            }
            Field::Null | Field::Present(_) => copy_or_delete(a, b, &key, allow_deletion),
        }
    }
}

/// Recursively merge `b` into `a`.
///
/// Records are merged key by key, creating an empty record in `a` when the
/// key is absent. A record in `b` meeting a non-record in `a` replaces it.
/// Lists replace the target value with a copy. Everything else goes through
/// [`copy_or_delete`].
///
/// `options.allow_deletion` only applies to the keys of `b` itself; nested
/// records are merged with deletion disabled. Callers that need deletion at
/// depth must call at that depth.
pub fn deep_extend(a: &Record, b: &Record, options: ExtendOptions) {
    let keys = if options.proto_extend {
        b.keys()
    } else {
        b.own_keys()
    };

    for key in keys {
        let Some(value) = b.get(&key) else {
            continue;
        };
        match value {
            Value::Record(source) => {
                merge_nested(a, b, &key, &source, options.nested(), options.allow_deletion);
            }
            Value::List(items) => {
                trace!(key = %key, len = items.len(), "list replaced");
                a.insert(key, Value::List(items));
            }
            _ => copy_or_delete(a, b, &key, options.allow_deletion),
        }
    }
}

/// Deep-merge only the listed top-level properties of `b` into `a`.
///
/// Fails with [`MergeError::ListSource`] when `b` is a list and with
/// [`MergeError::UnsupportedList`] when a selected property of `b` holds a
/// list. Both checks run before anything is written. Nested records are
/// merged with `allow_deletion` forwarded. A `b` that is neither a record nor
/// a list leaves `a` unchanged.
pub fn selective_deep_extend<S: AsRef<str>>(
    props: &[S],
    a: &Record,
    b: &Value,
    allow_deletion: bool,
) -> MergeResult<()> {
    let source = match b {
        Value::List(_) => return Err(MergeError::ListSource),
        Value::Record(record) => record,
        _ => return Ok(()),
    };

    for prop in props {
        let prop = prop.as_ref();
        if let Some(Value::List(_)) = source.get_own(prop) {
            return Err(MergeError::UnsupportedList {
                key: prop.to_string(),
            });
        }
    }

    let nested_options = ExtendOptions {
        proto_extend: false,
        allow_deletion,
    };
    for prop in props {
        let prop = prop.as_ref();
        match source.get_own(prop) {
            None => {}
            Some(Value::Record(nested)) => {
                merge_nested(a, source, prop, &nested, nested_options, allow_deletion);
            }
            Some(_) => copy_or_delete(a, source, prop, allow_deletion),
        }
    }
    Ok(())
}

/// Deep-merge every own property of `b` into `a` except the excluded ones.
///
/// Fails with [`MergeError::ListSource`] when `b` is a list. List properties
/// are replaced by a copy. Nested records are merged with deletion disabled,
/// the same way [`deep_extend`] treats them.
pub fn selective_not_deep_extend<S: AsRef<str>>(
    exclude: &[S],
    a: &Record,
    b: &Value,
    allow_deletion: bool,
) -> MergeResult<()> {
    let source = match b {
        Value::List(_) => return Err(MergeError::ListSource),
        Value::Record(record) => record,
        _ => return Ok(()),
    };

    for (key, value) in source.own_entries() {
        if exclude.iter().any(|excluded| excluded.as_ref() == key) {
            continue;
        }
        match value {
            Value::Record(nested) => {
                merge_nested(a, source, &key, &nested, ExtendOptions::default(), allow_deletion);
            }
            Value::List(items) => {
                trace!(key = %key, len = items.len(), "list replaced");
                a.insert(key, Value::List(items));
            }
            _ => copy_or_delete(a, source, &key, allow_deletion),
        }
    }
    Ok(())
}

/// Merge the record `nested` (found at `b[key]`) into `a[key]`.
fn merge_nested(
    a: &Record,
    b: &Record,
    key: &str,
    nested: &Record,
    options: ExtendOptions,
    allow_deletion: bool,
) {
    match a.get(key) {
        None => {
            let created = Record::new();
            deep_extend(&created, nested, options);
            a.insert(key, created);
        }
        Some(Value::Record(target)) => deep_extend(&target, nested, options),
        Some(_) => copy_or_delete(a, b, key, allow_deletion),
    }
}

/// Shallow-copy every own key of each source onto `a`. Later sources win.
pub fn extend(a: &Record, sources: &[Record]) {
    for source in sources {
        for (key, value) in source.own_entries() {
            a.insert(key, value);
        }
    }
}

/// Shallow-copy the listed keys from each source onto `a`, skipping sources
/// that do not set the key themselves. Later sources win.
pub fn selective_extend<S: AsRef<str>>(props: &[S], a: &Record, sources: &[Record]) {
    for prop in props {
        let prop = prop.as_ref();
        for source in sources {
            if let Some(value) = source.get_own(prop) {
                a.insert(prop, value);
            }
        }
    }
}

/// Deep-merge `target` and then each of `sources` into a fresh record.
///
/// Nothing is mutated and the result shares no record with any input.
/// Records merge recursively; any other value, lists included, replaces the
/// previous one. Inputs that are not records contribute nothing.
pub fn deep_object_assign(target: &Value, sources: &[Value]) -> Value {
    let result = Record::new();
    for layer in std::iter::once(target).chain(sources) {
        if let Value::Record(record) = layer {
            assign_into(&result, record);
        }
    }
    Value::Record(result)
}

fn assign_into(a: &Record, b: &Record) {
    for (key, value) in b.entries() {
        match (a.get_own(&key), value) {
            (Some(Value::Record(existing)), Value::Record(source)) => {
                assign_into(&existing, &source);
            }
            (_, value) => {
                a.insert(key, value.deep_clone());
            }
        }
    }
}
