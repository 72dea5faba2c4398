//! Layered keyed records.
//!
//! A [`Record`] is a shared handle over a map of own keys plus an optional
//! fallback record. Lookups check the own keys first and then walk the
//! fallback chain; writes and removals only ever touch the own keys. A record
//! created with [`Record::with_fallback`] therefore tracks later changes to
//! its fallback for every key it has not overridden.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TypeError;
use crate::field::Field;
use crate::value::Value;

/// A shared, mutable keyed record with an optional live fallback.
///
/// Cloning a `Record` clones the handle, not the contents: both clones see
/// the same keys. Use [`Record::deep_clone`] for an independent copy.
#[derive(Clone, Default)]
pub struct Record {
    inner: Arc<RwLock<Layer>>,
}

#[derive(Default)]
struct Layer {
    own: BTreeMap<String, Value>,
    fallback: Option<Record>,
}

impl Record {
    /// Create an empty record with no fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record that reads through to `parent` for every key
    /// it does not set itself.
    pub fn with_fallback(parent: &Record) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Layer {
                own: BTreeMap::new(),
                fallback: Some(parent.clone()),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Layer> {
        self.inner.read().expect("lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Layer> {
        self.inner.write().expect("lock poisoned")
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Resolve `key` through own keys, then the fallback chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        let fallback = {
            let layer = self.read();
            if let Some(value) = layer.own.get(key) {
                return Some(value.clone());
            }
            layer.fallback.clone()
        };
        fallback.and_then(|parent| parent.get(key))
    }

    /// Look up an own key only, ignoring the fallback chain.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.read().own.get(key).cloned()
    }

    /// Three-state lookup of `key`, including inherited keys.
    pub fn field(&self, key: &str) -> Field {
        Field::from(self.get(key))
    }

    /// Returns `true` if `key` resolves, either as an own or inherited key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if `key` is set on this record itself.
    pub fn contains_own_key(&self, key: &str) -> bool {
        self.read().own.contains_key(key)
    }

    /// Own keys in order.
    pub fn own_keys(&self) -> Vec<String> {
        self.read().own.keys().cloned().collect()
    }

    /// Own keys followed by inherited keys not shadowed by an own key.
    pub fn keys(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut keys = Vec::new();
        let mut layer = Some(self.clone());
        while let Some(record) = layer {
            let guard = record.read();
            for key in guard.own.keys() {
                if seen.insert(key.clone()) {
                    keys.push(key.clone());
                }
            }
            layer = guard.fallback.clone();
        }
        keys
    }

    /// Snapshot of the own key/value pairs.
    pub fn own_entries(&self) -> Vec<(String, Value)> {
        self.read()
            .own
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Snapshot of every resolvable key/value pair, own and inherited.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.get(&key).map(|value| (key, value)))
            .collect()
    }

    /// Number of own keys.
    pub fn own_len(&self) -> usize {
        self.read().own.len()
    }

    /// Returns `true` if no key resolves on this record.
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// The record this one reads through to, if any.
    pub fn fallback(&self) -> Option<Record> {
        self.read().fallback.clone()
    }

    /// Returns `true` if this record has a fallback.
    pub fn is_bridged(&self) -> bool {
        self.read().fallback.is_some()
    }

    /// Returns `true` if both handles refer to the same record.
    pub fn ptr_eq(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Set an own key, returning the previous own value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write().own.insert(key.into(), value.into())
    }

    /// Remove an own key. Inherited values stay visible afterwards.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write().own.remove(key)
    }

    /// Drop every own key. The fallback is kept.
    pub fn clear(&self) {
        self.write().own.clear();
    }

    // ---------------------------------------------------------------
    // Copies
    // ---------------------------------------------------------------

    /// Resolved view of this record as a plain map. Nested records are
    /// returned as handles.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        self.entries().into_iter().collect()
    }

    /// An independent plain record holding deep copies of every resolvable
    /// key. The result has no fallback.
    pub fn deep_clone(&self) -> Record {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key, value.deep_clone()))
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.flatten() == other.flatten()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layer = self.read();
        let mut map = f.debug_map();
        map.entries(layer.own.iter());
        if let Some(parent) = &layer.fallback {
            map.entry(&"<fallback>", parent);
        }
        map.finish()
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(own: BTreeMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Layer {
                own,
                fallback: None,
            })),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<BTreeMap<String, Value>>()
            .into()
    }
}

impl TryFrom<Value> for Record {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Record(record) => Ok(record),
            other => Err(TypeError::UnexpectedKind {
                expected: "record",
                actual: other.kind(),
            }),
        }
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = TypeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Record::try_from(Value::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn insert_and_get() {
        let r = Record::new();
        assert!(r.insert("a", 1).is_none());
        assert_eq!(r.get("a"), Some(Value::Number(1.0)));
        assert_eq!(r.insert("a", 2), Some(Value::Number(1.0)));
        assert_eq!(r.own_len(), 1);
    }

    #[test]
    fn field_distinguishes_null_from_absent() {
        let r = record(json!({"x": null, "y": 3}));
        assert_eq!(r.field("x"), Field::Null);
        assert_eq!(r.field("y"), Field::Present(Value::Number(3.0)));
        assert_eq!(r.field("z"), Field::Absent);
    }

    #[test]
    fn clones_share_contents() {
        let r = Record::new();
        let alias = r.clone();
        alias.insert("k", "v");
        assert_eq!(r.get("k"), Some(Value::from("v")));
        assert!(r.ptr_eq(&alias));
    }

    #[test]
    fn fallback_reads_through() {
        let parent = record(json!({"color": "red", "width": 2}));
        let child = Record::with_fallback(&parent);
        assert!(child.is_bridged());
        assert_eq!(child.get("color"), Some(Value::from("red")));
        assert!(child.contains_key("width"));
        assert!(!child.contains_own_key("width"));
    }

    #[test]
    fn fallback_changes_stay_visible() {
        let parent = record(json!({"color": "red"}));
        let child = Record::with_fallback(&parent);
        parent.insert("color", "blue");
        assert_eq!(child.get("color"), Some(Value::from("blue")));
    }

    #[test]
    fn own_key_shadows_fallback() {
        let parent = record(json!({"color": "red"}));
        let child = Record::with_fallback(&parent);
        child.insert("color", "green");
        assert_eq!(child.get("color"), Some(Value::from("green")));
        assert_eq!(parent.get("color"), Some(Value::from("red")));

        child.remove("color");
        assert_eq!(child.get("color"), Some(Value::from("red")));
    }

    #[test]
    fn keys_lists_own_before_inherited_without_duplicates() {
        let parent = record(json!({"a": 1, "b": 2}));
        let child = Record::with_fallback(&parent);
        child.insert("c", 3);
        child.insert("a", 10);
        assert_eq!(child.own_keys(), vec!["a", "c"]);
        assert_eq!(child.keys(), vec!["a", "c", "b"]);
    }

    #[test]
    fn deep_clone_is_independent_and_flat() {
        let parent = record(json!({"nested": {"x": 1}}));
        let child = Record::with_fallback(&parent);
        let copy = child.deep_clone();
        assert!(!copy.is_bridged());
        assert!(copy.contains_own_key("nested"));

        let nested = parent.get("nested").and_then(|v| v.as_record().cloned()).unwrap();
        nested.insert("x", 2);
        let copied = copy.get("nested").and_then(|v| v.as_record().cloned()).unwrap();
        assert_eq!(copied.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn equality_uses_resolved_contents() {
        let parent = record(json!({"a": 1}));
        let child = Record::with_fallback(&parent);
        child.insert("b", 2);
        assert_eq!(child, record(json!({"a": 1, "b": 2})));
    }

    #[test]
    fn try_from_non_record_fails() {
        let err = Record::try_from(json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            TypeError::UnexpectedKind {
                expected: "record",
                actual: "list"
            }
        );
    }

    #[test]
    fn clear_keeps_fallback() {
        let parent = record(json!({"a": 1}));
        let child = Record::with_fallback(&parent);
        child.insert("a", 5);
        child.clear();
        assert_eq!(child.own_len(), 0);
        assert_eq!(child.get("a"), Some(Value::Number(1.0)));
    }
}
