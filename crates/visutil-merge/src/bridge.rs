//! Live-inheriting overlays over shared default records.
//!
//! A bridged record starts out empty and reads through to its reference for
//! every key it does not set. Nested records of the reference are bridged as
//! well, so overriding `font.size` on the bridge never writes into the shared
//! defaults while `font.face` keeps tracking them.

use tracing::trace;
use visutil_types::{Record, Value};

/// Bridge `reference`.
///
/// Returns a new record reading through to `reference`, with every own
/// record-valued key recursively bridged. Opaque handles come back
/// unchanged; any other non-record yields [`Value::Null`].
pub fn bridge_object(reference: &Value) -> Value {
    match reference {
        Value::Opaque(_) => reference.clone(),
        Value::Record(record) => Value::Record(bridge_record(record)),
        _ => Value::Null,
    }
}

/// Bridge a record and all of its own nested records.
pub fn bridge_record(reference: &Record) -> Record {
    let bridged = Record::with_fallback(reference);
    for (key, value) in reference.own_entries() {
        if let Value::Record(nested) = value {
            trace!(key = %key, "bridging nested record");
            bridged.insert(key, bridge_record(&nested));
        }
    }
    bridged
}

/// Bridge `reference`, recursing only into the listed top-level fields.
///
/// Each listed field that is an own record of `reference` is bridged with
/// [`bridge_record`]; all other keys simply read through. Opaque handles come
/// back unchanged and other non-records yield [`Value::Null`].
pub fn selective_bridge_object<S: AsRef<str>>(fields: &[S], reference: &Value) -> Value {
    let record = match reference {
        Value::Opaque(_) => return reference.clone(),
        Value::Record(record) => record,
        _ => return Value::Null,
    };

    let bridged = Record::with_fallback(record);
    for field in fields {
        let field = field.as_ref();
        if let Some(Value::Record(nested)) = record.get_own(field) {
            bridged.insert(field, bridge_record(&nested));
        }
    }
    Value::Record(bridged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use visutil_types::Handle;

    fn defaults() -> Record {
        Record::try_from(json!({
            "color": "blue",
            "font": {"size": 14, "face": "arial"},
            "shadow": {"enabled": false, "offset": {"x": 5}}
        }))
        .unwrap()
    }

    fn nested(r: &Record, key: &str) -> Record {
        r.get(key).and_then(|v| v.as_record().cloned()).unwrap()
    }

    #[test]
    fn unset_fields_read_through() {
        let reference = defaults();
        let bridged = bridge_record(&reference);
        assert_eq!(bridged.get("color"), Some(Value::from("blue")));
        assert_eq!(nested(&bridged, "font").get("face"), Some(Value::from("arial")));
    }

    #[test]
    fn writes_shadow_without_touching_reference() {
        let reference = defaults();
        let bridged = bridge_record(&reference);
        bridged.insert("color", "red");
        nested(&bridged, "font").insert("size", 20);

        assert_eq!(bridged.get("color"), Some(Value::from("red")));
        assert_eq!(reference.get("color"), Some(Value::from("blue")));
        assert_eq!(nested(&bridged, "font").get("size"), Some(Value::Number(20.0)));
        assert_eq!(nested(&reference, "font").get("size"), Some(Value::Number(14.0)));
    }

    #[test]
    fn reference_changes_stay_visible() {
        let reference = defaults();
        let bridged = bridge_record(&reference);
        reference.insert("color", "green");
        nested(&reference, "font").insert("face", "courier");

        assert_eq!(bridged.get("color"), Some(Value::from("green")));
        assert_eq!(nested(&bridged, "font").get("face"), Some(Value::from("courier")));
    }

    #[test]
    fn nested_records_are_bridged_at_every_depth() {
        let reference = defaults();
        let bridged = bridge_record(&reference);
        let offset = nested(&nested(&bridged, "shadow"), "offset");
        assert!(offset.is_bridged());
        assert!(offset.fallback().unwrap().ptr_eq(&nested(&nested(&reference, "shadow"), "offset")));
    }

    #[test]
    fn bridge_object_passes_opaque_through() {
        let handle = Handle::new("container", ());
        let bridged = bridge_object(&Value::Opaque(handle.clone()));
        assert_eq!(bridged, Value::Opaque(handle));
    }

    #[test]
    fn bridge_object_of_non_record_is_null() {
        assert_eq!(bridge_object(&Value::Null), Value::Null);
        assert_eq!(bridge_object(&Value::from(3)), Value::Null);
        assert_eq!(bridge_object(&Value::from(json!([1]))), Value::Null);
    }

    #[test]
    fn selective_bridge_only_bridges_listed_fields() {
        let reference = defaults();
        let bridged = selective_bridge_object(&["font"], &Value::Record(reference.clone()));
        let bridged = bridged.as_record().unwrap();

        assert!(bridged.contains_own_key("font"));
        assert!(!bridged.contains_own_key("shadow"));
        assert!(nested(bridged, "shadow").ptr_eq(&nested(&reference, "shadow")));

        nested(bridged, "font").insert("size", 30);
        assert_eq!(nested(&reference, "font").get("size"), Some(Value::Number(14.0)));
    }

    #[test]
    fn selective_bridge_of_non_record_is_null() {
        assert_eq!(selective_bridge_object(&["a"], &Value::from("x")), Value::Null);
    }
}
