//! Normalization of toggle-able option blocks.
//!
//! Many option groups can be given either as a boolean (`shadow: true`) or as
//! a record (`shadow: {size: 4}`). [`merge_options`] folds both forms into a
//! record that always carries an `enabled` flag.

use tracing::debug;
use visutil_types::{Field, Record, Value};

use crate::error::{MergeError, MergeResult};

const ENABLED: &str = "enabled";

/// Merge the option block `options[key]` into `target[key]`.
///
/// - absent: nothing happens.
/// - boolean: `target[key]` becomes exactly `{enabled: <bool>}`.
/// - null: if `target[key]` is not already a record and `global[key]` is a
///   record, `target[key]` becomes a record reading through to it.
/// - record: its own keys are copied one level deep onto `target[key]`
///   (created if needed), then `enabled` is set from `options[key].enabled`,
///   else `global[key].enabled`, else `true`.
/// - anything else: nothing happens.
///
/// A global record without own keys counts as no global options. Fails if
/// `target`, `options` or `global` is not a record, or if `key` is empty.
pub fn merge_options(
    target: &Value,
    options: &Value,
    key: &str,
    global: Option<&Value>,
) -> MergeResult<()> {
    let target = require_record(target, "target")?;
    let options = require_record(options, "options")?;
    let global = global
        .map(|g| require_record(g, "global options"))
        .transpose()?;
    if key.is_empty() {
        return Err(MergeError::invalid("option name must not be empty"));
    }

    let global_option = global
        .filter(|g| g.own_len() > 0)
        .and_then(|g| g.get(key));
    let global_enabled = global_option
        .as_ref()
        .and_then(Value::as_record)
        .and_then(|g| g.get(ENABLED));

    match options.field(key) {
        Field::Absent => {}
        Field::Present(Value::Bool(enabled)) => {
            let block = Record::new();
            block.insert(ENABLED, enabled);
            target.insert(key, block);
            debug!(option = key, enabled, "option block set from boolean");
        }
        Field::Null => {
            if let Some(Value::Record(_)) = target.get(key) {
                return Ok(());
            }
            if let Some(Value::Record(parent)) = &global_option {
                target.insert(key, Record::with_fallback(parent));
                debug!(option = key, "option block inherits global defaults");
            }
        }
        Field::Present(Value::Record(source)) => {
            let enabled = source
                .get(ENABLED)
                .or(global_enabled)
                .unwrap_or(Value::Bool(true));

            let block = match target.get(key) {
                Some(Value::Record(existing)) => existing,
                _ => {
                    let created = Record::new();
                    target.insert(key, created.clone());
                    created
                }
            };
            for (k, v) in source.own_entries() {
                block.insert(k, v);
            }
            block.insert(ENABLED, enabled);
            debug!(option = key, "option block merged");
        }
        Field::Present(_) => {}
    }
    Ok(())
}

fn require_record<'a>(value: &'a Value, name: &str) -> MergeResult<&'a Record> {
    value.as_record().ok_or_else(|| {
        MergeError::invalid(format!("{name} must be a record, got {}", value.kind()))
    })
}
