use tracing::debug;
use visutil_merge::{
    bridge_record, merge_options, selective_not_deep_extend, MergeError, MergeResult,
};
use visutil_types::{Record, Value};

/// A component's options, kept as an overlay over shared defaults.
///
/// Keys the component never sets keep tracking the defaults record. Updates
/// are applied with deletion enabled, so an explicit null at the top level
/// drops the override and the default shows through again. Toggle groups
/// (blocks such as `shadow` that also accept a plain boolean) are routed
/// through [`merge_options`] so they always carry an `enabled` flag.
#[derive(Debug)]
pub struct OptionSet {
    defaults: Record,
    options: Record,
    toggles: Vec<String>,
}

impl OptionSet {
    /// Create an option set over `defaults` with the given toggle groups.
    pub fn new<I, S>(defaults: Record, toggles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = bridge_record(&defaults);
        Self {
            defaults,
            options,
            toggles: toggles.into_iter().map(Into::into).collect(),
        }
    }

    /// The shared defaults.
    pub fn defaults(&self) -> &Record {
        &self.defaults
    }

    /// The effective options record.
    pub fn options(&self) -> &Record {
        &self.options
    }

    /// Resolve one option, falling back to the defaults.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.options.get(key)
    }

    /// Apply a user update.
    ///
    /// A null update is ignored. Lists are rejected with
    /// [`MergeError::ListSource`] and other non-record updates with
    /// [`MergeError::InvalidArgument`]; neither touches the options.
    pub fn apply(&self, update: &Value) -> MergeResult<()> {
        match update {
            Value::Null => return Ok(()),
            Value::Record(_) => {}
            Value::List(_) => return Err(MergeError::ListSource),
            other => {
                return Err(MergeError::invalid(format!(
                    "option update must be a record, got {}",
                    other.kind()
                )))
            }
        }

        let keys = update.as_record().map(Record::own_keys).unwrap_or_default();
        self.rebridge(&keys);
        selective_not_deep_extend(&self.toggles, &self.options, update, true)?;
        self.rebridge(&keys);

        let target = Value::Record(self.options.clone());
        let defaults = Value::Record(self.defaults.clone());
        for toggle in &self.toggles {
            merge_options(&target, update, toggle, Some(&defaults))?;
        }
        debug!(toggles = self.toggles.len(), "options updated");
        Ok(())
    }

    /// Give each listed key that only resolves to a defaults record its own
    /// bridged overlay, so nested merges never land in the defaults.
    fn rebridge(&self, keys: &[String]) {
        for key in keys {
            if self.options.contains_own_key(key) {
                continue;
            }
            if let Some(Value::Record(nested)) = self.defaults.get(key) {
                self.options.insert(key.as_str(), bridge_record(&nested));
            }
        }
    }

    /// Drop every override and start tracking the defaults again.
    pub fn reset(&mut self) {
        self.options = bridge_record(&self.defaults);
    }
}
