use serde::{Deserialize, Serialize};

/// Flags controlling [`deep_extend`](crate::deep_extend).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendOptions {
    /// Also merge keys the source inherits through its fallback chain.
    pub proto_extend: bool,
    /// Treat an explicit null in the source as "delete this key". Only
    /// honoured at the level the call starts at; nested records are merged
    /// without it.
    pub allow_deletion: bool,
}

impl ExtendOptions {
    /// Deletion-by-null enabled, inherited keys ignored.
    pub fn with_deletion() -> Self {
        Self {
            allow_deletion: true,
            ..Default::default()
        }
    }

    /// Inherited source keys included, no deletion.
    pub fn with_proto() -> Self {
        Self {
            proto_extend: true,
            ..Default::default()
        }
    }

    /// The options applied one level down: `proto_extend` carries over,
    /// `allow_deletion` does not.
    pub(crate) fn nested(self) -> Self {
        Self {
            allow_deletion: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_plain_merge() {
        let o = ExtendOptions::default();
        assert!(!o.proto_extend);
        assert!(!o.allow_deletion);
    }

    #[test]
    fn nested_drops_deletion_only() {
        let o = ExtendOptions {
            proto_extend: true,
            allow_deletion: true,
        };
        assert_eq!(o.nested(), ExtendOptions::with_proto());
    }

    #[test]
    fn deserializes_partial_config() {
        let o: ExtendOptions = serde_json::from_str(r#"{"allow_deletion": true}"#).unwrap();
        assert_eq!(o, ExtendOptions::with_deletion());
    }
}
