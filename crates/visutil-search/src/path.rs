use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use visutil_types::Value;

use crate::error::SearchError;

/// Selects the value to compare from each record in a sequence: either
/// `item[field]` or `item[field][sub_field]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    field: String,
    sub_field: Option<String>,
}

impl FieldPath {
    /// Select `item[field]`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            sub_field: None,
        }
    }

    /// Select `item[field][sub_field]`.
    pub fn nested(field: impl Into<String>, sub_field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            sub_field: Some(sub_field.into()),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn sub_field(&self) -> Option<&str> {
        self.sub_field.as_deref()
    }

    /// Extract the selected value from `item`. Any missing step, or a step
    /// that is not a record, resolves to [`Value::Null`].
    pub fn resolve(&self, item: &Value) -> Value {
        let first = item.as_record().and_then(|r| r.get(&self.field));
        let selected = match &self.sub_field {
            None => first,
            Some(sub) => first.and_then(|v| v.as_record().and_then(|r| r.get(sub))),
        };
        selected.unwrap_or_default()
    }
}

impl From<&str> for FieldPath {
    fn from(field: &str) -> Self {
        FieldPath::new(field)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_field {
            None => write!(f, "{}", self.field),
            Some(sub) => write!(f, "{}.{}", self.field, sub),
        }
    }
}

impl FromStr for FieldPath {
    type Err = SearchError;

    /// Parse `field` or `field.sub_field`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SearchError::InvalidFieldPath(s.to_string());
        let mut parts = s.split('.');
        let field = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let sub_field = match parts.next() {
            None => None,
            Some(sub) if !sub.is_empty() => Some(sub),
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(match sub_field {
            None => FieldPath::new(field),
            Some(sub) => FieldPath::nested(field, sub),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_single_field() {
        let item = Value::from(json!({"start": 4}));
        assert_eq!(FieldPath::new("start").resolve(&item), Value::from(4));
    }

    #[test]
    fn resolves_nested_field() {
        let item = Value::from(json!({"data": {"start": 9}}));
        assert_eq!(FieldPath::nested("data", "start").resolve(&item), Value::from(9));
    }

    #[test]
    fn missing_steps_resolve_to_null() {
        let item = Value::from(json!({"data": 3}));
        assert_eq!(FieldPath::new("end").resolve(&item), Value::Null);
        assert_eq!(FieldPath::nested("data", "start").resolve(&item), Value::Null);
        assert_eq!(FieldPath::new("x").resolve(&Value::from(1)), Value::Null);
    }

    #[test]
    fn parses_and_displays() {
        let path: FieldPath = "data.start".parse().unwrap();
        assert_eq!(path, FieldPath::nested("data", "start"));
        assert_eq!(path.to_string(), "data.start");
        assert_eq!("start".parse::<FieldPath>().unwrap().sub_field(), None);
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", ".x", "x.", "a.b.c"] {
            assert_eq!(
                bad.parse::<FieldPath>(),
                Err(SearchError::InvalidFieldPath(bad.to_string()))
            );
        }
    }
}
