use crate::value::Value;

/// The result of looking up a key in a [`Record`](crate::Record).
///
/// An explicit `null` in a merge source can mean "delete this key", while an
/// absent key leaves the target alone.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// The key is not present, neither own nor inherited.
    Absent,
    /// The key is present and holds an explicit null.
    Null,
    /// The key is present with a non-null value.
    Present(Value),
}

impl Field {
    /// Returns `true` if the key was not found.
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Returns `true` if the key holds an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// Returns `true` for anything but `Absent`.
    pub fn is_defined(&self) -> bool {
        !self.is_absent()
    }

    /// The non-null value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Convert back into a value. `Null` becomes [`Value::Null`].
    pub fn into_value(self) -> Option<Value> {
        match self {
            Field::Absent => None,
            Field::Null => Some(Value::Null),
            Field::Present(value) => Some(value),
        }
    }
}

impl From<Option<Value>> for Field {
    fn from(value: Option<Value>) -> Self {
        match value {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(value) => Field::Present(value),
        }
    }
}
