//! Three-valued flags for upstream booleans
//!
//! Upstream menu payloads frequently omit `isVeg`, `inStock` or `isEnabled`.
//! An omitted flag means "the data does not say", which is not the same as
//! `false`, so these fields are modelled as [`TriState`] instead of `bool`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A boolean that may be unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    /// Coerce an upstream field the way a loosely-typed payload means it
    ///
    /// A missing field stays [`TriState::Unknown`]. Any present value is
    /// coerced by truthiness: `null`, `false`, `0`, `NaN` and `""` are false,
    /// everything else (including empty arrays and objects) is true.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => TriState::Unknown,
            Some(v) => TriState::from(truthy(v)),
        }
    }

    /// Whether the value is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, TriState::Unknown)
    }

    /// Treat unknown as the given default
    pub fn unwrap_or(self, default: bool) -> bool {
        match self {
            TriState::True => true,
            TriState::False => false,
            TriState::Unknown => default,
        }
    }

    pub fn as_option(&self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unknown => None,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map(TriState::from).unwrap_or(TriState::Unknown)
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.into())
    }
}

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
