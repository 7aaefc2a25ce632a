use std::collections::BTreeMap;

/// Value for a single query parameter.
///
/// `Null` marks a parameter the caller passed as absent (e.g. an
/// `Option::None` filter); it is never transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Null,
}

impl ParamValue {
    /// Wire representation, or `None` for values that must be dropped.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

/// Bound query state for one resource instance, keyed by wire key.
#[derive(Debug, Clone, Default)]
pub(crate) struct Params {
    inner: BTreeMap<&'static str, ParamValue>,
}

impl Params {
    pub(crate) fn insert(&mut self, wire_key: &'static str, value: ParamValue) {
        // Null merges as a no-op so optional filters can be passed through.
        if !value.is_null() {
            self.inner.insert(wire_key, value);
        }
    }

    pub(crate) fn contains(&self, wire_key: &str) -> bool {
        self.inner.contains_key(wire_key)
    }

    /// Final query pairs, nulls already filtered out.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        self.inner
            .iter()
            .filter_map(|(k, v)| v.to_query_value().map(|s| (*k, s)))
            .collect()
    }
}
