use std::borrow::Cow;

use indexmap::IndexMap;

use crate::value::{Array, LookupError, Value};

/// One top level TME node: `name id { key=value ... }`.
///
/// Keys keep the order they were assigned in; assigning a key twice keeps the
/// position of the first assignment and the value of the last.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    id: i32,
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new(name: impl Into<String>, id: i32) -> Self {
        Record {
            name: name.into(),
            id,
            values: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Last `.` separated segment of the name, `Course` for `jgradebook.data.Course`.
    pub fn kind(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Set `key`, returning the previous value. `Value::Null` means absent and
    /// removes the key instead.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if value.is_null() {
            return self.values.shift_remove(&key);
        }
        self.values.insert(key, value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Result<&Value, LookupError> {
        self.values
            .get(key)
            .ok_or_else(|| LookupError::MissingKey(key.to_string()))
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, LookupError> {
        let value = self.get(key)?;
        extract(value).ok_or_else(|| LookupError::TypeMismatch {
            at: format!("key '{}'", key),
            expected,
            found: value.type_name(),
        })
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, LookupError> {
        self.typed(key, "boolean", Value::as_bool)
    }

    /// Strings as stored, numbers rendered as text (`1337`, `23.42`).
    pub fn get_string(&self, key: &str) -> Result<Cow<'_, str>, LookupError> {
        self.typed(key, "string", |value| match value {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => other.to_text().map(Cow::Owned),
        })
    }

    /// Decimals are truncated toward zero.
    pub fn get_int(&self, key: &str) -> Result<i32, LookupError> {
        self.typed(key, "integer", Value::as_int)
    }

    pub fn get_double(&self, key: &str) -> Result<f64, LookupError> {
        self.typed(key, "decimal", Value::as_float)
    }

    pub fn get_array(&self, key: &str) -> Result<&Array, LookupError> {
        self.typed(key, "array", Value::as_array)
    }
}
