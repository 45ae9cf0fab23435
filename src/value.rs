use std::fmt;

/// A parsed TME value.
///
/// Identifiers become strings, booleans or null after URL decoding, numbers
/// keep the integer/decimal distinction of the lexer, and `{ ... }` becomes an
/// [`Array`].
///
/// # Examples
///
/// ```
/// use tme_format::{Value, parse};
///
/// let records = parse("foo 1 {\n a=1\n b=2.5\n c=true\n d=Hello+World\n}").unwrap();
/// let foo = &records[0];
///
/// assert_eq!(foo.get("a").unwrap(), &Value::Integer(1));
/// assert_eq!(foo.get("b").unwrap(), &Value::Float(2.5));
/// assert_eq!(foo.get("c").unwrap(), &Value::Boolean(true));
/// assert_eq!(foo.get("d").unwrap(), &Value::String("Hello World".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `<null>` marker. Never stored in a record or array.
    Null,

    Boolean(bool),

    /// Decimal number
    Float(f64),

    /// Natural number
    Integer(i32),

    /// URL decoded string
    String(String),

    /// Nested `{ ... }` list
    Array(Array),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Float(_) => "decimal",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as integer, truncating decimals toward zero
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(n) => Some(*n as i32),
            _ => None,
        }
    }

    /// Get as float, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(f64::from(*n)),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Strings as they are, numbers rendered as text. Anything else is `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Float(n) => Some(float_text(*n)),
            _ => None,
        }
    }
}

/// Shortest text that reads back as `n`, laid out like jgradebook prints
/// doubles: plain decimal with at least one fraction digit for magnitudes in
/// `[1e-3, 1e7)`, otherwise `d.dddE<exp>`.
fn float_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", n);
    }

    let scientific = format!("{:e}", n);
    match scientific.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => format!("{}E{}", mantissa, exp),
        Some((mantissa, exp)) => format!("{}.0E{}", mantissa, exp),
        None => scientific,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<null>"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Float(n) => f.write_str(&float_text(*n)),
            Value::Integer(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Array(a) => {
                f.write_str("{")?;
                for (i, item) in a.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Raised by typed accessors when the requested element does not exist or
/// holds a different type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Key not present in the record
    MissingKey(String),

    /// Element exists but holds another type
    TypeMismatch {
        at: String,
        expected: &'static str,
        found: &'static str,
    },

    IndexOutOfBounds { index: usize, len: usize },

    /// No record with this name and id
    MissingRecord { name: String, id: i32 },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::MissingKey(key) => write!(f, "no such element: key '{}' is not set", key),
            LookupError::TypeMismatch {
                at,
                expected,
                found,
            } => write!(
                f,
                "no such element: {} holds a {}, not a {}",
                at, found, expected
            ),
            LookupError::IndexOutOfBounds { index, len } => write!(
                f,
                "no such element: index {} is out of range for array of size {}",
                index, len
            ),
            LookupError::MissingRecord { name, id } => {
                write!(f, "no such element: no node {} with id {}", name, id)
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Returned when pushing `<null>` into an [`Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullElement;

impl fmt::Display for NullElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Null value in array")
    }
}

impl std::error::Error for NullElement {}

/// Ordered list of non-null values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Array::default()
    }

    pub fn push(&mut self, value: Value) -> Result<(), NullElement> {
        if value.is_null() {
            return Err(NullElement);
        }
        self.items.push(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Result<&Value, LookupError> {
        self.items.get(index).ok_or(LookupError::IndexOutOfBounds {
            index,
            len: self.items.len(),
        })
    }

    fn typed<'a, T>(
        &'a self,
        index: usize,
        expected: &'static str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, LookupError> {
        let value = self.get(index)?;
        extract(value).ok_or_else(|| LookupError::TypeMismatch {
            at: format!("index {}", index),
            expected,
            found: value.type_name(),
        })
    }

    pub fn get_bool(&self, index: usize) -> Result<bool, LookupError> {
        self.typed(index, "boolean", Value::as_bool)
    }

    /// Only actual strings; numbers are not converted.
    pub fn get_string(&self, index: usize) -> Result<&str, LookupError> {
        self.typed(index, "string", Value::as_str)
    }

    pub fn get_int(&self, index: usize) -> Result<i32, LookupError> {
        self.typed(index, "integer", Value::as_int)
    }

    pub fn get_double(&self, index: usize) -> Result<f64, LookupError> {
        self.typed(index, "decimal", Value::as_float)
    }

    pub fn get_array(&self, index: usize) -> Result<&Array, LookupError> {
        self.typed(index, "array", Value::as_array)
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
