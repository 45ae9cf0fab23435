//! JSON rendering of parsed records.
//!
//! Each record becomes `{"name": ..., "id": ..., "values": {...}}` with keys in
//! assignment order. Integers and decimals stay distinct.
//!
//! ```
//! use tme_format::{parse, output::to_json};
//!
//! let records = parse("bar 23 {\n a={1, x}\n}").unwrap();
//! assert_eq!(
//!     to_json(&records),
//!     r#"[{"name":"bar","id":23,"values":{"a":[1,"x"]}}]"#
//! );
//! ```

use serde_json::{Map, Value as Json, json};

use crate::{record::Record, value::Value};

pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(arr) => Json::Array(arr.iter().map(value_to_json).collect()),
    }
}

pub fn record_to_json(record: &Record) -> Json {
    let values: Map<String, Json> = record
        .iter()
        .map(|(k, v)| (k.to_string(), value_to_json(v)))
        .collect();

    json!({
        "name": record.name(),
        "id": record.id(),
        "values": values,
    })
}

pub fn records_to_json<'a>(records: impl IntoIterator<Item = &'a Record>) -> Json {
    Json::Array(records.into_iter().map(record_to_json).collect())
}

pub fn to_json(records: &[Record]) -> String {
    records_to_json(records).to_string()
}

pub fn to_json_pretty(records: &[Record]) -> String {
    format!("{:#}", records_to_json(records))
}
