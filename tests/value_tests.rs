// tests/value_tests.rs

use tme_format::{Array, LookupError, NullElement, Record, Value, parse};

fn record(input: &str) -> Record {
    parse(input).unwrap().remove(0)
}

// ============================================================================
// Record accessors
// ============================================================================

#[test]
fn test_missing_key() {
    let o = record("foo 1 {\n a=1\n}");

    assert_eq!(o.get("b"), Err(LookupError::MissingKey("b".into())));
    assert!(o.get_int("b").is_err());
    assert!(o.get_string("b").is_err());
    assert!(o.get_array("b").is_err());
}

#[test]
fn test_type_mismatch() {
    let o = record("foo 1 {\n s=text\n b=true\n n=3\n l={1}\n}");

    assert_eq!(
        o.get_int("s"),
        Err(LookupError::TypeMismatch {
            at: "key 's'".into(),
            expected: "integer",
            found: "string",
        })
    );
    assert!(o.get_bool("n").is_err());
    assert!(o.get_double("b").is_err());
    assert!(o.get_array("n").is_err());
    assert!(o.get_string("b").is_err());
    assert!(o.get_string("l").is_err());
}

#[test]
fn test_record_string_accepts_numbers() {
    let o = record("foo 1 {\n n=1337\n d=23.42\n}");

    assert_eq!(o.get_string("n").unwrap(), "1337");
    assert_eq!(o.get_string("d").unwrap(), "23.42");
}

#[test]
fn test_float_text_layout() {
    let test_cases = vec![
        (23.42, "23.42"),
        (2.0, "2.0"),
        (-0.5, "-0.5"),
        (0.0, "0.0"),
        (0.001, "0.001"),
        (1234567.0, "1234567.0"),
        (1e7, "1.0E7"),
        (12345678.9, "1.23456789E7"),
        (0.0001, "1.0E-4"),
        (1.5e-10, "1.5E-10"),
        (-2.5e21, "-2.5E21"),
    ];

    for (n, expected) in test_cases {
        let value = Value::Float(n);
        assert_eq!(value.to_text().unwrap(), expected, "Failed for {:?}", n);
        assert_eq!(value.to_string(), expected);
    }
}

#[test]
fn test_record_string_renders_large_and_small_decimals() {
    let o = record("foo 1 {\n small=0.0001\n big=10000000.0\n}");

    assert_eq!(o.get_string("small").unwrap(), "1.0E-4");
    assert_eq!(o.get_string("big").unwrap(), "1.0E7");
}

#[test]
fn test_int_truncates_toward_zero() {
    let o = record("foo 1 {\n d=2.99\n}");
    assert_eq!(o.get_int("d").unwrap(), 2);
    assert_eq!(Value::Float(-2.99).as_int(), Some(-2));
}

#[test]
fn test_kind_is_last_name_segment() {
    assert_eq!(Record::new("jgradebook.data.Course", 1).kind(), "Course");
    assert_eq!(Record::new("Plain", 1).kind(), "Plain");
}

#[test]
fn test_iteration_keeps_assignment_order() {
    let o = record("foo 1 {\n z=1\n a=2\n m=3\n}");
    let pairs: Vec<(&str, &Value)> = o.iter().collect();

    assert_eq!(
        pairs,
        vec![
            ("z", &Value::Integer(1)),
            ("a", &Value::Integer(2)),
            ("m", &Value::Integer(3)),
        ]
    );
}

#[test]
fn test_insert_null_removes_key() {
    let mut o = Record::new("foo", 1);
    o.insert("a", Value::Integer(1));
    o.insert("b", Value::Integer(2));

    assert_eq!(o.insert("a", Value::Null), Some(Value::Integer(1)));
    assert!(!o.has("a"));
    assert_eq!(o.len(), 1);
}

// ============================================================================
// Array accessors
// ============================================================================

#[test]
fn test_array_index_out_of_bounds() {
    let o = record("foo 1 {\n l={1, 2}\n}");
    let l = o.get_array("l").unwrap();

    assert_eq!(l.get(2), Err(LookupError::IndexOutOfBounds { index: 2, len: 2 }));
    assert!(l.get_int(5).is_err());
}

#[test]
fn test_array_string_rejects_numbers() {
    let o = record("foo 1 {\n l={1, x, false}\n}");
    let l = o.get_array("l").unwrap();

    assert!(l.get_string(0).is_err());
    assert_eq!(l.get_string(1).unwrap(), "x");
    assert!(!l.get_bool(2).unwrap());
    assert!(l.get_bool(1).is_err());
    assert!(l.get_array(0).is_err());
}

#[test]
fn test_array_rejects_null() {
    let mut array = Array::new();

    assert_eq!(array.push(Value::Null), Err(NullElement));
    assert!(array.push(Value::Integer(1)).is_ok());
    assert_eq!(array.len(), 1);
    assert_eq!(NullElement.to_string(), "Null value in array");
}

#[test]
fn test_lookup_error_messages() {
    let o = record("foo 1 {\n s=text\n}");

    let err = o.get_int("s").unwrap_err();
    assert!(err.to_string().starts_with("no such element"));
    assert_eq!(
        o.get("x").unwrap_err().to_string(),
        "no such element: key 'x' is not set"
    );
}

#[test]
fn test_value_display() {
    let o = record("foo 1 {\n l={1, 2.5, {a, true}}\n}");
    assert_eq!(o.get("l").unwrap().to_string(), "{1, 2.5, {a, true}}");
}
