use crate::MeasurementValue;

use serde_json::json;

#[test]
fn test_integer_stays_integer_on_the_wire() {
    let value = MeasurementValue::Integer(60);
    assert_eq!(serde_json::to_value(&value).unwrap(), json!(60));
}

#[test]
fn test_float_stays_float_on_the_wire() {
    let value = MeasurementValue::Float(23.5);
    assert_eq!(serde_json::to_value(&value).unwrap(), json!(23.5));
}

#[test]
fn test_text_stays_text_on_the_wire() {
    let value = MeasurementValue::Text("good".to_string());
    assert_eq!(serde_json::to_value(&value).unwrap(), json!("good"));
}

#[test]
fn test_deserialize_prefers_integer_over_float() {
    let value: MeasurementValue = serde_json::from_value(json!(60)).unwrap();
    assert_eq!(value, MeasurementValue::Integer(60));

    let value: MeasurementValue = serde_json::from_value(json!(23.5)).unwrap();
    assert_eq!(value, MeasurementValue::Float(23.5));
}

#[test]
fn test_numeric_string_is_not_a_number() {
    let value: MeasurementValue = serde_json::from_value(json!("23.5")).unwrap();
    assert_eq!(value, MeasurementValue::Text("23.5".to_string()));
    assert!(!value.is_numeric());
}
