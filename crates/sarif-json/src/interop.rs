//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! Integers that fit in 32 bits become Int; every other number becomes a
//! Double. In the other direction Float and Double map to JSON floats, and
//! non-finite values (which JSON cannot represent) map to null.

use crate::array::Array;
use crate::object::Object;
use crate::value::Value;
use serde_json::{Map, Number, Value as JsonValue};

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => from_number(n),
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Value::from(&json)
    }
}

fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
        return Value::Int(i);
    }
    n.as_f64().map_or(Value::Null, Value::Double)
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::Number(Number::from(*i)),
            Value::Float(f) => float_to_json(f64::from(*f)),
            Value::Double(d) => float_to_json(*d),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(arr) => JsonValue::Array(array_to_json(arr)),
            Value::Object(obj) => {
                let mut map = Map::new();
                for (key, member) in obj {
                    map.insert(key.clone(), JsonValue::from(member));
                }
                JsonValue::Object(map)
            }
        }
    }
}

fn array_to_json(arr: &Array) -> Vec<JsonValue> {
    arr.iter().map(JsonValue::from).collect()
}

fn float_to_json(d: f64) -> JsonValue {
    Number::from_f64(d).map_or(JsonValue::Null, JsonValue::Number)
}
