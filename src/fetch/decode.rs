use serde_json::Value;

/// Copy a field only when the payload holds a JSON string there.
pub fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Like [`string_field`], but an empty string counts as absent. Optional text
/// columns go through this so `""` and `null` read the same live and from a
/// CSV snapshot, where both are an empty field.
pub fn text_field(entry: &Value, key: &str) -> Option<String> {
    string_field(entry, key).filter(|text| !text.is_empty())
}

/// Copy a field only when the payload holds a JSON number there.
pub fn number_field(entry: &Value, key: &str) -> Option<f64> {
    entry
        .get(key)
        .filter(|value| value.is_number())
        .and_then(Value::as_f64)
}

/// Short description of a JSON value's kind for log messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
