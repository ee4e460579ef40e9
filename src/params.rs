//! Query-parameter normalization and wire serialization.
//!
//! Read-style requests (GET, HEAD) get their parameters cleaned before
//! dispatch: null and empty-string fields are dropped, remaining string
//! values are trimmed. Write bodies are never touched. Array values
//! serialize as repeated keys (`key=a&key=b`) -- callers depend on this
//! wire format, so it is a contract, not an implementation detail.

use serde_json::{Map, Value};

/// Query parameters: a JSON object mapping keys to scalars, arrays,
/// or nested objects.
pub type Params = Map<String, Value>;

/// Recursively trim string values, descending into arrays and objects.
/// Non-string scalars pass through unchanged.
pub fn trim_params(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Array(items) => Value::Array(items.into_iter().map(trim_params).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, trim_params(item)))
                .collect(),
        ),
        other => other,
    }
}

/// Drop top-level keys whose value is null or the empty string.
///
/// Shallow on purpose: nested objects keep their empty fields, matching
/// what backends expect for structured filter arguments.
pub fn omit_nil(map: Params) -> Params {
    map.into_iter()
        .filter(|(_, value)| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
        .collect()
}

/// Normalize read-verb parameters: strip nil/empty fields, then trim
/// what survives.
pub fn normalize(map: Params) -> Params {
    match trim_params(Value::Object(omit_nil(map))) {
        Value::Object(map) => map,
        // trim_params maps objects to objects
        _ => Params::new(),
    }
}

/// Flatten a parameter map into wire pairs.
///
/// Arrays repeat their key once per element. Nested objects flatten to
/// bracketed keys (`filter[name]=x`). Null leaves are skipped.
pub fn to_query_pairs(map: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in map {
        push_pairs(&mut pairs, key, value);
    }
    pairs
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for item in items {
                push_pairs(pairs, key, item);
            }
        }
        Value::Object(map) => {
            for (nested_key, item) in map {
                push_pairs(pairs, &format!("{}[{}]", key, nested_key), item);
            }
        }
        other => pairs.push((key.to_string(), other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn trim_params_trims_nested_strings() {
        let trimmed = trim_params(json!({
            "name": "  web-server  ",
            "tags": [" a ", "b"],
            "filter": { "status": " ACTIVE " },
            "limit": 10,
        }));
        assert_eq!(
            trimmed,
            json!({
                "name": "web-server",
                "tags": ["a", "b"],
                "filter": { "status": "ACTIVE" },
                "limit": 10,
            })
        );
    }

    #[test]
    fn omit_nil_drops_null_and_empty_fields() {
        let cleaned = omit_nil(params(json!({
            "a": "x",
            "b": null,
            "c": "",
            "d": 0,
            "e": false,
        })));
        assert_eq!(cleaned, params(json!({ "a": "x", "d": 0, "e": false })));
    }

    #[test]
    fn normalize_matches_wire_contract() {
        let normalized = normalize(params(json!({
            "a": " x ",
            "b": null,
            "c": "",
            "d": [1, 2],
        })));
        let pairs = to_query_pairs(&normalized);
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "x".to_string()),
                ("d".to_string(), "1".to_string()),
                ("d".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn arrays_serialize_as_repeated_keys() {
        let pairs = to_query_pairs(&params(json!({ "status": ["ACTIVE", "SHUTOFF"] })));
        assert_eq!(
            pairs,
            vec![
                ("status".to_string(), "ACTIVE".to_string()),
                ("status".to_string(), "SHUTOFF".to_string()),
            ]
        );
    }

    #[test]
    fn nested_objects_serialize_with_bracketed_keys() {
        let pairs = to_query_pairs(&params(json!({ "filter": { "name": "db", "zone": "az1" } })));
        assert_eq!(
            pairs,
            vec![
                ("filter[name]".to_string(), "db".to_string()),
                ("filter[zone]".to_string(), "az1".to_string()),
            ]
        );
    }

    #[test]
    fn scalars_serialize_unquoted() {
        let pairs = to_query_pairs(&params(json!({ "limit": 25, "deep": true })));
        assert_eq!(
            pairs,
            vec![
                ("deep".to_string(), "true".to_string()),
                ("limit".to_string(), "25".to_string()),
            ]
        );
    }
}
