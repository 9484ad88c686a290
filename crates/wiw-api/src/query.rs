//! Query-string encoding for list endpoints.

use serde_json::Value;

/// A flat, ordered mapping of query parameters.
pub type Params = serde_json::Map<String, Value>;

/// Encode `params` as `?k=v&...`, form-urlencoded, in insertion order.
///
/// Returns an empty string when there is nothing to encode.
pub fn query_string(params: Option<&Params>) -> String {
    let Some(params) = params.filter(|p| !p.is_empty()) else {
        return String::new();
    };
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &coerce(value));
    }
    format!("?{}", serializer.finish())
}

/// String form of a query value. Arrays are comma-joined element-wise.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let p = params(json!({"b": "2", "a": "1"}));
        assert_eq!(query_string(Some(&p)), "?b=2&a=1");
    }

    #[test]
    fn simple_pairs() {
        let p = params(json!({"a": "1", "b": "2"}));
        assert_eq!(query_string(Some(&p)), "?a=1&b=2");
    }

    #[test]
    fn coerces_scalars_to_strings() {
        let p = params(json!({"location_id": 7, "include_deleted": false, "x": null}));
        assert_eq!(
            query_string(Some(&p)),
            "?location_id=7&include_deleted=false&x=null"
        );
    }

    #[test]
    fn joins_arrays_with_commas() {
        let p = params(json!({"user_id": [1, 2, 3]}));
        assert_eq!(query_string(Some(&p)), "?user_id=1%2C2%2C3");
    }

    #[test]
    fn escapes_reserved_characters() {
        let p = params(json!({"start": "2024-01-01 09:00", "q": "a&b"}));
        assert_eq!(query_string(Some(&p)), "?start=2024-01-01+09%3A00&q=a%26b");
    }

    #[test]
    fn empty_or_missing_params_produce_nothing() {
        assert_eq!(query_string(None), "");
        assert_eq!(query_string(Some(&Params::new())), "");
    }
}
