// Path-based access over decoded JSON.
// Replaces dotted-attribute access with an explicit accessor.

use serde_json::Value;

/// Walk a decoded JSON value by object keys. Returns `None` as soon as
/// a segment is absent or the current value is not an object.
pub fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}

/// String at `path`, or the fallback.
pub fn str_at<'a>(value: &'a Value, path: &[&str], fallback: &'a str) -> &'a str {
    get_path(value, path)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
}

/// Unsigned integer at `path`, or zero.
pub fn u64_at(value: &Value, path: &[&str]) -> u64 {
    get_path(value, path).and_then(Value::as_u64).unwrap_or(0)
}

/// Boolean at `path`, or false.
pub fn bool_at(value: &Value, path: &[&str]) -> bool {
    get_path(value, path)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_path_walks_nested_objects() {
        let value = json!({
            "watchers": { "totalCount": 7 },
            "owner": { "login": "acme", "id": "x" },
            "name": "svc-a",
        });

        assert_eq!(get_path(&value, &["name"]), Some(&json!("svc-a")));
        assert_eq!(
            get_path(&value, &["watchers", "totalCount"]),
            Some(&json!(7))
        );
        assert_eq!(get_path(&value, &["owner", "login"]), Some(&json!("acme")));
    }

    #[test]
    fn test_get_path_absent_or_non_object() {
        let value = json!({ "name": "svc-a" });

        assert_eq!(get_path(&value, &["missing"]), None);
        assert_eq!(get_path(&value, &["name", "deeper"]), None);
        assert_eq!(get_path(&json!([1, 2]), &["name"]), None);
    }

    #[test]
    fn test_typed_helpers() {
        let value = json!({
            "watchers": { "totalCount": 7 },
            "name": "svc-a",
            "closed": true,
        });

        assert_eq!(str_at(&value, &["name"], "-"), "svc-a");
        assert_eq!(str_at(&value, &["description"], "-"), "-");
        assert_eq!(u64_at(&value, &["watchers", "totalCount"]), 7);
        assert_eq!(u64_at(&value, &["forkCount"]), 0);
        assert!(bool_at(&value, &["closed"]));
        assert!(!bool_at(&value, &["isPinned"]));
    }
}
