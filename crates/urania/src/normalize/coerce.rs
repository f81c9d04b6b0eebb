//! Loose provider scalars → typed values. Nothing here fails: unparseable
//! input maps to `false`, `None` or an empty list.

use serde_json::Value;

/// `true`, `"true"`, `"yes"`, `"1"` and non-zero numbers are true. Everything else is false.
pub fn as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    }
}

/// Finite number from a JSON number or numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Integer from a JSON integer, an integral float, or a numeric string.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn as_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Non-blank strings from an array; a lone string becomes a one-item list.
pub fn as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(as_str)
            .map(str::to_string)
            .collect(),
        Value::String(_) => as_str(value).map(|s| vec![s.to_string()]).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// First present field among `keys`.
pub fn field<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| object.get(*k))
        .find(|v| !v.is_null())
}

/// Degree inside a sign. Values of 30 or more are full longitudes and get reduced.
pub fn sign_degree(raw: f64) -> f64 {
    let reduced = raw.rem_euclid(30.0);
    if (0.0..30.0).contains(&reduced) {
        reduced
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_booleans() {
        assert!(as_bool(&json!("true")));
        assert!(as_bool(&json!(" TRUE ")));
        assert!(as_bool(&json!(true)));
        assert!(as_bool(&json!(1)));
        assert!(!as_bool(&json!("false")));
        assert!(!as_bool(&json!("maybe")));
        assert!(!as_bool(&json!(null)));
        assert!(!as_bool(&json!(0)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(as_f64(&json!("12.5")), Some(12.5));
        assert_eq!(as_f64(&json!(7)), Some(7.0));
        assert_eq!(as_f64(&json!("NaN")), None);
        assert_eq!(as_f64(&json!("abc")), None);
        assert_eq!(as_i64(&json!("4")), Some(4));
        assert_eq!(as_i64(&json!(4.0)), Some(4));
        assert_eq!(as_i64(&json!(4.5)), None);
    }

    #[test]
    fn test_string_lists() {
        assert_eq!(as_string_list(&json!(["a", " ", 3, "b"])), vec!["a", "b"]);
        assert_eq!(as_string_list(&json!("single")), vec!["single"]);
        assert!(as_string_list(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_sign_degree() {
        assert_eq!(sign_degree(12.25), 12.25);
        assert_eq!(sign_degree(45.0), 15.0);
        assert_eq!(sign_degree(30.0), 0.0);
        assert_eq!(sign_degree(-5.0), 25.0);
    }
}
