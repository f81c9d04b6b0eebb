//! Provider payloads → canonical model. Pure functions; a payload that cannot
//! be mapped yields `Unavailable::Shape` so the caller can substitute fallback data.

pub mod analysis;
pub mod chart;
pub mod coerce;
pub mod location;

use serde_json::Value;

use crate::error::{ProviderResult, Unavailable};

pub use analysis::{normalize_kalsarpa, normalize_manglik, normalize_sade_sati};
pub use chart::{fill_placement_degrees, normalize_chart, normalize_planet_positions};
pub use location::{normalize_geocode, normalize_ip_lookup, reverse_geocode_name};

/// Strip the `{"status": .., "response": ..}` wrapper some providers use.
///
/// A non-2xx `status` inside the body counts as an HTTP failure; the unwrapped
/// body must be a JSON object or array.
pub fn unwrap_envelope(payload: Value) -> ProviderResult<Value> {
    if let Some(status) = payload.get("status").and_then(coerce::as_i64) {
        if !(200..300).contains(&status) {
            return Err(Unavailable::Status(u16::try_from(status).unwrap_or(0)));
        }
    }
    let body = match payload {
        Value::Object(mut map) if map.contains_key("response") => map
            .remove("response")
            .unwrap_or(Value::Null),
        other => other,
    };
    match body {
        Value::Object(_) | Value::Array(_) => Ok(body),
        Value::String(message) => Err(Unavailable::Shape(format!("provider message: {message}"))),
        other => Err(Unavailable::Shape(format!("expected a JSON object, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object_passes_through() {
        let body = json!({"is_manglik": "true"});
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_envelope_is_unwrapped() {
        let wrapped = json!({"status": 200, "response": {"is_manglik": "false"}});
        assert_eq!(unwrap_envelope(wrapped).unwrap(), json!({"is_manglik": "false"}));
    }

    #[test]
    fn test_error_status_in_body() {
        let wrapped = json!({"status": 402, "response": "Out of api calls"});
        assert_eq!(unwrap_envelope(wrapped), Err(Unavailable::Status(402)));
    }

    #[test]
    fn test_scalar_body_is_shape_error() {
        assert!(matches!(unwrap_envelope(json!("oops")), Err(Unavailable::Shape(_))));
        assert!(matches!(unwrap_envelope(json!(null)), Err(Unavailable::Shape(_))));
        assert!(matches!(
            unwrap_envelope(json!({"status": "200", "response": "quota message"})),
            Err(Unavailable::Shape(_))
        ));
    }
}
