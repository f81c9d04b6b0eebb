//! ipgeolocation.io and OpenCage response shapes.

use serde_json::Value;

use super::coerce::{as_f64, as_str, field};
use crate::error::{ProviderResult, Unavailable};
use crate::model::{coordinates_in_range, LocationResult};

const UNKNOWN_TIMEZONE: &str = "UTC";

pub fn normalize_ip_lookup(payload: &Value) -> ProviderResult<LocationResult> {
    let lat = payload.get("latitude").and_then(as_f64);
    let lon = payload.get("longitude").and_then(as_f64);
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(Unavailable::Shape("ip lookup has no coordinates".to_string()));
    };
    if !coordinates_in_range(lat, lon) {
        return Err(Unavailable::Shape(format!("ip lookup coordinates out of range: {lat}, {lon}")));
    }

    let timezone = payload
        .get("time_zone")
        .and_then(|tz| tz.get("name"))
        .and_then(as_str)
        .unwrap_or(UNKNOWN_TIMEZONE);
    let parts: Vec<&str> = ["city", "country_name"]
        .iter()
        .filter_map(|k| payload.get(*k).and_then(as_str))
        .collect();
    let place_name = if parts.is_empty() {
        format!("{lat:.4}, {lon:.4}")
    } else {
        parts.join(", ")
    };

    Ok(LocationResult::new(lat, lon, timezone, &place_name))
}

fn geocode_row(row: &Value) -> Option<LocationResult> {
    let geometry = row.get("geometry")?;
    let lat = geometry.get("lat").and_then(as_f64)?;
    let lon = field(geometry, &["lng", "lon"]).and_then(as_f64)?;
    if !coordinates_in_range(lat, lon) {
        return None;
    }
    let place_name = row.get("formatted").and_then(as_str)?;
    let timezone = row
        .get("annotations")
        .and_then(|a| a.get("timezone"))
        .and_then(|tz| tz.get("name"))
        .and_then(as_str)
        .unwrap_or(UNKNOWN_TIMEZONE);
    Some(LocationResult::new(lat, lon, timezone, place_name))
}

/// Ranked forward-geocode hits, at most `limit`. Malformed rows are skipped.
pub fn normalize_geocode(payload: &Value, limit: usize) -> ProviderResult<Vec<LocationResult>> {
    let rows = payload
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| Unavailable::Shape("geocode response has no results array".to_string()))?;
    Ok(rows.iter().filter_map(geocode_row).take(limit).collect())
}

pub fn reverse_geocode_name(payload: &Value) -> Option<String> {
    payload
        .get("results")?
        .as_array()?
        .iter()
        .find_map(|row| row.get("formatted").and_then(as_str))
        .map(str::to_string)
}
