//! Built-in places used when no geocoder answers.

use crate::model::LocationResult;

lazy_static::lazy_static! {
    /// Searched by display-name substring.
    static ref SEARCHABLE: Vec<LocationResult> = vec![
        LocationResult::new(28.6139, 77.2090, "Asia/Kolkata", "New Delhi, India"),
        LocationResult::new(19.0760, 72.8777, "Asia/Kolkata", "Mumbai, India"),
        LocationResult::new(12.9716, 77.5946, "Asia/Kolkata", "Bangalore, India"),
        LocationResult::new(40.7128, -74.0060, "America/New_York", "New York, USA"),
        LocationResult::new(51.5074, -0.1278, "Europe/London", "London, UK"),
    ];

    /// Looked up by normalized key.
    static ref KEYED: Vec<(&'static str, LocationResult)> = vec![
        ("delhi", LocationResult::new(28.6139, 77.2090, "Asia/Kolkata", "New Delhi, India")),
        ("mumbai", LocationResult::new(19.0760, 72.8777, "Asia/Kolkata", "Mumbai, India")),
        ("bangalore", LocationResult::new(12.9716, 77.5946, "Asia/Kolkata", "Bangalore, India")),
        ("chennai", LocationResult::new(13.0827, 80.2707, "Asia/Kolkata", "Chennai, India")),
        ("kolkata", LocationResult::new(22.5726, 88.3639, "Asia/Kolkata", "Kolkata, India")),
    ];
}

const ALIASES: &[(&str, &str)] = &[
    ("new delhi", "delhi"),
    ("bengaluru", "bangalore"),
    ("bombay", "mumbai"),
    ("madras", "chennai"),
    ("calcutta", "kolkata"),
];

/// Where every unresolvable place and every failed location chain lands.
pub fn default_location() -> LocationResult {
    KEYED[0].1.clone()
}

pub fn search(query: &str) -> Vec<LocationResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    SEARCHABLE
        .iter()
        .filter(|loc| loc.place_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// "Mumbai, Maharashtra" → "mumbai"; "Bengaluru" → "bangalore".
fn normalize_key(place: &str) -> String {
    let head = place.split(',').next().unwrap_or("").trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == head)
        .map(|(_, key)| key.to_string())
        .unwrap_or(head)
}

pub fn lookup(place: &str) -> LocationResult {
    let key = normalize_key(place);
    KEYED
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, loc)| loc.clone())
        .unwrap_or_else(|| {
            log::debug!("gazetteer: no entry for '{}', using default location", place);
            default_location()
        })
}
