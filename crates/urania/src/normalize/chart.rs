//! Chart-variant and planet-detail payloads.
//!
//! Chart payloads carry `chart_data`: house "1".."12" → planet codes (or an
//! array of twelve such lists), plus optional `houses[]` / `ascendant_sign`.
//! Planet payloads carry `planet_details` as an array or an index-keyed object.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::coerce::{as_bool, as_f64, as_i64, as_str, field, sign_degree};
use crate::error::{ProviderResult, Unavailable};
use crate::model::{
    houses_from, ChartDocument, ChartVariant, House, Origin, Planet, PlanetPlacement,
    PlanetPosition, Sign,
};

const BASE_STRENGTH: u8 = 50;
const STRENGTH_PER_OCCUPANT: u8 = 10;

/// Planet reference inside a house list: a code, a name, or an object with either.
fn placement_entry(entry: &Value) -> Option<(Planet, Option<f64>)> {
    match entry {
        Value::Object(_) => {
            let planet = field(entry, &["planet", "name", "full_name"])
                .and_then(as_str)
                .and_then(Planet::parse)
                .or_else(|| field(entry, &["id", "code"]).and_then(as_i64).and_then(Planet::from_code))?;
            let degree = field(entry, &["degree", "local_degree"]).and_then(as_f64).map(sign_degree);
            Some((planet, degree))
        }
        Value::String(s) => Planet::parse(s)
            .or_else(|| as_i64(entry).and_then(Planet::from_code))
            .map(|p| (p, None))
            .or_else(|| {
                log::debug!("normalize: dropping unknown planet reference '{}'", s);
                None
            }),
        _ => as_i64(entry).and_then(Planet::from_code).map(|p| (p, None)),
    }
}

/// `(house number, entries)` pairs from either an object or a twelve-slot array.
fn house_lists(chart_data: &Value) -> Option<Vec<(u8, Vec<Value>)>> {
    let list_of = |v: &Value| match v {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        single => vec![single.clone()],
    };
    match chart_data {
        Value::Object(map) => Some(
            (1..=12u8)
                .map(|n| (n, map.get(&n.to_string()).map(list_of).unwrap_or_default()))
                .collect(),
        ),
        Value::Array(slots) if slots.len() == 12 => Some(
            slots
                .iter()
                .enumerate()
                .map(|(i, slot)| (i as u8 + 1, list_of(slot)))
                .collect(),
        ),
        _ => None,
    }
}

fn has_house_keys(map: &Map<String, Value>) -> bool {
    (1..=12).any(|n| map.contains_key(&n.to_string()))
}

/// House-level overrides the provider may send: `{house|number, sign, strength}`.
fn apply_house_overrides(houses: &mut [House], overrides: &Value) {
    let Some(entries) = overrides.as_array() else {
        return;
    };
    for entry in entries {
        let Some(number) = field(entry, &["house", "number"]).and_then(as_i64) else {
            continue;
        };
        let Some(house) = houses.iter_mut().find(|h| i64::from(h.number) == number) else {
            continue;
        };
        if let Some(sign) = field(entry, &["sign", "sign_name", "zodiac"]).and_then(as_str).and_then(Sign::parse) {
            *house = House::new(house.number, sign, house.strength);
        }
        if let Some(strength) = field(entry, &["strength"]).and_then(as_f64) {
            house.strength = strength.round().clamp(1.0, 100.0) as u8;
        }
    }
}

pub fn normalize_chart(variant: ChartVariant, payload: &Value) -> ProviderResult<ChartDocument> {
    let chart_data = match payload.get("chart_data") {
        Some(data) => data,
        None => match payload {
            Value::Object(map) if has_house_keys(map) => payload,
            Value::Array(_) => payload,
            _ => return Err(Unavailable::Shape(format!("{} chart has no chart_data", variant.label()))),
        },
    };
    let lists = house_lists(chart_data).ok_or_else(|| {
        Unavailable::Shape(format!("{} chart_data is neither a house map nor 12 slots", variant.label()))
    })?;

    let first_sign = field(payload, &["ascendant_sign", "ascendant"])
        .and_then(as_str)
        .and_then(Sign::parse)
        .unwrap_or(Sign::Aries);

    // Occupancy decides strength unless the provider scores houses itself.
    let mut seen = HashSet::new();
    let mut occupants: Vec<(u8, Planet, Option<f64>)> = Vec::new();
    for (number, entries) in &lists {
        for entry in entries {
            if let Some((planet, degree)) = placement_entry(entry) {
                if seen.insert(planet) {
                    occupants.push((*number, planet, degree));
                }
            }
        }
    }
    let mut strengths = [BASE_STRENGTH; 12];
    for (number, _, _) in &occupants {
        let slot = &mut strengths[*number as usize - 1];
        *slot = slot.saturating_add(STRENGTH_PER_OCCUPANT).min(100);
    }

    let mut houses = houses_from(first_sign, strengths);
    if let Some(overrides) = payload.get("houses") {
        apply_house_overrides(&mut houses, overrides);
    }

    let planets = occupants
        .into_iter()
        .map(|(number, planet, degree)| PlanetPlacement {
            planet,
            house: number,
            sign: houses[number as usize - 1].sign,
            degree: degree.unwrap_or(0.0),
        })
        .collect();

    Ok(ChartDocument {
        variant,
        houses,
        planets,
        origin: Origin::Provider,
    })
}

fn position_entry(code: Option<i64>, entry: &Value) -> Option<PlanetPosition> {
    if !entry.is_object() {
        return None;
    }
    // A name wins over the index; a name outside the nine bodies (e.g. "Ascendant") drops the row.
    let named = field(entry, &["full_name", "planet", "name"]).and_then(as_str);
    let planet = match named {
        Some(name) => match Planet::parse(name) {
            Some(p) => p,
            None if code.is_some() && field(entry, &["full_name", "planet"]).is_none() => {
                // Short codes like "Su" only come with an index we can trust.
                code.and_then(Planet::from_code)?
            }
            None => return None,
        },
        None => code.and_then(Planet::from_code)?,
    };

    let raw_degree = field(entry, &["degree", "local_degree", "normDegree"]).and_then(as_f64);
    let longitude = field(entry, &["global_degree", "fullDegree", "longitude"]).and_then(as_f64);
    let degree = raw_degree.or(longitude).map(sign_degree).unwrap_or(0.0);

    let sign = field(entry, &["sign", "zodiac", "rasi"])
        .and_then(as_str)
        .and_then(Sign::parse)
        .or_else(|| longitude.map(Sign::from_longitude))
        .or_else(|| raw_degree.filter(|d| *d >= 30.0).map(Sign::from_longitude))
        .unwrap_or(Sign::Aries);

    let house = field(entry, &["house"])
        .and_then(as_i64)
        .filter(|h| (1..=12).contains(h))
        .unwrap_or(1) as u8;

    let is_retrograde = field(entry, &["is_retrograde", "retro", "isRetro"])
        .map(as_bool)
        .unwrap_or(false);

    Some(PlanetPosition {
        planet,
        sign,
        degree,
        house,
        is_retrograde,
    })
}

pub fn normalize_planet_positions(payload: &Value) -> ProviderResult<Vec<PlanetPosition>> {
    let details = payload.get("planet_details").unwrap_or(payload);
    let rows: Vec<(Option<i64>, &Value)> = match details {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (Some(i as i64), v))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| k.parse::<i64>().ok().map(|code| (Some(code), v)))
            .collect(),
        _ => Vec::new(),
    };

    let mut positions: Vec<PlanetPosition> = Vec::new();
    for (code, entry) in rows {
        if let Some(position) = position_entry(code, entry) {
            if positions.iter().all(|p| p.planet != position.planet) {
                positions.push(position);
            }
        }
    }
    if positions.is_empty() {
        return Err(Unavailable::Shape("planet_details has no usable rows".to_string()));
    }
    positions.sort_by_key(|p| p.planet);
    Ok(positions)
}

/// Chart payloads carry no degrees; the primary chart borrows them from the planet details.
pub fn fill_placement_degrees(document: &mut ChartDocument, positions: &[PlanetPosition]) {
    for placement in document.planets.iter_mut().filter(|p| p.degree == 0.0) {
        if let Some(position) = positions.iter().find(|p| p.planet == placement.planet) {
            placement.degree = position.degree;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_house_map_with_codes() {
        let payload = json!({"chart_data": {"1": [0, 4], "5": ["2"], "7": [42], "12": []}});
        let chart = normalize_chart(ChartVariant::Primary, &payload).unwrap();
        assert!(chart.is_well_formed());
        assert_eq!(chart.origin, Origin::Provider);
        assert_eq!(chart.houses[0].sign, Sign::Aries);
        assert_eq!(chart.planets.len(), 3);
        assert_eq!(chart.planets[0].planet, Planet::Sun);
        assert_eq!(chart.planets[1].planet, Planet::Jupiter);
        assert_eq!(chart.planets[2].planet, Planet::Mars);
        assert_eq!(chart.planets[2].sign, Sign::Leo);
        assert_eq!(chart.house(1).unwrap().strength, 70);
        assert_eq!(chart.house(2).unwrap().strength, 50);
    }

    #[test]
    fn test_ascendant_rotates_houses() {
        let payload = json!({"ascendant_sign": "Leo", "chart_data": {"1": [1]}});
        let chart = normalize_chart(ChartVariant::Navamsa, &payload).unwrap();
        assert_eq!(chart.houses[0].sign, Sign::Leo);
        assert_eq!(chart.houses[0].lord, Planet::Sun);
        assert_eq!(chart.planets[0].sign, Sign::Leo);
    }

    #[test]
    fn test_house_overrides() {
        let payload = json!({
            "chart_data": [[], [], [], [], [], [], [], [], [], [], [], ["8"]],
            "houses": [{"house": "12", "sign": "pisces", "strength": "88"}, {"house": 40, "sign": "Leo"}]
        });
        let chart = normalize_chart(ChartVariant::Primary, &payload).unwrap();
        assert!(chart.is_well_formed());
        assert_eq!(chart.house(12).unwrap().strength, 88);
        assert_eq!(chart.planets[0].planet, Planet::Ketu);
        assert_eq!(chart.planets[0].house, 12);
    }

    #[test]
    fn test_missing_chart_data_is_shape_error() {
        assert!(normalize_chart(ChartVariant::Primary, &json!({"svg": "<svg/>"})).is_err());
        assert!(normalize_chart(ChartVariant::Primary, &json!({"chart_data": [1, 2]})).is_err());
    }

    #[test]
    fn test_positions_from_array() {
        let payload = json!({"planet_details": [
            {"sign": "Leo", "degree": "12.5", "house": "5", "is_retrograde": "false"},
            {"sign": "cancer", "degree": "not a number", "house": "x", "is_retrograde": "true"}
        ]});
        let positions = normalize_planet_positions(&payload).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].planet, Planet::Sun);
        assert_eq!(positions[0].degree, 12.5);
        assert_eq!(positions[0].house, 5);
        assert!(!positions[0].is_retrograde);
        assert_eq!(positions[1].planet, Planet::Moon);
        assert_eq!(positions[1].sign, Sign::Cancer);
        assert_eq!(positions[1].degree, 0.0);
        assert_eq!(positions[1].house, 1);
        assert!(positions[1].is_retrograde);
    }

    #[test]
    fn test_positions_from_keyed_object() {
        let payload = json!({
            "0": {"name": "As", "full_name": "Ascendant", "global_degree": 130.0, "house": 1},
            "1": {"name": "Su", "full_name": "Sun", "global_degree": 45.5, "house": 10, "retro": false},
            "7": {"name": "Ra", "full_name": "Rahu", "local_degree": 3.25, "zodiac": "Pisces", "house": 8, "retro": true},
            "12": {"sign": "Leo"}
        });
        let positions = normalize_planet_positions(&payload).unwrap();
        let planets: Vec<Planet> = positions.iter().map(|p| p.planet).collect();
        assert_eq!(planets, vec![Planet::Sun, Planet::Rahu]);
        assert_eq!(positions[0].sign, Sign::Taurus);
        assert_eq!(positions[0].degree, 15.5);
        assert_eq!(positions[1].sign, Sign::Pisces);
        assert!(positions[1].is_retrograde);
    }

    #[test]
    fn test_empty_details_is_shape_error() {
        assert!(normalize_planet_positions(&json!({"planet_details": []})).is_err());
        assert!(normalize_planet_positions(&json!({"other": 1})).is_err());
    }

    #[test]
    fn test_fill_placement_degrees() {
        let mut chart = normalize_chart(ChartVariant::Primary, &json!({"chart_data": {"3": [1]}})).unwrap();
        let positions = vec![PlanetPosition {
            planet: Planet::Moon,
            sign: Sign::Gemini,
            degree: 21.75,
            house: 3,
            is_retrograde: false,
        }];
        fill_placement_degrees(&mut chart, &positions);
        assert_eq!(chart.planets[0].degree, 21.75);
    }
}
