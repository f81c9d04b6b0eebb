use chrono::NaiveDate;
use serde_json::Value;

use super::coerce::{as_bool, as_str, as_string_list, field};
use crate::error::{ProviderResult, Unavailable};
use crate::model::{
    DateRange, Kalsarpa, KalsarpaKind, KalsarpaSeverity, Manglik, ManglikSeverity, Origin,
    SadeSati, SadeSatiPhase,
};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%B %d, %Y"];

fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let raw = value.and_then(as_str)?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// The activity flag is the one field a condition payload cannot do without.
fn activity_flag(payload: &Value, keys: &[&str], condition: &str) -> ProviderResult<bool> {
    field(payload, keys)
        .map(as_bool)
        .ok_or_else(|| Unavailable::Shape(format!("{condition} payload lacks {}", keys[0])))
}

pub fn normalize_sade_sati(payload: &Value) -> ProviderResult<SadeSati> {
    let active = activity_flag(
        payload,
        &["is_undergoing_sade_sati", "sade_sati_active", "is_sade_sati"],
        "sade sati",
    )?;
    if !active {
        return Ok(SadeSati::inactive(Origin::Provider));
    }

    let phase = field(payload, &["sade_sati_phase", "phase"])
        .and_then(as_str)
        .and_then(SadeSatiPhase::parse)
        .filter(|p| *p != SadeSatiPhase::NotActive)
        .unwrap_or(SadeSatiPhase::Starting);

    let start = parse_date(field(payload, &["sade_sati_start_date", "start_date"]));
    let end = parse_date(field(payload, &["sade_sati_end_date", "end_date"]));
    let period = match (start, end) {
        (Some(start), Some(end)) if start <= end => Some(DateRange { start, end }),
        _ => None,
    };

    Ok(SadeSati {
        is_active: true,
        phase,
        period,
        effects: field(payload, &["effects"]).map(as_string_list).unwrap_or_default(),
        remedies: field(payload, &["remedies"]).map(as_string_list).unwrap_or_default(),
        origin: Origin::Provider,
    })
}

pub fn normalize_manglik(payload: &Value) -> ProviderResult<Manglik> {
    let active = activity_flag(payload, &["is_manglik", "manglik_present", "is_mangalik"], "manglik")?;
    if !active {
        return Ok(Manglik::inactive(Origin::Provider));
    }

    let severity = field(payload, &["manglik_intensity", "intensity", "severity"])
        .and_then(as_str)
        .and_then(ManglikSeverity::parse)
        .filter(|s| *s != ManglikSeverity::None)
        .unwrap_or(ManglikSeverity::Low);

    Ok(Manglik {
        is_manglik: true,
        severity,
        affected_areas: field(payload, &["affected_areas", "effects"])
            .map(as_string_list)
            .unwrap_or_default(),
        remedies: field(payload, &["remedies"]).map(as_string_list).unwrap_or_default(),
        origin: Origin::Provider,
    })
}

pub fn normalize_kalsarpa(payload: &Value) -> ProviderResult<Kalsarpa> {
    let active = activity_flag(payload, &["has_kalsarpa_yoga", "is_kalsarpa_present", "has_kalsarpa"], "kalsarpa")?;
    if !active {
        return Ok(Kalsarpa::inactive(Origin::Provider));
    }

    let kind = field(payload, &["kalsarpa_type", "type", "name"])
        .and_then(as_str)
        .and_then(|raw| {
            let parsed = KalsarpaKind::parse(raw);
            if parsed.is_none() {
                log::debug!("normalize: unrecognized kalsarpa type '{}'", raw);
            }
            parsed
        })
        .unwrap_or(KalsarpaKind::None);

    let severity = field(payload, &["severity", "kalsarpa_severity"])
        .and_then(as_str)
        .and_then(KalsarpaSeverity::parse)
        .filter(|s| *s != KalsarpaSeverity::None)
        .unwrap_or(KalsarpaSeverity::Partial);

    Ok(Kalsarpa {
        has_kalsarpa: true,
        kind,
        severity,
        effects: field(payload, &["effects"]).map(as_string_list).unwrap_or_default(),
        remedies: field(payload, &["remedies"]).map(as_string_list).unwrap_or_default(),
        origin: Origin::Provider,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Condition;
    use serde_json::json;

    #[test]
    fn test_active_sade_sati() {
        let payload = json!({
            "is_undergoing_sade_sati": "true",
            "sade_sati_phase": "peak",
            "sade_sati_start_date": "2023-01-17",
            "sade_sati_end_date": "2030-06-03",
            "effects": ["Delays at work"],
            "remedies": ["Recite Shani Chalisa"]
        });
        let sade_sati = normalize_sade_sati(&payload).unwrap();
        assert!(sade_sati.is_active);
        assert_eq!(sade_sati.phase, SadeSatiPhase::Peak);
        let period = sade_sati.period.unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2023, 1, 17).unwrap());
        assert_eq!(sade_sati.effects, vec!["Delays at work"]);
        assert_eq!(sade_sati.origin, Origin::Provider);
    }

    #[test]
    fn test_inactive_drops_provider_lists() {
        let payload = json!({
            "is_undergoing_sade_sati": "false",
            "sade_sati_phase": "peak",
            "remedies": ["Still listed by provider"]
        });
        let sade_sati = normalize_sade_sati(&payload).unwrap();
        assert!(!sade_sati.is_active);
        assert!(sade_sati.is_consistent());
        assert!(sade_sati.remedies.is_empty());
    }

    #[test]
    fn test_reversed_dates_are_dropped() {
        let payload = json!({
            "is_undergoing_sade_sati": true,
            "sade_sati_start_date": "2030-01-01",
            "sade_sati_end_date": "2020-01-01"
        });
        let sade_sati = normalize_sade_sati(&payload).unwrap();
        assert_eq!(sade_sati.period, None);
        assert_eq!(sade_sati.phase, SadeSatiPhase::Starting);
    }

    #[test]
    fn test_manglik_severity_defaults() {
        let manglik = normalize_manglik(&json!({"is_manglik": "true", "manglik_intensity": "???"})).unwrap();
        assert_eq!(manglik.severity, ManglikSeverity::Low);

        let high = normalize_manglik(&json!({
            "is_manglik": "true",
            "manglik_intensity": "High",
            "affected_areas": ["Marriage"]
        }))
        .unwrap();
        assert_eq!(high.severity, ManglikSeverity::High);
        assert_eq!(high.affected_areas, vec!["Marriage"]);

        let none = normalize_manglik(&json!({"is_manglik": "no"})).unwrap();
        assert_eq!(none.severity, ManglikSeverity::None);
        assert!(none.is_consistent());
    }

    #[test]
    fn test_kalsarpa() {
        let kalsarpa = normalize_kalsarpa(&json!({
            "has_kalsarpa_yoga": "true",
            "kalsarpa_type": "Kulik",
            "severity": "complete",
            "remedies": "Perform Kalsarpa Dosh Puja"
        }))
        .unwrap();
        assert_eq!(kalsarpa.kind, KalsarpaKind::Kulik);
        assert_eq!(kalsarpa.severity, KalsarpaSeverity::Complete);
        assert_eq!(kalsarpa.remedies.len(), 1);
    }

    #[test]
    fn test_missing_flag_is_shape_error() {
        assert!(normalize_sade_sati(&json!({"phase": "peak"})).is_err());
        assert!(normalize_manglik(&json!({})).is_err());
        assert!(normalize_kalsarpa(&json!({"kalsarpa_type": "Anant"})).is_err());
    }
}
