//! Verdicts for the three named conditions: Sade Sati (Saturn transit over the
//! natal Moon), Manglik dosha (Mars affliction) and Kalsarpa yoga (all grahas
//! hemmed between Rahu and Ketu).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::chart::Origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SadeSatiPhase {
    Starting,
    Peak,
    Ending,
    NotActive,
}

impl SadeSatiPhase {
    pub const ACTIVE: [SadeSatiPhase; 3] =
        [SadeSatiPhase::Starting, SadeSatiPhase::Peak, SadeSatiPhase::Ending];

    /// Accepts the provider's spellings ("rising"/"setting" included).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "starting" | "rising" | "first" | "first-phase" => Some(Self::Starting),
            "peak" | "second" | "second-phase" => Some(Self::Peak),
            "ending" | "setting" | "third" | "third-phase" => Some(Self::Ending),
            "not-active" | "none" | "inactive" => Some(Self::NotActive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManglikSeverity {
    None,
    Low,
    Medium,
    High,
}

impl ManglikSeverity {
    pub const ACTIVE: [ManglikSeverity; 3] =
        [ManglikSeverity::Low, ManglikSeverity::Medium, ManglikSeverity::High];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" | "mild" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" | "severe" | "strong" => Some(Self::High),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }
}

/// The twelve classical Kalsarpa configurations, named by the house Rahu occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KalsarpaKind {
    None,
    Anant,
    Kulik,
    Vasuki,
    Shankhpal,
    Padma,
    Mahapadma,
    Takshak,
    Karkotak,
    Shankhachur,
    Ghatak,
    Vishdhar,
    Sheshnag,
}

impl KalsarpaKind {
    pub const ACTIVE: [KalsarpaKind; 12] = [
        KalsarpaKind::Anant,
        KalsarpaKind::Kulik,
        KalsarpaKind::Vasuki,
        KalsarpaKind::Shankhpal,
        KalsarpaKind::Padma,
        KalsarpaKind::Mahapadma,
        KalsarpaKind::Takshak,
        KalsarpaKind::Karkotak,
        KalsarpaKind::Shankhachur,
        KalsarpaKind::Ghatak,
        KalsarpaKind::Vishdhar,
        KalsarpaKind::Sheshnag,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let word = raw.trim().to_ascii_lowercase();
        // "Anant Kalsarpa Yoga" and "anant" both name the same kind
        let first = word.split_whitespace().next().unwrap_or("");
        match first {
            "" | "none" => Some(Self::None),
            "anant" | "ananta" => Some(Self::Anant),
            "kulik" | "kulika" => Some(Self::Kulik),
            "vasuki" => Some(Self::Vasuki),
            "shankhpal" | "shankhapal" => Some(Self::Shankhpal),
            "padma" => Some(Self::Padma),
            "mahapadma" => Some(Self::Mahapadma),
            "takshak" | "takshaka" => Some(Self::Takshak),
            "karkotak" | "karkotaka" => Some(Self::Karkotak),
            "shankhachur" | "shankhachood" => Some(Self::Shankhachur),
            "ghatak" | "ghataka" => Some(Self::Ghatak),
            "vishdhar" | "vishdhara" => Some(Self::Vishdhar),
            "sheshnag" | "sheshnaga" => Some(Self::Sheshnag),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KalsarpaSeverity {
    None,
    Partial,
    Complete,
}

impl KalsarpaSeverity {
    pub const ACTIVE: [KalsarpaSeverity; 2] = [KalsarpaSeverity::Partial, KalsarpaSeverity::Complete];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "partial" | "partly" => Some(Self::Partial),
            "complete" | "full" => Some(Self::Complete),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SadeSati {
    pub is_active: bool,
    pub phase: SadeSatiPhase,
    pub period: Option<DateRange>,
    pub effects: Vec<String>,
    pub remedies: Vec<String>,
    pub origin: Origin,
}

impl SadeSati {
    pub fn inactive(origin: Origin) -> Self {
        Self {
            is_active: false,
            phase: SadeSatiPhase::NotActive,
            period: None,
            effects: Vec::new(),
            remedies: Vec::new(),
            origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manglik {
    pub is_manglik: bool,
    pub severity: ManglikSeverity,
    pub affected_areas: Vec<String>,
    pub remedies: Vec<String>,
    pub origin: Origin,
}

impl Manglik {
    pub fn inactive(origin: Origin) -> Self {
        Self {
            is_manglik: false,
            severity: ManglikSeverity::None,
            affected_areas: Vec::new(),
            remedies: Vec::new(),
            origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kalsarpa {
    pub has_kalsarpa: bool,
    pub kind: KalsarpaKind,
    pub severity: KalsarpaSeverity,
    pub effects: Vec<String>,
    pub remedies: Vec<String>,
    pub origin: Origin,
}

impl Kalsarpa {
    pub fn inactive(origin: Origin) -> Self {
        Self {
            has_kalsarpa: false,
            kind: KalsarpaKind::None,
            severity: KalsarpaSeverity::None,
            effects: Vec::new(),
            remedies: Vec::new(),
            origin,
        }
    }
}

/// Shared view over the three verdicts.
pub trait Condition {
    fn is_active(&self) -> bool;
    fn effects(&self) -> &[String];
    fn remedies(&self) -> &[String];
    fn origin(&self) -> Origin;
    /// Whether the severity/phase field holds its inactive sentinel.
    fn has_inactive_marker(&self) -> bool;

    /// An inactive verdict carries the sentinel and nothing else.
    fn is_consistent(&self) -> bool {
        self.is_active()
            || (self.has_inactive_marker() && self.effects().is_empty() && self.remedies().is_empty())
    }
}

impl Condition for SadeSati {
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn effects(&self) -> &[String] {
        &self.effects
    }
    fn remedies(&self) -> &[String] {
        &self.remedies
    }
    fn origin(&self) -> Origin {
        self.origin
    }
    fn has_inactive_marker(&self) -> bool {
        self.phase == SadeSatiPhase::NotActive && self.period.is_none()
    }
}

impl Condition for Manglik {
    fn is_active(&self) -> bool {
        self.is_manglik
    }
    fn effects(&self) -> &[String] {
        &self.affected_areas
    }
    fn remedies(&self) -> &[String] {
        &self.remedies
    }
    fn origin(&self) -> Origin {
        self.origin
    }
    fn has_inactive_marker(&self) -> bool {
        self.severity == ManglikSeverity::None
    }
}

impl Condition for Kalsarpa {
    fn is_active(&self) -> bool {
        self.has_kalsarpa
    }
    fn effects(&self) -> &[String] {
        &self.effects
    }
    fn remedies(&self) -> &[String] {
        &self.remedies
    }
    fn origin(&self) -> Origin {
        self.origin
    }
    fn has_inactive_marker(&self) -> bool {
        self.kind == KalsarpaKind::None && self.severity == KalsarpaSeverity::None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstrologyAnalysis {
    pub sadesati: SadeSati,
    pub manglik: Manglik,
    pub kalsarpa: Kalsarpa,
}

impl AstrologyAnalysis {
    pub fn conditions(&self) -> [&dyn Condition; 3] {
        [&self.sadesati, &self.manglik, &self.kalsarpa]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_constructors_are_consistent() {
        assert!(SadeSati::inactive(Origin::Fallback).is_consistent());
        assert!(Manglik::inactive(Origin::Fallback).is_consistent());
        assert!(Kalsarpa::inactive(Origin::Provider).is_consistent());
    }

    #[test]
    fn test_inactive_with_remedies_is_inconsistent() {
        let mut manglik = Manglik::inactive(Origin::Provider);
        manglik.remedies.push("Fast on Tuesdays".to_string());
        assert!(!manglik.is_consistent());
    }

    #[test]
    fn test_phase_spellings() {
        assert_eq!(SadeSatiPhase::parse("Rising"), Some(SadeSatiPhase::Starting));
        assert_eq!(SadeSatiPhase::parse("not_active"), Some(SadeSatiPhase::NotActive));
        assert_eq!(SadeSatiPhase::parse("peak"), Some(SadeSatiPhase::Peak));
        assert_eq!(SadeSatiPhase::parse("sideways"), None);
    }

    #[test]
    fn test_kalsarpa_kind_from_long_name() {
        assert_eq!(KalsarpaKind::parse("Vasuki Kalsarpa Yoga"), Some(KalsarpaKind::Vasuki));
        assert_eq!(KalsarpaKind::parse("None"), Some(KalsarpaKind::None));
        assert_eq!(KalsarpaKind::parse("Basilisk"), None);
    }

    #[test]
    fn test_phase_serializes_kebab_case() {
        let json = serde_json::to_string(&SadeSatiPhase::NotActive).unwrap();
        assert_eq!(json, "\"not-active\"");
    }
}
