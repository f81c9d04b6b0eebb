use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{
    AstrologyAnalysis, DateRange, Kalsarpa, KalsarpaKind, KalsarpaSeverity, Manglik, ManglikSeverity,
    Origin, SadeSati, SadeSatiPhase,
};

// Activity odds. Only the inactive shape is contractual, so these are free to change.
const SADE_SATI_CHANCE: f64 = 0.4;
const MANGLIK_CHANCE: f64 = 0.3;
const KALSARPA_CHANCE: f64 = 0.2;

const SADE_SATI_EFFECTS: &[&str] = &[
    "Career challenges and professional obstacles",
    "Financial constraints and delayed payments",
    "Health issues related to stress and anxiety",
];
const SADE_SATI_REMEDIES: &[&str] = &[
    "Worship Lord Hanuman every Saturday",
    "Donate black sesame seeds and mustard oil",
    "Recite Shani Chalisa daily",
];
const MANGLIK_AREAS: &[&str] = &[
    "Delays in marriage and relationship issues",
    "Conflicts with spouse and family members",
];
const MANGLIK_REMEDIES: &[&str] = &[
    "Perform Mangal Dosh Puja on Tuesdays",
    "Fast on Tuesdays and offer prayers to Lord Hanuman",
];
const KALSARPA_EFFECTS: &[&str] = &["Sudden ups and downs in life", "Delays in achieving goals"];
const KALSARPA_REMEDIES: &[&str] = &[
    "Perform Kalsarpa Dosh Puja",
    "Recite Maha Mrityunjaya Mantra daily",
];
const KALSARPA_KINDS: &[KalsarpaKind] = &[KalsarpaKind::Anant, KalsarpaKind::Kulik, KalsarpaKind::Vasuki];

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn sade_sati_period() -> Option<DateRange> {
    Some(DateRange {
        start: NaiveDate::from_ymd_opt(2023, 6, 15)?,
        end: NaiveDate::from_ymd_opt(2026, 3, 20)?,
    })
}

pub fn synthesize_sade_sati<R: Rng>(rng: &mut R) -> SadeSati {
    if !rng.gen_bool(SADE_SATI_CHANCE) {
        return SadeSati::inactive(Origin::Fallback);
    }
    SadeSati {
        is_active: true,
        phase: *SadeSatiPhase::ACTIVE.choose(rng).unwrap_or(&SadeSatiPhase::Starting),
        period: sade_sati_period(),
        effects: owned(SADE_SATI_EFFECTS),
        remedies: owned(SADE_SATI_REMEDIES),
        origin: Origin::Fallback,
    }
}

pub fn synthesize_manglik<R: Rng>(rng: &mut R) -> Manglik {
    if !rng.gen_bool(MANGLIK_CHANCE) {
        return Manglik::inactive(Origin::Fallback);
    }
    Manglik {
        is_manglik: true,
        severity: *ManglikSeverity::ACTIVE.choose(rng).unwrap_or(&ManglikSeverity::Low),
        affected_areas: owned(MANGLIK_AREAS),
        remedies: owned(MANGLIK_REMEDIES),
        origin: Origin::Fallback,
    }
}

pub fn synthesize_kalsarpa<R: Rng>(rng: &mut R) -> Kalsarpa {
    if !rng.gen_bool(KALSARPA_CHANCE) {
        return Kalsarpa::inactive(Origin::Fallback);
    }
    Kalsarpa {
        has_kalsarpa: true,
        kind: *KALSARPA_KINDS.choose(rng).unwrap_or(&KalsarpaKind::Anant),
        severity: *KalsarpaSeverity::ACTIVE.choose(rng).unwrap_or(&KalsarpaSeverity::Partial),
        effects: owned(KALSARPA_EFFECTS),
        remedies: owned(KALSARPA_REMEDIES),
        origin: Origin::Fallback,
    }
}

pub fn synthesize_analysis<R: Rng>(rng: &mut R) -> AstrologyAnalysis {
    AstrologyAnalysis {
        sadesati: synthesize_sade_sati(rng),
        manglik: synthesize_manglik(rng),
        kalsarpa: synthesize_kalsarpa(rng),
    }
}
