use serde::{Deserialize, Serialize};

use super::zodiac::{Planet, Sign};

/// Where a sub-result came from. Never surfaced as an error, only recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    /// Lagna (chalit) birth chart.
    Primary,
    /// Navamsa, the ninth divisional chart.
    Navamsa,
}

impl ChartVariant {
    pub fn label(self) -> &'static str {
        match self {
            ChartVariant::Primary => "Lagna",
            ChartVariant::Navamsa => "Navamsa",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub number: u8,
    pub sign: Sign,
    pub lord: Planet,
    /// 1..=100
    pub strength: u8,
}

impl House {
    pub fn new(number: u8, sign: Sign, strength: u8) -> Self {
        Self {
            number,
            sign,
            lord: sign.lord(),
            strength: strength.clamp(1, 100),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPlacement {
    pub planet: Planet,
    pub house: u8,
    pub sign: Sign,
    /// Degree within the sign, [0, 30).
    pub degree: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub variant: ChartVariant,
    pub houses: Vec<House>,
    pub planets: Vec<PlanetPlacement>,
    pub origin: Origin,
}

impl ChartDocument {
    pub fn house(&self, number: u8) -> Option<&House> {
        self.houses.iter().find(|h| h.number == number)
    }

    /// Exactly twelve houses numbered 1..=12 once each, and every placement
    /// inside one of them with an in-sign degree.
    pub fn is_well_formed(&self) -> bool {
        if self.houses.len() != 12 {
            return false;
        }
        let mut seen = [false; 12];
        for house in &self.houses {
            let Some(slot) = (house.number as usize).checked_sub(1).filter(|i| *i < 12) else {
                return false;
            };
            if seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        self.planets
            .iter()
            .all(|p| (1..=12).contains(&p.house) && is_in_sign_degree(p.degree))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: Planet,
    pub sign: Sign,
    /// Degree within the sign, [0, 30).
    pub degree: f64,
    pub house: u8,
    pub is_retrograde: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthChart {
    pub lagna_chart: ChartDocument,
    pub navamsa_chart: ChartDocument,
    pub planet_positions: Vec<PlanetPosition>,
    pub positions_origin: Origin,
}

impl BirthChart {
    /// True when no part of the chart had to be synthesized.
    pub fn is_fully_sourced(&self) -> bool {
        self.lagna_chart.origin == Origin::Provider
            && self.navamsa_chart.origin == Origin::Provider
            && self.positions_origin == Origin::Provider
    }
}

pub fn is_in_sign_degree(degree: f64) -> bool {
    degree.is_finite() && (0.0..30.0).contains(&degree)
}

/// Twelve houses whose signs start at `first` and follow zodiac order.
pub fn houses_from(first: Sign, strengths: [u8; 12]) -> Vec<House> {
    (0..12)
        .map(|i| House::new(i as u8 + 1, first.offset(i), strengths[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(houses: Vec<House>, planets: Vec<PlanetPlacement>) -> ChartDocument {
        ChartDocument {
            variant: ChartVariant::Primary,
            houses,
            planets,
            origin: Origin::Provider,
        }
    }

    #[test]
    fn test_houses_from_rotates() {
        let houses = houses_from(Sign::Cancer, [50; 12]);
        assert_eq!(houses.len(), 12);
        assert_eq!(houses[0].sign, Sign::Cancer);
        assert_eq!(houses[0].lord, Planet::Moon);
        assert_eq!(houses[9].sign, Sign::Aries);
        assert_eq!(houses[11].number, 12);
    }

    #[test]
    fn test_strength_is_clamped() {
        assert_eq!(House::new(1, Sign::Leo, 0).strength, 1);
        assert_eq!(House::new(1, Sign::Leo, 250).strength, 100);
    }

    #[test]
    fn test_well_formed_checks() {
        let houses = houses_from(Sign::Aries, [10; 12]);
        let ok = PlanetPlacement { planet: Planet::Sun, house: 5, sign: Sign::Leo, degree: 12.5 };
        assert!(document(houses.clone(), vec![ok.clone()]).is_well_formed());

        let bad_house = PlanetPlacement { house: 13, ..ok.clone() };
        assert!(!document(houses.clone(), vec![bad_house]).is_well_formed());

        let bad_degree = PlanetPlacement { degree: 30.0, ..ok.clone() };
        assert!(!document(houses.clone(), vec![bad_degree]).is_well_formed());

        let mut duplicated = houses.clone();
        duplicated[11].number = 1;
        assert!(!document(duplicated, vec![]).is_well_formed());

        assert!(!document(houses[..11].to_vec(), vec![]).is_well_formed());
    }
}
