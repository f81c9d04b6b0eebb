use rand::Rng;

use crate::model::{
    houses_from, ChartDocument, ChartVariant, Origin, Planet, PlanetPlacement, PlanetPosition, Sign,
    PLANETS, SIGN_ORDER,
};

/// Signs the navamsa wheel is turned by relative to the lagna wheel.
const NAVAMSA_ROTATION: usize = 3;
const RETROGRADE_CHANCE: f64 = 0.2;

/// A degree in [0, 30) with two decimals.
fn in_sign_degree<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(0..3000u32)) / 100.0
}

fn first_sign(variant: ChartVariant) -> Sign {
    match variant {
        ChartVariant::Primary => Sign::Aries,
        ChartVariant::Navamsa => Sign::Aries.offset(NAVAMSA_ROTATION),
    }
}

pub fn synthesize_chart<R: Rng>(variant: ChartVariant, rng: &mut R) -> ChartDocument {
    let mut strengths = [0u8; 12];
    for strength in strengths.iter_mut() {
        *strength = rng.gen_range(1..=100);
    }
    let houses = houses_from(first_sign(variant), strengths);

    let planets = PLANETS
        .iter()
        .map(|&planet| {
            let house = rng.gen_range(1..=12u8);
            PlanetPlacement {
                planet,
                house,
                sign: houses[usize::from(house) - 1].sign,
                degree: in_sign_degree(rng),
            }
        })
        .collect();

    ChartDocument {
        variant,
        houses,
        planets,
        origin: Origin::Fallback,
    }
}

/// All nine grahas once each. Ketu sits opposite Rahu; the nodes are always
/// retrograde and the luminaries never are.
pub fn synthesize_positions<R: Rng>(rng: &mut R) -> Vec<PlanetPosition> {
    let mut positions: Vec<PlanetPosition> = Vec::with_capacity(PLANETS.len());
    for &planet in PLANETS.iter() {
        if planet == Planet::Ketu {
            if let Some(rahu) = positions.iter().find(|p| p.planet == Planet::Rahu) {
                let house = (rahu.house + 5) % 12 + 1;
                positions.push(PlanetPosition {
                    planet,
                    sign: rahu.sign.offset(6),
                    degree: rahu.degree,
                    house,
                    is_retrograde: true,
                });
                continue;
            }
        }

        let house = rng.gen_range(1..=12u8);
        let is_retrograde = if planet.is_node() {
            true
        } else if planet.is_luminary() {
            false
        } else {
            rng.gen_bool(RETROGRADE_CHANCE)
        };
        positions.push(PlanetPosition {
            planet,
            sign: SIGN_ORDER[usize::from(house) - 1],
            degree: in_sign_degree(rng),
            house,
            is_retrograde,
        });
    }
    positions
}
