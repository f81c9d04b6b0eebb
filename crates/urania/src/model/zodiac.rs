//! Zodiac signs, the nine grahas, and traditional sign rulership.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Natural zodiac order; house `n` of an unrotated chart carries `SIGN_ORDER[n - 1]`.
pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Sign `index` steps from Aries, wrapping.
    pub fn from_index(index: usize) -> Sign {
        SIGN_ORDER[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign containing an ecliptic longitude in degrees.
    pub fn from_longitude(longitude: f64) -> Sign {
        let normalized = longitude.rem_euclid(360.0);
        Sign::from_index((normalized / 30.0).floor() as usize)
    }

    /// Case-insensitive name lookup. Providers send "Leo", "leo" or "LEO".
    pub fn parse(name: &str) -> Option<Sign> {
        let needle = name.trim();
        SIGN_ORDER
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(needle))
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Traditional ruler. Outer planets are not part of the nine-body set.
    pub fn lord(self) -> Planet {
        match self {
            Sign::Aries | Sign::Scorpio => Planet::Mars,
            Sign::Taurus | Sign::Libra => Planet::Venus,
            Sign::Gemini | Sign::Virgo => Planet::Mercury,
            Sign::Cancer => Planet::Moon,
            Sign::Leo => Planet::Sun,
            Sign::Sagittarius | Sign::Pisces => Planet::Jupiter,
            Sign::Capricorn | Sign::Aquarius => Planet::Saturn,
        }
    }

    /// Sign `steps` places further along the zodiac.
    pub fn offset(self, steps: usize) -> Sign {
        Sign::from_index(self.index() + steps)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// Provider index order: planet code `i` is `PLANETS[i]`.
pub const PLANETS: [Planet; 9] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
];

impl Planet {
    /// Out-of-range codes yield `None` and are dropped by callers.
    pub fn from_code(code: i64) -> Option<Planet> {
        usize::try_from(code).ok().and_then(|i| PLANETS.get(i).copied())
    }

    pub fn parse(name: &str) -> Option<Planet> {
        let needle = name.trim();
        PLANETS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(needle))
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mars => "Mars",
            Planet::Mercury => "Mercury",
            Planet::Jupiter => "Jupiter",
            Planet::Venus => "Venus",
            Planet::Saturn => "Saturn",
            Planet::Rahu => "Rahu",
            Planet::Ketu => "Ketu",
        }
    }

    /// Lunar nodes move backwards by definition.
    pub fn is_node(self) -> bool {
        matches!(self, Planet::Rahu | Planet::Ketu)
    }

    /// Luminaries never station retrograde.
    pub fn is_luminary(self) -> bool {
        matches!(self, Planet::Sun | Planet::Moon)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_lords() {
        assert_eq!(Sign::Aries.lord(), Planet::Mars);
        assert_eq!(Sign::Cancer.lord(), Planet::Moon);
        assert_eq!(Sign::Leo.lord(), Planet::Sun);
        assert_eq!(Sign::Scorpio.lord(), Planet::Mars);
        assert_eq!(Sign::Aquarius.lord(), Planet::Saturn);
        assert_eq!(Sign::Pisces.lord(), Planet::Jupiter);
    }

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(45.0), Sign::Taurus);
        assert_eq!(Sign::from_longitude(359.9), Sign::Pisces);
        assert_eq!(Sign::from_longitude(-10.0), Sign::Pisces);
        assert_eq!(Sign::from_longitude(390.0), Sign::Taurus);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Sign::parse("leo"), Some(Sign::Leo));
        assert_eq!(Sign::parse(" SAGITTARIUS "), Some(Sign::Sagittarius));
        assert_eq!(Sign::parse("Ophiuchus"), None);
        assert_eq!(Planet::parse("rahu"), Some(Planet::Rahu));
    }

    #[test]
    fn test_planet_codes() {
        assert_eq!(Planet::from_code(0), Some(Planet::Sun));
        assert_eq!(Planet::from_code(8), Some(Planet::Ketu));
        assert_eq!(Planet::from_code(9), None);
        assert_eq!(Planet::from_code(-1), None);
    }

    #[test]
    fn test_offset_wraps() {
        assert_eq!(Sign::Capricorn.offset(3), Sign::Aries);
        assert_eq!(Sign::Aries.offset(6), Sign::Libra);
    }
}
