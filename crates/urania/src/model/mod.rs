pub mod analysis;
pub mod chart;
pub mod chat;
pub mod query;
pub mod zodiac;

pub use analysis::{
    AstrologyAnalysis, Condition, DateRange, Kalsarpa, KalsarpaKind, KalsarpaSeverity, Manglik,
    ManglikSeverity, SadeSati, SadeSatiPhase,
};
pub use chart::{
    houses_from, is_in_sign_degree, BirthChart, ChartDocument, ChartVariant, House, Origin,
    PlanetPlacement, PlanetPosition,
};
pub use chat::{ChatTurn, GuidanceContext, Role};
pub use query::{coordinates_in_range, BirthQuery, LocationResult, ValidBirth};
pub use zodiac::{Planet, Sign, PLANETS, SIGN_ORDER};
