//! Multi-provider astrology aggregation.
//!
//! `Aggregator` resolves birth places, queries chart, condition-analysis and
//! guidance providers concurrently, and fills in synthesized data for any
//! provider that is unconfigured, unreachable or returns something malformed.

pub mod aggregator;
pub mod clients;
pub mod error;
pub mod fallback;
pub mod location;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod session;
pub mod timezone;

pub use aggregator::{Aggregator, Providers, MIN_SEARCH_CHARS};
pub use error::{InputError, ProviderResult, Unavailable};
pub use fallback::RandomSource;
pub use location::{DeviceLocator, DevicePosition, FixedDevice, GeoProvider, LocationResolver, NoDevice};
pub use model::*;
pub use provider::{AstroEndpoint, AstroProvider, AstroRequest, GuidanceProvider, GuidanceRequest};
pub use session::ChatSession;
pub use timezone::{offset_hours, offset_hours_at_local, DEFAULT_OFFSET_HOURS};
