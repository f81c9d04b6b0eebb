use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use urania::{
    Aggregator, BirthQuery, ChatSession, DevicePosition, FixedDevice, GuidanceContext, Providers,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Birth charts, condition analyses and guidance from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve where this machine is.
    Locate {
        /// Device latitude, used when IP geolocation is unavailable.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// IANA timezone of the device position.
        #[arg(long)]
        tz: Option<String>,
    },
    /// Places matching a free-text query (at most five).
    Search { query: String },
    /// Best single match for a place name.
    Resolve { place: String },
    /// Lagna and navamsa charts plus planet positions.
    Chart(BirthArgs),
    /// Sade Sati, Manglik and Kalsarpa verdicts.
    Analysis(BirthArgs),
    /// Ask the guide one question.
    Chat {
        message: String,
        /// Name passed to the guide.
        #[arg(long)]
        name: Option<String>,
        /// Free-text birth details passed to the guide.
        #[arg(long)]
        birth: Option<String>,
    },
}

#[derive(Args, Debug)]
struct BirthArgs {
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// HH:MM or HH:MM:SS, local to the birth place.
    #[arg(long)]
    time: String,
    #[arg(long)]
    place: String,
    #[arg(long)]
    name: Option<String>,
    /// Skip geocoding by giving coordinates directly.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
    #[arg(long)]
    tz: Option<String>,
}

impl BirthArgs {
    fn query(&self) -> BirthQuery {
        let mut query = BirthQuery::new(&self.date, &self.time, &self.place);
        query.name = self.name.clone();
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            query = query.with_coordinates(lat, lon, self.tz.as_deref());
        }
        query
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{text}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = urania_config::load_provider_settings().context("Failed to load urania settings")?;
    log::info!(
        "providers: astro {}, guidance {}",
        if settings.astro.is_configured() { "configured" } else { "unconfigured" },
        if settings.guidance.is_configured() { "configured" } else { "unconfigured" }
    );

    match cli.command {
        Command::Locate { lat, lon, tz } => {
            let mut providers = Providers::http(&settings);
            if let (Some(latitude), Some(longitude)) = (lat, lon) {
                providers.device = Arc::new(FixedDevice(DevicePosition {
                    latitude,
                    longitude,
                    timezone: tz,
                }));
            }
            let aggregator = Aggregator::new(providers, &settings);
            print_json(&aggregator.resolve_current_location().await)
        }
        Command::Search { query } => {
            let aggregator = Aggregator::from_settings(&settings);
            print_json(&aggregator.search_places(&query).await)
        }
        Command::Resolve { place } => {
            let aggregator = Aggregator::from_settings(&settings);
            print_json(&aggregator.resolve_coordinates(&place).await)
        }
        Command::Chart(birth) => {
            let aggregator = Aggregator::from_settings(&settings);
            let chart = aggregator.generate_chart(&birth.query()).await?;
            print_json(&chart)
        }
        Command::Analysis(birth) => {
            let aggregator = Aggregator::from_settings(&settings);
            let analysis = aggregator.generate_analysis(&birth.query()).await?;
            print_json(&analysis)
        }
        Command::Chat { message, name, birth } => {
            let aggregator = Aggregator::from_settings(&settings);
            let mut session = ChatSession::with_context(GuidanceContext {
                subject_name: name,
                birth_summary: birth,
            });
            session.send(&aggregator, &message).await?;
            print_json(&session.turns())
        }
    }
}
