//! Command implementations for the crop climate risk CLI.
//!
//! Provides subcommands for assessing a forecast against a crop's
//! thresholds and for listing the crops that can be assessed.

use clap::{Args, Subcommand, ValueEnum};

pub mod assess;
pub mod chart;
pub mod crops;
pub mod display;
pub mod report;

/// Alternative crop tables, replacing the built-in ones.
#[derive(Args, Debug, Clone, Default)]
pub struct CropTables {
    /// CSV of crop thresholds: crop, max temp, min temp, rain limit
    #[arg(long, requires = "crop_recommendations")]
    pub crop_rules: Option<String>,

    /// CSV of crop guidance: crop, recommendation
    #[arg(long, requires = "crop_rules")]
    pub crop_recommendations: Option<String>,
}

/// Clock used to split the forecast into calendar days.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundaryArg {
    /// The forecast location's own UTC offset, as reported by the feed
    #[default]
    Location,
    Utc,
    /// The time zone of this machine
    Local,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assess a forecast against a crop's temperature and rain thresholds
    Assess {
        /// Crop to assess, matched exactly (e.g. "Wheat")
        #[arg(short = 'c', long)]
        crop: String,

        /// Location to geocode and fetch a forecast for; repeat for several
        #[arg(short = 'l', long, required_unless_present = "forecast_json")]
        location: Vec<String>,

        /// Saved OpenWeather forecast response to assess instead of fetching
        #[arg(short = 'f', long, conflicts_with = "location")]
        forecast_json: Option<String>,

        /// OpenWeather API key
        #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        #[arg(long, value_enum, default_value_t = DayBoundaryArg::Location)]
        day_boundary: DayBoundaryArg,

        /// Output path for the average temperature chart JSON
        #[arg(long)]
        chart_json: Option<String>,

        /// Output path for the daily summaries CSV
        #[arg(long)]
        daily_csv: Option<String>,

        #[command(flatten)]
        tables: CropTables,
    },

    /// List the crops and their thresholds
    Crops {
        #[command(flatten)]
        tables: CropTables,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Assess {
            crop,
            location,
            forecast_json,
            api_key,
            day_boundary,
            chart_json,
            daily_csv,
            tables,
        } => {
            let options = assess::AssessOptions {
                crop,
                day_boundary,
                chart_json,
                daily_csv,
                tables,
            };
            match forecast_json {
                Some(path) => assess::run_assess_file(&path, &options).await,
                None => {
                    assess::run_assess_locations(&location, api_key.as_deref(), &options).await
                }
            }
        }
        Command::Crops { tables } => crops::run_crops(&tables),
    }
}
