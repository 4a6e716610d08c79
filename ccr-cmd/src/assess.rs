//! Crop risk assessment for fetched or saved forecasts.

use crate::chart::{ChartFile, LineChart};
use crate::crops::load_registry;
use crate::display::DisplaySession;
use crate::report::{render_text, DailyTableFile};
use crate::{CropTables, DayBoundaryArg};
use anyhow::Context;
use ccr_data::assessment::{assess, Assessment};
use ccr_data::day_key::DayBoundary;
use ccr_forecast::client::OpenWeatherClient;
use ccr_forecast::{CropRegistry, ForecastFeed};
use log::info;

pub struct AssessOptions {
    pub crop: String,
    pub day_boundary: DayBoundaryArg,
    pub chart_json: Option<String>,
    pub daily_csv: Option<String>,
    pub tables: CropTables,
}

/// Chart and table outputs, each replaced as successive locations are assessed.
struct Outputs {
    chart: DisplaySession<ChartFile>,
    table: DisplaySession<DailyTableFile>,
}

impl Outputs {
    fn new() -> Self {
        Outputs {
            chart: DisplaySession::new(),
            table: DisplaySession::new(),
        }
    }

    fn show(&mut self, options: &AssessOptions, label: &str, assessment: &Assessment) -> anyhow::Result<()> {
        if let Some(path) = &options.chart_json {
            let chart = LineChart::average_temperature(label, &assessment.daily);
            self.chart.show(ChartFile::new(path, chart))?;
        }
        if let Some(path) = &options.daily_csv {
            self.table
                .show(DailyTableFile::new(path, assessment.daily.clone()))?;
        }
        Ok(())
    }
}

pub fn day_boundary(arg: DayBoundaryArg, feed: &ForecastFeed) -> DayBoundary {
    match arg {
        DayBoundaryArg::Location => DayBoundary::for_feed(feed),
        DayBoundaryArg::Utc => DayBoundary::Utc,
        DayBoundaryArg::Local => DayBoundary::SystemLocal,
    }
}

/// Assess one parsed feed and return the text report.
pub fn assess_feed(
    feed: &ForecastFeed,
    label: &str,
    options: &AssessOptions,
    registry: &CropRegistry,
) -> anyhow::Result<(Assessment, String)> {
    let boundary = day_boundary(options.day_boundary, feed);
    info!(
        "Assessing {} samples for {} with {:?} day boundaries",
        feed.samples.len(),
        label,
        boundary
    );
    let assessment = assess(&feed.samples, &boundary, &options.crop, registry)
        .with_context(|| format!("assessing {} for {}", label, options.crop))?;
    let text = render_text(&assessment, label);
    Ok((assessment, text))
}

/// Assess a forecast response saved to disk.
pub async fn run_assess_file(path: &str, options: &AssessOptions) -> anyhow::Result<()> {
    let registry = load_registry(&options.tables)?;
    registry.lookup(&options.crop)?;

    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading forecast {}", path))?;
    let feed = ForecastFeed::from_json(&body).with_context(|| format!("parsing forecast {}", path))?;
    let label = feed.city.clone().unwrap_or_else(|| path.to_string());

    let (assessment, text) = assess_feed(&feed, &label, options, &registry)?;
    print!("{}", text);
    Outputs::new().show(options, &label, &assessment)
}

/// Geocode each location, fetch its forecast and assess it.
pub async fn run_assess_locations(
    locations: &[String],
    api_key: Option<&str>,
    options: &AssessOptions,
) -> anyhow::Result<()> {
    let registry = load_registry(&options.tables)?;
    registry.lookup(&options.crop)?;

    let api_key = api_key.context("OPENWEATHER_API_KEY is not set; add it to the environment or .env")?;
    let client = OpenWeatherClient::new(api_key)?;
    let mut outputs = Outputs::new();

    for (i, location) in locations.iter().enumerate() {
        let coordinates = client
            .geocode(location)
            .await
            .with_context(|| format!("geocoding {}", location))?;
        let feed = client
            .forecast(&coordinates)
            .await
            .with_context(|| format!("fetching forecast for {}", location))?;

        let (assessment, text) = assess_feed(&feed, location, options, &registry)?;
        if i > 0 {
            println!();
        }
        print!("{}", text);
        outputs.show(options, location, &assessment)?;
    }

    info!("Assessed {} location(s) for {}", locations.len(), options.crop);
    Ok(())
}
