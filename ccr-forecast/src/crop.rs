use crate::error::{ForecastError, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded threshold table for the built-in crops.
pub static CROP_RULES_CSV: &str = include_str!("../../fixtures/crop_rules.csv");

/// Embedded guidance text for the built-in crops, one row per recommendation.
pub static CROP_RECOMMENDATIONS_CSV: &str =
    include_str!("../../fixtures/crop_recommendations.csv");

static BUILTIN: OnceLock<CropRegistry> = OnceLock::new();

/// Agronomic thresholds and guidance for one crop.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CropRule {
    pub name: String,
    /// Degrees Celsius; a day above this is a heat breach
    pub max_temp: f64,
    /// Degrees Celsius; a day below this is a cold breach
    pub min_temp: f64,
    /// Millimeters per day; a day above this is a rain breach
    pub rain_limit: f64,
    /// Ordered guidance, may contain inline `<strong>` markup
    pub recommendations: Vec<String>,
}

/// Immutable mapping from crop name to [`CropRule`].
///
/// Lookups are exact and case-sensitive. Iteration follows table order.
#[derive(Debug, Clone)]
pub struct CropRegistry {
    rules: Vec<CropRule>,
    index: HashMap<String, usize>,
}

impl CropRegistry {
    /// The registry shipped with the crate, parsed once on first use.
    pub fn builtin() -> &'static CropRegistry {
        BUILTIN.get_or_init(|| {
            match CropRegistry::from_csv(CROP_RULES_CSV, CROP_RECOMMENDATIONS_CSV) {
                Ok(registry) => registry,
                Err(e) => panic!("embedded crop tables are invalid: {}", e),
            }
        })
    }

    /// Build a registry from a threshold table and a recommendation table.
    ///
    /// Expected rule columns: crop, max temp, min temp, rain limit.
    /// Expected recommendation columns: crop, recommendation.
    pub fn from_csv(rules_csv: &str, recommendations_csv: &str) -> Result<CropRegistry> {
        let mut registry = CropRegistry {
            rules: Vec::new(),
            index: HashMap::new(),
        };
        for rule in parse_rule_csv(rules_csv)? {
            if registry.index.contains_key(&rule.name) {
                return Err(ForecastError::InvalidCropTable(format!(
                    "duplicate crop {}",
                    rule.name
                )));
            }
            registry.index.insert(rule.name.clone(), registry.rules.len());
            registry.rules.push(rule);
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(recommendations_csv.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let crop = field(&record, 0, "crop")?;
            let text = field(&record, 1, "recommendation")?;
            let slot = registry.index.get(crop).copied().ok_or_else(|| {
                ForecastError::InvalidCropTable(format!(
                    "recommendation for unknown crop {}",
                    crop
                ))
            })?;
            registry.rules[slot].recommendations.push(text.to_string());
        }
        Ok(registry)
    }

    /// Find the rule for a crop by its exact name.
    pub fn lookup(&self, name: &str) -> Result<&CropRule> {
        self.index
            .get(name)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| ForecastError::UnknownCrop(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn field<'r>(record: &'r csv::StringRecord, i: usize, name: &str) -> Result<&'r str> {
    match record.get(i).map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ForecastError::InvalidCropTable(format!(
            "missing {} on line {}",
            name,
            record.position().map_or(0, |p| p.line())
        ))),
    }
}

fn threshold(record: &csv::StringRecord, i: usize, name: &str) -> Result<f64> {
    let raw = field(record, i, name)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ForecastError::InvalidCropTable(format!(
            "{} `{}` is not a number",
            name, raw
        ))),
    }
}

fn parse_rule_csv(csv_object: &str) -> Result<Vec<CropRule>> {
    let mut rule_list: Vec<CropRule> = Vec::new();
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(csv_object.as_bytes());
    for row in rdr.records() {
        let record = row?;
        let name = field(&record, 0, "crop")?.to_string();
        let max_temp = threshold(&record, 1, "max temp")?;
        let min_temp = threshold(&record, 2, "min temp")?;
        let rain_limit = threshold(&record, 3, "rain limit")?;
        if min_temp > max_temp {
            return Err(ForecastError::InvalidCropTable(format!(
                "{}: min temp {} above max temp {}",
                name, min_temp, max_temp
            )));
        }
        if rain_limit < 0.0 {
            return Err(ForecastError::InvalidCropTable(format!(
                "{}: negative rain limit {}",
                name, rain_limit
            )));
        }
        rule_list.push(CropRule {
            name,
            max_temp,
            min_temp,
            rain_limit,
            recommendations: Vec::new(),
        });
    }
    Ok(rule_list)
}
