//! Crop table loading and listing.

use crate::CropTables;
use anyhow::Context;
use ccr_forecast::CropRegistry;
use log::info;
use std::fmt::Write;

/// The registry named by `tables`, or the built-in one when none is given.
pub fn load_registry(tables: &CropTables) -> anyhow::Result<CropRegistry> {
    match (&tables.crop_rules, &tables.crop_recommendations) {
        (Some(rules_path), Some(recommendations_path)) => {
            let rules = std::fs::read_to_string(rules_path)
                .with_context(|| format!("reading crop rules {}", rules_path))?;
            let recommendations = std::fs::read_to_string(recommendations_path)
                .with_context(|| format!("reading crop recommendations {}", recommendations_path))?;
            let registry = CropRegistry::from_csv(&rules, &recommendations)
                .with_context(|| format!("loading crop tables from {}", rules_path))?;
            info!("Loaded {} crops from {}", registry.len(), rules_path);
            Ok(registry)
        }
        (None, None) => Ok(CropRegistry::builtin().clone()),
        _ => anyhow::bail!("--crop-rules and --crop-recommendations must be given together"),
    }
}

pub fn render_crops(registry: &CropRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>12}",
        "CROP", "MAX (°C)", "MIN (°C)", "RAIN (mm)"
    );
    for rule in registry.iter() {
        let _ = writeln!(
            out,
            "{:<12} {:>10.1} {:>10.1} {:>12.1}",
            rule.name, rule.max_temp, rule.min_temp, rule.rain_limit
        );
    }
    out
}

pub fn run_crops(tables: &CropTables) -> anyhow::Result<()> {
    let registry = load_registry(tables)?;
    print!("{}", render_crops(&registry));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_when_no_tables() {
        let registry = load_registry(&CropTables::default()).unwrap();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_render_crops() {
        let text = render_crops(CropRegistry::builtin());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("Tomato"));
        assert!(lines[4].contains("30.0"));
    }

    #[test]
    fn test_custom_tables_from_disk() {
        let dir = std::env::temp_dir();
        let rules_path = dir.join(format!("ccr-rules-{}.csv", std::process::id()));
        let recs_path = dir.join(format!("ccr-recs-{}.csv", std::process::id()));
        std::fs::write(&rules_path, "CROP,MAX,MIN,RAIN\nBanana,36,14,90\n").unwrap();
        std::fs::write(&recs_path, "CROP,RECOMMENDATION\nBanana,Prop stems before wind\n").unwrap();
        let tables = CropTables {
            crop_rules: Some(rules_path.display().to_string()),
            crop_recommendations: Some(recs_path.display().to_string()),
        };
        let registry = load_registry(&tables).unwrap();
        assert!(registry.lookup("Banana").is_ok());
        assert!(registry.lookup("Wheat").is_err());
        std::fs::remove_file(rules_path).unwrap();
        std::fs::remove_file(recs_path).unwrap();
    }

    #[test]
    fn test_half_given_tables_rejected() {
        let tables = CropTables {
            crop_rules: Some("rules.csv".to_string()),
            crop_recommendations: None,
        };
        assert!(load_registry(&tables).is_err());
    }
}
