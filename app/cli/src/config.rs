//! FILENAME: app/cli/src/config.rs
//! PURPOSE: Builds the `ColumnSchema` for a run from a preset plus an
//! optional TOML file.
//! CONTEXT: Keys present in the file replace the preset's values one by one,
//! so a file that only renames `fiscal_year` keeps every other NTIS column.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use engine::ColumnSchema;
use log::debug;

/// Longest trailing window a config file may ask for.
pub const MAX_WINDOW_YEARS: u32 = 100;

/// Built-in column layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// English column names.
    Default,
    /// Korean headers of the NTIS project export.
    #[default]
    Ntis,
}

impl Preset {
    pub fn schema(self) -> ColumnSchema {
        match self {
            Preset::Default => ColumnSchema::default(),
            Preset::Ntis => ColumnSchema::ntis(),
        }
    }
}

/// Resolves the schema for a run.
pub fn load_schema(preset: Preset, config: Option<&Path>) -> Result<ColumnSchema> {
    let base = preset.schema();
    let Some(path) = config else {
        return Ok(base);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let schema = apply_overrides(base, &text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    debug!("loaded column schema from {}", path.display());
    Ok(schema)
}

/// Overlays the top-level keys of a TOML document onto `base`.
pub fn apply_overrides(base: ColumnSchema, text: &str) -> Result<ColumnSchema> {
    let overrides: toml::Table = text.parse().context("Config is not valid TOML")?;

    let mut merged = match toml::Value::try_from(&base)? {
        toml::Value::Table(table) => table,
        _ => bail!("Column schema did not serialize to a table"),
    };
    for (key, value) in overrides {
        if !merged.contains_key(&key) {
            bail!("Unknown config key '{}'", key);
        }
        merged.insert(key, value);
    }

    let schema: ColumnSchema = toml::Value::Table(merged)
        .try_into()
        .context("Config has a value of the wrong type")?;
    if !(1..=MAX_WINDOW_YEARS).contains(&schema.window_years) {
        bail!(
            "window_years must be between 1 and {}, got {}",
            MAX_WINDOW_YEARS,
            schema.window_years
        );
    }
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_preset_without_file() {
        let schema = load_schema(Preset::Default, None).unwrap();
        assert_eq!(schema, ColumnSchema::default());
    }

    #[test]
    fn test_partial_override_keeps_preset_values() {
        let text = "fiscal_year = \"year\"\nwindow_years = 3\n";
        let schema = apply_overrides(ColumnSchema::ntis(), text).unwrap();

        assert_eq!(schema.fiscal_year, "year");
        assert_eq!(schema.window_years, 3);
        assert_eq!(schema.project_id, ColumnSchema::ntis().project_id);
        assert_eq!(schema.pivot_fields, ColumnSchema::ntis().pivot_fields);
    }

    #[test]
    fn test_override_lists_and_separator() {
        let text = "pivot_fields = [\"a\", \"b\"]\nreference_separator = \",\"\n";
        let schema = apply_overrides(ColumnSchema::default(), text).unwrap();

        assert_eq!(schema.pivot_fields, vec!["a", "b"]);
        assert_eq!(schema.reference_separator, ',');
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = apply_overrides(ColumnSchema::default(), "fiscal_yaer = \"x\"").unwrap_err();
        assert!(err.to_string().contains("fiscal_yaer"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(apply_overrides(ColumnSchema::default(), "window_years = \"five\"").is_err());
        assert!(apply_overrides(ColumnSchema::default(), "window_years = 0").is_err());
    }

    #[test]
    fn test_window_years_upper_bound() {
        let schema = apply_overrides(ColumnSchema::default(), "window_years = 100").unwrap();
        assert_eq!(schema.window_years, MAX_WINDOW_YEARS);

        for text in ["window_years = 101", "window_years = 2147483648"] {
            let err = apply_overrides(ColumnSchema::default(), text).unwrap_err();
            assert!(err.to_string().contains("window_years"));
        }
    }

    #[test]
    fn test_config_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "total_budget = \"budget\"").unwrap();

        let schema = load_schema(Preset::Default, Some(file.path())).unwrap();
        assert_eq!(schema.total_budget, "budget");
        assert_eq!(schema.fiscal_year, "fiscal_year");
    }

    #[test]
    fn test_missing_config_file_names_path() {
        let missing = Path::new("/nonexistent/columns.toml");
        let err = load_schema(Preset::Ntis, Some(missing)).unwrap_err();
        assert!(err.to_string().contains("columns.toml"));
    }
}
