use crate::data::persistence::{get_data_dir, Persistable};
use anyhow::{anyhow, bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
    Saturday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Saturday => Weekday::Sat,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// strftime pattern used to parse and display dates in the input.
    pub date_format: String,
    #[serde(default)]
    pub week_start: WeekStart,
    /// Seed date for the picker, in `date_format`. Empty means none.
    #[serde(default)]
    pub seed_date: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            date_format: "%d/%m/%Y".to_string(),
            week_start: WeekStart::Monday,
            seed_date: String::new(),
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let settings = SettingsWrapper::load_from(dir)?.settings;
        let path = dir.join(SettingsWrapper::filename());
        settings
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Checks that `date_format` can both render and read back a whole date.
    pub fn validate(&self) -> Result<()> {
        let fmt = self.date_format.as_str();
        if fmt.trim().is_empty() {
            bail!("date_format is empty");
        }
        if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
            bail!("date_format '{fmt}' has an unknown specifier");
        }
        let sample = NaiveDate::from_ymd_opt(2024, 3, 15).context("sample date")?;
        let mut text = String::new();
        write!(text, "{}", sample.format(fmt))
            .map_err(|_| anyhow!("date_format '{fmt}' cannot render a date"))?;
        match NaiveDate::parse_from_str(&text, fmt) {
            Ok(parsed) if parsed == sample => Ok(()),
            _ => bail!("date_format '{fmt}' does not identify a single day"),
        }
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }

    pub fn seed(&self) -> Option<&str> {
        let s = self.seed_date.trim();
        (!s.is_empty()).then_some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.date_format, "%d/%m/%Y");
        assert_eq!(settings.week_start, WeekStart::Monday);
        assert_eq!(settings.seed(), None);
    }

    #[test]
    fn test_week_start_maps_to_chrono() {
        assert_eq!(WeekStart::Monday.weekday(), Weekday::Mon);
        assert_eq!(WeekStart::Sunday.weekday(), Weekday::Sun);
        assert_eq!(WeekStart::Saturday.weekday(), Weekday::Sat);
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, AppSettings::default());
    }

    #[test]
    fn test_settings_yaml_lowercase_week_start() {
        let yaml = "settings:\n  date_format: \"%m/%d/%Y\"\n  week_start: sunday\n  seed_date: \"03/15/2024\"\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.week_start, WeekStart::Sunday);
        assert_eq!(wrapper.settings.date_format, "%m/%d/%Y");
        assert_eq!(wrapper.settings.seed(), Some("03/15/2024"));
    }

    #[test]
    fn test_settings_save_to_and_reload() {
        let tmp = TempDir::new().unwrap();
        let settings = AppSettings {
            date_format: "%Y-%m-%d".to_string(),
            week_start: WeekStart::Saturday,
            seed_date: "2024-03-15".to_string(),
        };
        settings.save_to(tmp.path()).unwrap();
        let loaded = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    fn with_format(fmt: &str) -> AppSettings {
        AppSettings {
            date_format: fmt.to_string(),
            ..AppSettings::default()
        }
    }

    #[test]
    fn test_validate_accepts_day_formats() {
        assert!(AppSettings::default().validate().is_ok());
        assert!(with_format("%Y-%m-%d").validate().is_ok());
        assert!(with_format("%d %b %Y").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_time_and_unknown_specifiers() {
        let err = with_format("%H:%M").validate().unwrap_err();
        assert!(err.to_string().contains("cannot render"), "{err}");
        let err = with_format("%Q/%m/%Y").validate().unwrap_err();
        assert!(err.to_string().contains("unknown specifier"), "{err}");
        assert!(with_format("  ").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_format_without_day() {
        let err = with_format("%B %Y").validate().unwrap_err();
        assert!(err.to_string().contains("single day"), "{err}");
    }

    #[test]
    fn test_load_from_reports_bad_date_format() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "settings:\n  date_format: \"%H:%M\"\n",
        )
        .unwrap();
        let err = AppSettings::load_from(tmp.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("config.yaml"), "{msg}");
        assert!(msg.contains("%H:%M"), "{msg}");
    }
}
