use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Short date and short time, e.g. "10/26/18, 3:04 PM".
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%y, %-I:%M %p";
pub const DEFAULT_CHART_WIDTH: usize = 60;
pub const DEFAULT_CHART_HEIGHT: usize = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct IntakeConfig {
    pub ledger: LedgerSection,
    #[serde(default)]
    pub ui: UiSection,
    #[serde(default)]
    pub chart: ChartSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UiSection {
    pub timezone: Option<String>,
    pub date_format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub width: usize,
    pub height: usize,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl IntakeConfig {
    pub fn new(ledger_path: PathBuf, timezone: Option<String>) -> Self {
        Self {
            ledger: LedgerSection {
                path: ledger_path.to_string_lossy().to_string(),
            },
            ui: UiSection {
                timezone,
                date_format: None,
            },
            chart: ChartSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_ledger_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("intake.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<IntakeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &IntakeConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("intake"));
        }
    }
    Ok(home_dir()?.join(".config").join("intake"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("intake"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("intake"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: IntakeConfig = toml::from_str("[ledger]\npath = \"/tmp/intake.db\"\n").unwrap();
        assert_eq!(config.ledger.path, "/tmp/intake.db");
        assert!(config.ui.timezone.is_none());
        assert_eq!(config.chart.width, DEFAULT_CHART_WIDTH);
        assert_eq!(config.chart.height, DEFAULT_CHART_HEIGHT);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = IntakeConfig::new(
            PathBuf::from("/data/intake.db"),
            Some("Europe/Berlin".to_string()),
        );
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: IntakeConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.ledger.path, "/data/intake.db");
        assert_eq!(parsed.ui.timezone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn test_partial_chart_section_keeps_other_default() {
        let config: IntakeConfig =
            toml::from_str("[ledger]\npath = \"/tmp/intake.db\"\n\n[chart]\nheight = 4\n")
                .unwrap();
        assert_eq!(config.chart.width, DEFAULT_CHART_WIDTH);
        assert_eq!(config.chart.height, 4);
    }

    #[test]
    fn test_missing_ledger_section_is_an_error() {
        let result: Result<IntakeConfig, _> = toml::from_str("[ui]\ntimezone = \"UTC\"\n");
        assert!(result.is_err());
    }
}
