use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use formgate_viewer::{ReportConfig, ReportEndpoints};

/// `formgate.toml`: endpoint URLs, platform field codes, container element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiSection,
    pub fields: FieldSection,
    pub view: ViewSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Valid-months whitelist endpoint.
    pub valid_months_url: String,
    /// Usage detail endpoint.
    pub usage_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSection {
    /// Month field of the whitelist dataset.
    pub month: String,
    /// Month field of the usage dataset.
    pub usage_month: String,
    /// Amount field of the usage dataset.
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSection {
    /// Id of the page element the table lands in.
    pub element_id: String,
}

impl Default for Config {
    fn default() -> Self {
        let report = ReportConfig::default();
        Self {
            api: ApiSection {
                valid_months_url: report.endpoints.valid_months_url,
                usage_url: report.endpoints.usage_url,
            },
            fields: FieldSection {
                month: report.month_field,
                usage_month: report.usage_month_field,
                amount: report.amount_field,
            },
            view: ViewSection {
                element_id: "totaltable".to_string(),
            },
        }
    }
}

impl Config {
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            endpoints: ReportEndpoints {
                valid_months_url: self.api.valid_months_url.clone(),
                usage_url: self.api.usage_url.clone(),
            },
            month_field: self.fields.month.clone(),
            usage_month_field: self.fields.usage_month.clone(),
            amount_field: self.fields.amount.clone(),
        }
    }
}

/// Load the config file; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Write a default config for the user to edit.
pub fn write_default_config(path: &Path) -> Result<()> {
    let body = toml::to_string_pretty(&Config::default()).context("serializing default config")?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("formgate.toml")).unwrap();
        assert_eq!(config.fields.usage_month, "利用年月");
        assert_eq!(config.view.element_id, "totaltable");
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formgate.toml");
        write_default_config(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.api.usage_url, Config::default().api.usage_url);
        assert_eq!(loaded.fields.amount, "合計");
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formgate.toml");
        fs::write(
            &path,
            r#"
[api]
valid_months_url = "https://example.com/months"
usage_url = "https://example.com/usage"

[fields]
month = "month"
usage_month = "usage_month"
amount = "amount"

[view]
element_id = "summary"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.usage_url, "https://example.com/usage");
        let report = config.report_config();
        assert_eq!(report.amount_field, "amount");
    }
}
