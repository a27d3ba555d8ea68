use crate::core::profile::ProfileDraft;
use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// How a report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Html,
    Json,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Saved profile; any field may be left out and passed on the command line.
    #[serde(default)]
    pub profile: ProfileDraft,
    #[serde(default)]
    pub format: OutputFormat,
}

impl AppConfig {
    /// Loads the config from the default location. A missing file is not an
    /// error and yields an empty config.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fadvisor", "fadvisor")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{Goal, RiskTolerance};
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
profile:
  age: 28
  income: 5200.0
  expenses: 3100
  savings: 8000
  debt: 12000
  risk: medium
  goal: wealth
format: html
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.format, OutputFormat::Html);
        let profile = config.profile.complete().expect("Complete profile");
        assert_eq!(profile.age, 28);
        assert_eq!(profile.expenses, 3100.0);
        assert_eq!(profile.risk, RiskTolerance::Medium);
        assert_eq!(profile.goal, Goal::Wealth);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
profile:
  risk: aggressive
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(
            config.profile.risk,
            Some(RiskTolerance::Other("aggressive".to_string()))
        );
        assert!(config.profile.age.is_none());

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty.profile, ProfileDraft::default());
    }

    #[test]
    fn test_load_from_path_reports_bad_yaml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "profile: [not, a, map]")?;

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let missing = AppConfig::load_from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));
        Ok(())
    }
}
