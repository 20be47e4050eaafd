use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API token. Takes precedence over
/// the `api_token` config field.
pub const TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Delay between reconciliation passes, measured from the end of
    /// the previous pass. Absent means run one pass and exit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_ms: Option<u64>,

    #[serde(default = "default_ip_endpoint")]
    pub ip_endpoint: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    pub records: Vec<RecordSpec>,
}

/// One configured record: either a bare domain name to resolve at
/// startup, or an explicit identifier pair used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordSpec {
    Name(String),
    Ref { zone_id: String, record_id: String },
}

fn default_ip_endpoint() -> String {
    crate::ip::DEFAULT_IP_ENDPOINT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Resolve the bearer token: environment first, config second.
    pub fn api_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
        match &self.api_token {
            Some(token) if !token.is_empty() => Ok(token.clone()),
            _ => bail!(
                "Missing API token: set the {} environment variable or api_token in the config file",
                TOKEN_ENV
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config_with_mixed_records() {
        let toml_str = r#"
repeat_ms = 300000
log_level = "debug"
records = [
    "home.example.com",
    { zone_id = "0123456789abcdef0123456789abcdef", record_id = "feedfacefeedfacefeedfacefeedface" },
]
"#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.repeat_ms, Some(300_000));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.ip_endpoint, "https://api.ipify.org");
        assert_eq!(settings.records.len(), 2);
        assert_eq!(
            settings.records[0],
            RecordSpec::Name("home.example.com".to_string())
        );
        assert_eq!(
            settings.records[1],
            RecordSpec::Ref {
                zone_id: "0123456789abcdef0123456789abcdef".to_string(),
                record_id: "feedfacefeedfacefeedfacefeedface".to_string(),
            }
        );
    }

    #[test]
    fn test_repeat_interval_is_optional() {
        let settings: Settings = toml::from_str(r#"records = ["home.example.com"]"#).unwrap();
        assert_eq!(settings.repeat_ms, None);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"records = ["home.example.com"]"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.records.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_diagnosed() {
        let err = Settings::load(Path::new("/nonexistent/cfddns.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_toml_is_diagnosed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "records = 5").unwrap();

        let err = Settings::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
