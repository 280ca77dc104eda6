//! Application configuration: issuing-company identity, export
//! settings, and logging. Precedence is env > file > default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::document::CompanyInfo;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub company: CompanyConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct CompanyConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub logo_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// Explicit wkhtmltopdf binary; when unset the renderer falls back
    /// to a PATH lookup.
    pub wkhtmltopdf_path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            company: CompanyConfig {
                name: "Freightdesk Logistics".to_string(),
                address: "No. 141, Marine Drive, Colombo 03, Sri Lanka".to_string(),
                phone: "+94 11 234 5678".to_string(),
                logo_path: None,
            },
            export: ExportConfig { output_dir: PathBuf::from("exports"), wkhtmltopdf_path: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    company: Option<CompanyPatch>,
    export: Option<ExportPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CompanyPatch {
    name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    logo_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ExportPatch {
    output_dir: Option<PathBuf>,
    wkhtmltopdf_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("freightdesk.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Issuing-company block for document building.
    pub fn company_info(&self) -> CompanyInfo {
        CompanyInfo {
            name: self.company.name.clone(),
            address: self.company.address.clone(),
            phone: self.company.phone.clone(),
            logo_path: self.company.logo_path.clone(),
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(company) = patch.company {
            if let Some(name) = company.name {
                self.company.name = name;
            }
            if let Some(address) = company.address {
                self.company.address = address;
            }
            if let Some(phone) = company.phone {
                self.company.phone = phone;
            }
            if let Some(logo_path) = company.logo_path {
                self.company.logo_path = Some(logo_path);
            }
        }

        if let Some(export) = patch.export {
            if let Some(output_dir) = export.output_dir {
                self.export.output_dir = output_dir;
            }
            if let Some(wkhtmltopdf_path) = export.wkhtmltopdf_path {
                self.export.wkhtmltopdf_path = Some(wkhtmltopdf_path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = read_env("FREIGHTDESK_COMPANY_NAME") {
            self.company.name = value;
        }
        if let Some(value) = read_env("FREIGHTDESK_COMPANY_ADDRESS") {
            self.company.address = value;
        }
        if let Some(value) = read_env("FREIGHTDESK_COMPANY_PHONE") {
            self.company.phone = value;
        }
        if let Some(value) = read_env("FREIGHTDESK_COMPANY_LOGO") {
            self.company.logo_path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("FREIGHTDESK_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("FREIGHTDESK_WKHTMLTOPDF") {
            self.export.wkhtmltopdf_path = Some(value);
        }
        if let Some(value) = read_env("FREIGHTDESK_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("FREIGHTDESK_LOG_FORMAT") {
            if let Ok(format) = value.parse() {
                self.logging.format = format;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.company.name.trim().is_empty() {
            return Err(ConfigError::Validation("company.name must not be empty".to_string()));
        }
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            return Err(ConfigError::Validation(format!(
                "unsupported log level `{}`",
                self.logging.level
            )));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = read_env("FREIGHTDESK_CONFIG") {
        return Some(PathBuf::from(value));
    }
    let default = PathBuf::from("freightdesk.toml");
    default.exists().then_some(default)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
