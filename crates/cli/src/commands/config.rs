use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use freightdesk_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let file = config_file_doc.as_ref();
    let file_path = config_file_path.as_deref();

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "company.name",
        &config.company.name,
        field_source("company.name", Some("FREIGHTDESK_COMPANY_NAME"), file, file_path),
    ));
    lines.push(render_line(
        "company.address",
        &config.company.address,
        field_source("company.address", Some("FREIGHTDESK_COMPANY_ADDRESS"), file, file_path),
    ));
    lines.push(render_line(
        "company.phone",
        &config.company.phone,
        field_source("company.phone", Some("FREIGHTDESK_COMPANY_PHONE"), file, file_path),
    ));
    lines.push(render_line(
        "company.logo_path",
        &config
            .company
            .logo_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(none)".to_string()),
        field_source("company.logo_path", Some("FREIGHTDESK_COMPANY_LOGO"), file, file_path),
    ));
    lines.push(render_line(
        "export.output_dir",
        &config.export.output_dir.display().to_string(),
        field_source("export.output_dir", Some("FREIGHTDESK_OUTPUT_DIR"), file, file_path),
    ));
    lines.push(render_line(
        "export.wkhtmltopdf_path",
        config.export.wkhtmltopdf_path.as_deref().unwrap_or("(PATH lookup)"),
        field_source("export.wkhtmltopdf_path", Some("FREIGHTDESK_WKHTMLTOPDF"), file, file_path),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source("logging.level", Some("FREIGHTDESK_LOG_LEVEL"), file, file_path),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source("logging.format", Some("FREIGHTDESK_LOG_FORMAT"), file, file_path),
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} ({source})")
}

fn detect_config_path() -> Option<PathBuf> {
    if let Ok(value) = env::var("FREIGHTDESK_CONFIG") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    let default = PathBuf::from("freightdesk.toml");
    default.exists().then_some(default)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    dotted_key: &str,
    env_key: Option<&str>,
    file_doc: Option<&Value>,
    file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
            return format!("env:{env_key}");
        }
    }

    if let (Some(doc), Some(path)) = (file_doc, file_path) {
        if file_has_key(doc, dotted_key) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn file_has_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for segment in dotted_key.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}
