use std::fs;
use std::path::{Path, PathBuf};

use freightdesk_core::config::{AppConfig, LoadOptions};
use freightdesk_core::{build_document, load_wizard_state, StoredQuotation};
use freightdesk_render::TemplateRenderer;

use super::CommandResult;

/// Renders the HTML the template engine would hand to the converter,
/// without requiring wkhtmltopdf to be installed.
pub fn run(input: &Path, out: Option<PathBuf>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("preview", "config_validation", error.to_string(), 2)
        }
    };

    let stored: StoredQuotation = match fs::read_to_string(input)
        .map_err(|error| format!("could not read `{}`: {error}", input.display()))
        .and_then(|text| {
            serde_json::from_str(&text)
                .map_err(|error| format!("could not parse `{}`: {error}", input.display()))
        }) {
        Ok(stored) => stored,
        Err(message) => return CommandResult::failure("preview", "input", message, 3),
    };

    let state = load_wizard_state(&stored);
    let document = build_document(&state, &config.company_info(), None);

    let html = match TemplateRenderer::new().preview_html(&document) {
        Ok(html) => html,
        Err(error) => return CommandResult::failure("preview", "render", error.to_string(), 4),
    };

    match out {
        Some(path) => match fs::write(&path, &html) {
            Ok(()) => CommandResult::success(
                "preview",
                format!("wrote preview HTML to `{}`", path.display()),
            ),
            Err(error) => CommandResult::failure(
                "preview",
                "output",
                format!("could not write `{}`: {error}", path.display()),
                4,
            ),
        },
        None => CommandResult { exit_code: 0, output: html },
    }
}
