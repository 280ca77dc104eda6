use std::fs;
use std::path::{Path, PathBuf};

use freightdesk_core::config::{AppConfig, LoadOptions};
use freightdesk_core::{load_wizard_state, StoredQuotation};
use freightdesk_render::{
    export_all_options, export_document, QuotationRenderer, TemplateRenderer, VectorRenderer,
};

use super::CommandResult;
use crate::Engine;

pub fn run(input: &Path, engine: Engine, out: Option<PathBuf>, all_options: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("export", "config_validation", error.to_string(), 2)
        }
    };

    let stored = match read_stored(input) {
        Ok(stored) => stored,
        Err(message) => return CommandResult::failure("export", "input", message, 3),
    };
    let state = load_wizard_state(&stored);
    let company = config.company_info();
    let output_dir = out.unwrap_or_else(|| config.export.output_dir.clone());

    let renderer: Box<dyn QuotationRenderer> = match engine {
        Engine::Vector => Box::new(VectorRenderer::new()),
        Engine::Template => {
            let mut renderer = TemplateRenderer::new();
            // An explicit config path wins over the PATH lookup.
            if config.export.wkhtmltopdf_path.is_some() {
                renderer = renderer.with_converter_path(config.export.wkhtmltopdf_path.clone());
            }
            Box::new(renderer)
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "export",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                5,
            )
        }
    };

    let exported = runtime.block_on(async {
        if all_options {
            export_all_options(renderer.as_ref(), &state, &company, &output_dir).await
        } else {
            let document = freightdesk_core::build_document(&state, &company, None);
            export_document(renderer.as_ref(), &document, &output_dir).await.map(|path| vec![path])
        }
    });

    match exported {
        Ok(paths) => {
            let listed: Vec<String> =
                paths.iter().map(|path| path.display().to_string()).collect();
            CommandResult::success(
                "export",
                format!("exported {} file(s):\n  {}", listed.len(), listed.join("\n  ")),
            )
        }
        Err(error) => CommandResult::failure("export", "render", error.to_string(), 4),
    }
}

fn read_stored(input: &Path) -> Result<StoredQuotation, String> {
    let text = fs::read_to_string(input)
        .map_err(|error| format!("could not read `{}`: {error}", input.display()))?;
    serde_json::from_str(&text)
        .map_err(|error| format!("could not parse `{}`: {error}", input.display()))
}
