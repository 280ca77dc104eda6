use std::env;
use std::sync::{Mutex, OnceLock};

use freightdesk_cli::commands::{doctor, export, preview};
use freightdesk_cli::Engine;
use freightdesk_core::{store_wizard_state, WizardSession};
use serde_json::Value;

#[test]
fn export_writes_a_pdf_with_the_vector_engine() {
    with_env(&[], || {
        let input = write_fixture("Q-2025-11-36");
        let out = tempfile::tempdir().expect("out dir");

        let result = export::run(
            input.path(),
            Engine::Vector,
            Some(out.path().to_path_buf()),
            false,
        );
        assert_eq!(result.exit_code, 0, "expected successful export: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "export");
        assert_eq!(payload["status"], "ok");

        let exported = out.path().join("Q-2025-11-36.pdf");
        assert!(exported.is_file(), "expected {} to exist", exported.display());
    });
}

#[test]
fn export_rejects_missing_input() {
    with_env(&[], || {
        let out = tempfile::tempdir().expect("out dir");
        let result = export::run(
            std::path::Path::new("/nonexistent/quote.json"),
            Engine::Vector,
            Some(out.path().to_path_buf()),
            false,
        );
        assert_eq!(result.exit_code, 3, "expected input failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "input");
    });
}

#[test]
fn export_rejects_malformed_input() {
    with_env(&[], || {
        let mut input = tempfile::NamedTempFile::new().expect("temp file");
        std::io::Write::write_all(&mut input, b"{not json").expect("write");
        let out = tempfile::tempdir().expect("out dir");

        let result =
            export::run(input.path(), Engine::Vector, Some(out.path().to_path_buf()), false);
        assert_eq!(result.exit_code, 3, "expected input failure code");
        assert_eq!(parse_payload(&result.output)["error_class"], "input");
    });
}

#[test]
fn preview_emits_html_to_stdout_payload() {
    with_env(&[], || {
        let input = write_fixture("Q-2025-11-36");

        let result = preview::run(input.path(), None);
        assert_eq!(result.exit_code, 0, "expected successful preview: {}", result.output);
        assert!(result.output.contains("QUOTATION"));
        assert!(result.output.contains("Q-2025-11-36"));
    });
}

#[test]
fn preview_writes_html_file_when_out_given() {
    with_env(&[], || {
        let input = write_fixture("Q-2025-11-36");
        let out = tempfile::tempdir().expect("out dir");
        let html_path = out.path().join("quote.html");

        let result = preview::run(input.path(), Some(html_path.clone()));
        assert_eq!(result.exit_code, 0, "expected successful preview: {}", result.output);

        let html = std::fs::read_to_string(&html_path).expect("preview html");
        assert!(html.contains("Q-2025-11-36"));
    });
}

#[test]
fn doctor_reports_config_and_converter_checks() {
    with_env(&[], || {
        let output = doctor::run(true);
        let payload = parse_payload(&output);

        let names: Vec<&str> = payload["checks"]
            .as_array()
            .expect("checks array")
            .iter()
            .filter_map(|check| check["name"].as_str())
            .collect();
        assert!(names.contains(&"config_validation"));
        assert!(names.contains(&"wkhtmltopdf_availability"));
        assert!(names.contains(&"output_directory"));
    });
}

fn write_fixture(quote_number: &str) -> tempfile::NamedTempFile {
    let mut session = WizardSession::new();
    session.state.meta.quote_number = quote_number.to_string();
    let stored = store_wizard_state(&session.state);

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    serde_json::to_writer(&mut file, &stored).expect("write fixture");
    file
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "FREIGHTDESK_CONFIG",
        "FREIGHTDESK_COMPANY_NAME",
        "FREIGHTDESK_COMPANY_ADDRESS",
        "FREIGHTDESK_COMPANY_PHONE",
        "FREIGHTDESK_COMPANY_LOGO",
        "FREIGHTDESK_OUTPUT_DIR",
        "FREIGHTDESK_WKHTMLTOPDF",
        "FREIGHTDESK_LOG_LEVEL",
        "FREIGHTDESK_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
