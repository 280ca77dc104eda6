use freightdesk_core::config::{AppConfig, LoadOptions};
use freightdesk_render::TemplateRenderer;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_converter(&config));
            checks.push(check_output_dir(&config));
            checks.push(check_logo(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["wkhtmltopdf_availability", "output_directory", "company_logo"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    // The converter check is advisory: the vector engine has no
    // external dependency, so a missing binary never fails the report.
    let all_pass = checks
        .iter()
        .filter(|check| check.name != "wkhtmltopdf_availability")
        .all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_converter(config: &AppConfig) -> DoctorCheck {
    let mut renderer = TemplateRenderer::new();
    if config.export.wkhtmltopdf_path.is_some() {
        renderer = renderer.with_converter_path(config.export.wkhtmltopdf_path.clone());
    }
    if renderer.converter_available() {
        DoctorCheck {
            name: "wkhtmltopdf_availability",
            status: CheckStatus::Pass,
            details: "converter resolved; template engine exports will work".to_string(),
        }
    } else {
        DoctorCheck {
            name: "wkhtmltopdf_availability",
            status: CheckStatus::Fail,
            details: "wkhtmltopdf not found; template engine exports will fail, vector engine unaffected"
                .to_string(),
        }
    }
}

fn check_output_dir(config: &AppConfig) -> DoctorCheck {
    let dir = &config.export.output_dir;
    if dir.exists() && !dir.is_dir() {
        return DoctorCheck {
            name: "output_directory",
            status: CheckStatus::Fail,
            details: format!("`{}` exists but is not a directory", dir.display()),
        };
    }
    DoctorCheck {
        name: "output_directory",
        status: CheckStatus::Pass,
        details: format!("exports will be written under `{}`", dir.display()),
    }
}

fn check_logo(config: &AppConfig) -> DoctorCheck {
    match &config.company.logo_path {
        None => DoctorCheck {
            name: "company_logo",
            status: CheckStatus::Pass,
            details: "no logo configured; renderers draw an initials placeholder".to_string(),
        },
        Some(path) if path.is_file() => DoctorCheck {
            name: "company_logo",
            status: CheckStatus::Pass,
            details: format!("logo found at `{}`", path.display()),
        },
        Some(path) => DoctorCheck {
            name: "company_logo",
            status: CheckStatus::Fail,
            details: format!("configured logo `{}` is not a readable file", path.display()),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
