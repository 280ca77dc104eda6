//! Renderer A: the screen/canvas template.
//!
//! One Tera template paints the document into a fixed A4-proportioned
//! HTML tree. The same HTML serves the interactive preview and, via
//! wkhtmltopdf, the pixel-faithful PDF export. Conversion completion
//! is signalled by the converter process exiting, not by a timer.

use std::collections::HashMap;
use std::process::Stdio;

use rust_decimal::Decimal;
use tera::{Context, Tera};
use tokio::process::Command;
use tracing::{error, info, warn};

use freightdesk_core::format::{grouped_2dp, rate_validity};
use freightdesk_core::QuotationDocument;

use crate::{QuotationRenderer, RenderError};

const QUOTATION_TEMPLATE: &str = "quotation.html.tera";

/// Register the filters the quotation template depends on.
///
/// - `grouped`: two decimals with en-US thousands grouping
/// - `money`:   plain 2-decimal rounding
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("grouped", tera_grouped_filter);
    tera.register_filter("money", tera_money_filter);
}

/// Decimals serialize as JSON strings; numbers may also appear. Both
/// are accepted, anything else formats as zero.
fn decimal_of(value: &tera::Value) -> Decimal {
    match value {
        tera::Value::String(text) => text.trim().parse().unwrap_or(Decimal::ZERO),
        tera::Value::Number(number) => {
            number.to_string().parse().unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

fn tera_grouped_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    Ok(tera::Value::String(grouped_2dp(decimal_of(value))))
}

fn tera_money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let rounded = decimal_of(value).round_dp(2);
    Ok(tera::Value::String(format!("{rounded:.2}")))
}

#[derive(Clone, Debug)]
pub struct TemplateRenderer {
    tera: Tera,
    wkhtmltopdf_path: Option<String>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Renderer with the embedded quotation template and a PATH lookup
    /// for wkhtmltopdf.
    pub fn new() -> Self {
        let mut tera = Tera::default();
        register_template_filters(&mut tera);
        tera.add_raw_template(
            QUOTATION_TEMPLATE,
            include_str!("../templates/quotation.html.tera"),
        )
        .expect("embedded quotation template must parse");

        let wkhtmltopdf_path =
            which::which("wkhtmltopdf").ok().map(|path| path.to_string_lossy().to_string());
        if wkhtmltopdf_path.is_none() {
            warn!("wkhtmltopdf not found in PATH; template renders are limited to HTML preview");
        }

        Self { tera, wkhtmltopdf_path }
    }

    /// Renderer loading templates from a directory, for customized
    /// layouts.
    pub fn from_directory(template_dir: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::new(&format!("{template_dir}/**/*"))
            .map_err(|error| RenderError::Template(error.to_string()))?;
        register_template_filters(&mut tera);

        let wkhtmltopdf_path =
            which::which("wkhtmltopdf").ok().map(|path| path.to_string_lossy().to_string());
        Ok(Self { tera, wkhtmltopdf_path })
    }

    /// Overrides converter discovery with an explicit binary path.
    pub fn with_converter_path(mut self, path: Option<String>) -> Self {
        self.wkhtmltopdf_path = path;
        self
    }

    pub fn converter_available(&self) -> bool {
        self.wkhtmltopdf_path.is_some()
    }

    /// Renders the document to the preview HTML used on screen.
    pub fn preview_html(&self, document: &QuotationDocument) -> Result<String, RenderError> {
        let context = build_context(document);
        self.tera
            .render(QUOTATION_TEMPLATE, &context)
            .map_err(|error| RenderError::Template(error.to_string()))
    }

    async fn convert_html_to_pdf(
        &self,
        html: &str,
        wkhtmltopdf_path: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let temp_dir = std::env::temp_dir();
        let html_path = temp_dir.join(format!("quotation_{}.html", uuid::Uuid::new_v4()));
        let pdf_path = temp_dir.join(format!("quotation_{}.pdf", uuid::Uuid::new_v4()));

        tokio::fs::write(&html_path, html).await?;

        // Awaiting the process exit is the completion signal; there is
        // no readiness timer anywhere in this path.
        let output = Command::new(wkhtmltopdf_path)
            .arg("--page-size")
            .arg("A4")
            .arg("--margin-top")
            .arg("10mm")
            .arg("--margin-bottom")
            .arg("10mm")
            .arg("--margin-left")
            .arg("10mm")
            .arg("--margin-right")
            .arg("10mm")
            .arg("--encoding")
            .arg("utf-8")
            .arg("--enable-local-file-access")
            .arg(&html_path)
            .arg(&pdf_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(stderr = %stderr, "wkhtmltopdf failed");
            let _ = tokio::fs::remove_file(&html_path).await;
            return Err(RenderError::Conversion(stderr.to_string()));
        }

        let pdf_bytes = tokio::fs::read(&pdf_path).await?;

        let _ = tokio::fs::remove_file(&html_path).await;
        let _ = tokio::fs::remove_file(&pdf_path).await;

        info!(size = pdf_bytes.len(), "template PDF generated");
        Ok(pdf_bytes)
    }
}

#[async_trait::async_trait]
impl QuotationRenderer for TemplateRenderer {
    async fn render(&self, document: &QuotationDocument) -> Result<Vec<u8>, RenderError> {
        let html = self.preview_html(document)?;
        let Some(converter) = self.wkhtmltopdf_path.as_deref() else {
            return Err(RenderError::ConverterNotFound);
        };
        self.convert_html_to_pdf(&html, converter).await
    }
}

fn build_context(document: &QuotationDocument) -> Context {
    let mut context = Context::new();
    context.insert("company", &document.company);
    context.insert("company_initials", &company_initials(&document.company.name));
    context.insert("meta", &document.meta);
    context.insert(
        "rate_validity",
        &document.meta.rate_validity.map(rate_validity),
    );
    context.insert("customer", &document.customer);
    context.insert("shipment", &document.shipment);
    context.insert("volume", &grouped_2dp(document.shipment.volume));
    context.insert("gross_weight", &grouped_2dp(document.shipment.gross_weight));
    context.insert("chargeable_weight", &grouped_2dp(document.shipment.chargeable_weight));
    context.insert("freight_charges", &document.freight_charges);
    context.insert("other_charges", &other_charges_view(document));
    context.insert("terms", &document.terms_and_conditions);
    context.insert("generated_by", &document.generated_by);
    context
}

/// Placeholder shown in the logo box when no logo is configured.
fn company_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Per-currency tables carry a running total column; Tera cannot
/// accumulate decimals, so the view rows are prepared here.
fn other_charges_view(document: &QuotationDocument) -> Vec<serde_json::Value> {
    document
        .other_charges
        .groups()
        .iter()
        .map(|group| {
            let mut running = Decimal::ZERO;
            let items: Vec<serde_json::Value> = group
                .items
                .iter()
                .map(|item| {
                    running += item.amount;
                    serde_json::json!({
                        "name": item.name,
                        "unit": item.unit,
                        "amount": grouped_2dp(item.amount),
                        "running": grouped_2dp(running),
                    })
                })
                .collect();
            serde_json::json!({
                "currency": group.currency,
                "items": items,
                "total": grouped_2dp(group.total),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use freightdesk_core::{
        ChargeSection, CompanyInfo, CustomerInfo, FreightChargeRow, OtherChargeItem, OtherCharges,
        QuotationDocument, QuoteMeta, ShipmentDetails,
    };

    use crate::{QuotationRenderer, RenderError};

    use super::TemplateRenderer;

    fn document() -> QuotationDocument {
        let mut other_charges = OtherCharges::default();
        other_charges.push(
            "LKR",
            OtherChargeItem {
                name: "DO CHARGES".to_string(),
                amount: Decimal::new(1_800_000, 2),
                unit: "Per BL".to_string(),
                unit_count: Decimal::ONE,
                section: ChargeSection::Destination,
            },
        );

        QuotationDocument {
            company: CompanyInfo {
                name: "Ceylon Freight Lines".to_string(),
                address: "141 Marine Drive, Colombo 03".to_string(),
                phone: "+94 11 234 5678".to_string(),
                logo_path: None,
            },
            meta: QuoteMeta {
                quote_number: "Q-2025-11-36".to_string(),
                service_type: "Sea Export LCL".to_string(),
                terms: "FOB".to_string(),
                rate_validity: None,
            },
            customer: CustomerInfo {
                name: "Lanka Apparel Exports".to_string(),
                address: "Katunayake EPZ, Sri Lanka".to_string(),
            },
            shipment: ShipmentDetails::default(),
            freight_charges: Vec::new(),
            other_charges,
            terms_and_conditions: vec!["Rates valid for 14 days.".to_string()],
            generated_by: "N. Perera".to_string(),
        }
    }

    #[test]
    fn preview_contains_quote_and_customer() {
        let renderer = TemplateRenderer::new();
        let html = renderer.preview_html(&document()).expect("preview renders");

        assert!(html.contains("Q-2025-11-36"));
        assert!(html.contains("Lanka Apparel Exports"));
        assert!(html.contains("QUOTATION"));
    }

    #[test]
    fn empty_freight_table_shows_placeholder_row() {
        let renderer = TemplateRenderer::new();
        let html = renderer.preview_html(&document()).expect("preview renders");
        assert!(html.contains("No freight charges added"));
    }

    #[test]
    fn currency_totals_are_grouped_two_decimal() {
        let renderer = TemplateRenderer::new();
        let html = renderer.preview_html(&document()).expect("preview renders");
        assert!(html.contains("18,000.00"));
        assert!(html.contains("LKR"));
    }

    #[test]
    fn freight_rows_render_rate_with_unit() {
        let mut document = document();
        document.freight_charges.push(FreightChargeRow {
            carrier: "WHL".to_string(),
            rate: Decimal::new(2_300, 2),
            rate_unit: "per CBM".to_string(),
            currency: "USD".to_string(),
            units: Decimal::ONE,
            ..FreightChargeRow::default()
        });

        let renderer = TemplateRenderer::new();
        let html = renderer.preview_html(&document).expect("preview renders");
        assert!(html.contains("23.00 per CBM"));
        assert!(!html.contains("No freight charges added"));
    }

    #[tokio::test]
    async fn missing_converter_aborts_without_partial_output() {
        let renderer = TemplateRenderer::new().with_converter_path(None);
        let error = renderer.render(&document()).await.expect_err("no converter");
        assert!(matches!(error, RenderError::ConverterNotFound));
    }
}
