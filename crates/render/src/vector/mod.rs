//! Renderer B: the direct vector PDF writer.
//!
//! Paints a `QuotationDocument` straight onto A4 pages with text,
//! line, and table primitives. An explicit cursor tracks consumed
//! height; the terms block is the one fixed pagination checkpoint,
//! while tables paginate themselves. Column widths, fonts, and line
//! styles are constants, so geometry is deterministic for a given
//! document.

mod table;

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm,
    PdfDocument, Px, Rgb,
};
use tracing::{debug, warn};

use freightdesk_core::format::{grouped_2dp, rate_validity};
use freightdesk_core::{ChargeSection, CompanyInfo, QuotationDocument};

use crate::{QuotationRenderer, RenderError};

use self::table::{
    draw_table, text_width_mm, wrap_text, Column, Fonts, PageCursor, CONTENT_WIDTH, MARGIN,
    PAGE_HEIGHT, PAGE_WIDTH, PT_TO_MM,
};

const BASE_SIZE: f32 = 9.0;
const SMALL_SIZE: f32 = 8.0;
const TITLE_SIZE: f32 = 16.0;
const LOGO_WIDTH: f32 = 40.0;
const LOGO_HEIGHT: f32 = 18.0;
/// Consumed millimetres beyond which the terms block starts a new page.
const TERMS_BREAK_AT: f32 = 250.0;

const FREIGHT_COLUMNS: [Column; 11] = [
    Column { header: "Carrier", width: 20.0 },
    Column { header: "Carrier UOM", width: 18.0 },
    Column { header: "Unit Type", width: 16.0 },
    Column { header: "Units", width: 11.0 },
    Column { header: "Rate", width: 16.0 },
    Column { header: "Currency", width: 14.0 },
    Column { header: "Total", width: 18.0 },
    Column { header: "TT", width: 10.0 },
    Column { header: "Freq", width: 15.0 },
    Column { header: "Route", width: 18.0 },
    Column { header: "Comments", width: 30.0 },
];

const OTHER_CHARGE_COLUMNS: [Column; 3] = [
    Column { header: "Description", width: 86.0 },
    Column { header: "Amount", width: 50.0 },
    Column { header: "Units", width: 50.0 },
];

#[derive(Clone, Copy, Debug, Default)]
pub struct VectorRenderer;

impl VectorRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl QuotationRenderer for VectorRenderer {
    async fn render(&self, document: &QuotationDocument) -> Result<Vec<u8>, RenderError> {
        draw_document(document)
    }
}

fn drawing(error: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(error.to_string())
}

pub(crate) fn draw_document(document: &QuotationDocument) -> Result<Vec<u8>, RenderError> {
    let title = format!("Quotation {}", document.meta.quote_number);
    let (pdf, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");

    let fonts = Fonts {
        regular: pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(drawing)?,
        bold: pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(drawing)?,
        italic: pdf.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(drawing)?,
    };

    let mut cursor = PageCursor::new(&pdf, pdf.get_page(page).get_layer(layer));
    cursor.layer.set_outline_color(Color::Rgb(Rgb::new(0.3, 0.3, 0.3, None)));
    cursor.layer.set_outline_thickness(0.3);

    draw_header(&mut cursor, &fonts, &document.company);
    draw_title(&mut cursor, &fonts);
    draw_meta_line(&mut cursor, &fonts, document);
    draw_customer(&mut cursor, &fonts, document);
    draw_address_pair(&mut cursor, &fonts, document);
    draw_shipment_tables(&mut cursor, &fonts, document);
    draw_freight_table(&mut cursor, &fonts, document);
    draw_other_charges(&mut cursor, &fonts, document);
    cursor.rule();

    // The one explicit pagination checkpoint: terms start a fresh page
    // when most of the current one is already consumed.
    if cursor.from_top() > TERMS_BREAK_AT {
        cursor.break_page();
    }
    draw_terms(&mut cursor, &fonts, document);
    draw_footer(&mut cursor, &fonts, document);

    debug!(
        quote_number = %document.meta.quote_number,
        pages = cursor.pages(),
        "vector quotation drawn"
    );

    let mut buffer = BufWriter::new(Vec::new());
    pdf.save(&mut buffer).map_err(drawing)?;
    buffer.into_inner().map_err(|error| RenderError::Conversion(error.to_string()))
}

fn draw_header(cursor: &mut PageCursor<'_>, fonts: &Fonts, company: &CompanyInfo) {
    let top = cursor.y();
    draw_logo_block(cursor, fonts, company, top);

    let right = PAGE_WIDTH - MARGIN;
    cursor.advance(5.0);
    cursor.text_right(&company.name, 11.0, right, &fonts.bold);
    cursor.advance(5.0);
    cursor.text_right(&company.address, BASE_SIZE, right, &fonts.regular);
    cursor.advance(5.0);
    cursor.text_right(&company.phone, BASE_SIZE, right, &fonts.regular);

    // Clear the logo block regardless of how many text lines ran.
    cursor.advance(LOGO_HEIGHT - 15.0 + 6.0);
}

fn draw_logo_block(cursor: &PageCursor<'_>, fonts: &Fonts, company: &CompanyInfo, top: f32) {
    if let Some(path) = &company.logo_path {
        match load_logo(path) {
            Ok((xobject, width_px, height_px)) => {
                // Pick the dpi that fits the image inside the logo box.
                let dpi_w = width_px as f32 * 25.4 / LOGO_WIDTH;
                let dpi_h = height_px as f32 * 25.4 / LOGO_HEIGHT;
                let dpi = dpi_w.max(dpi_h);
                let drawn_height = height_px as f32 * 25.4 / dpi;

                Image::from(xobject).add_to_layer(
                    cursor.layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(MARGIN)),
                        translate_y: Some(Mm(top - LOGO_HEIGHT + (LOGO_HEIGHT - drawn_height) / 2.0)),
                        dpi: Some(dpi),
                        ..ImageTransform::default()
                    },
                );
                return;
            }
            Err(error) => {
                warn!(%error, logo = %path.display(), "logo unreadable, drawing placeholder");
            }
        }
    }

    // Placeholder box with company initials.
    cursor.line(MARGIN, MARGIN + LOGO_WIDTH, top, top);
    cursor.line(MARGIN, MARGIN + LOGO_WIDTH, top - LOGO_HEIGHT, top - LOGO_HEIGHT);
    cursor.line(MARGIN, MARGIN, top, top - LOGO_HEIGHT);
    cursor.line(MARGIN + LOGO_WIDTH, MARGIN + LOGO_WIDTH, top, top - LOGO_HEIGHT);

    let initials: String = company
        .name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase();
    let x = MARGIN + (LOGO_WIDTH - text_width_mm(&initials, 14.0)) / 2.0;
    cursor.layer.use_text(&initials, 14.0, Mm(x), Mm(top - LOGO_HEIGHT / 2.0 - 2.0), &fonts.bold);
}

fn load_logo(path: &std::path::Path) -> Result<(ImageXObject, u32, u32), RenderError> {
    let decoded = image::open(path).map_err(drawing)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    let xobject = ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: decoded.into_raw(),
        image_filter: None,
        clipping_bbox: None,
    };
    Ok((xobject, width, height))
}

fn draw_title(cursor: &mut PageCursor<'_>, fonts: &Fonts) {
    cursor.advance(TITLE_SIZE * PT_TO_MM);
    cursor.text_centered("QUOTATION", TITLE_SIZE, &fonts.bold);
    cursor.advance(6.0);
}

fn draw_meta_line(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    cursor.advance(4.0);
    let mut line = format!(
        "Quote No: {}    Service: {}    Terms: {}",
        document.meta.quote_number, document.meta.service_type, document.meta.terms
    );
    if let Some(validity) = document.meta.rate_validity {
        line.push_str(&format!("    Rate Validity: {}", rate_validity(validity)));
    }
    cursor.text(&line, BASE_SIZE, MARGIN, &fonts.regular);
    cursor.advance(5.0);
}

fn draw_customer(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    cursor.advance(1.0);
    cursor.text(&document.customer.name, BASE_SIZE, MARGIN, &fonts.bold);
    cursor.advance(4.5);
    for line in wrap_text(&document.customer.address, 90) {
        cursor.text(&line, BASE_SIZE, MARGIN, &fonts.regular);
        cursor.advance(4.5);
    }
}

fn draw_address_pair(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    let half = CONTENT_WIDTH / 2.0;
    let pickup = wrap_text(&format!("Pickup Address: {}", document.shipment.pickup_address), 48);
    let delivery =
        wrap_text(&format!("Delivery Address: {}", document.shipment.delivery_address), 48);

    let lines = pickup.len().max(delivery.len());
    for index in 0..lines {
        if let Some(line) = pickup.get(index) {
            cursor.text(line, BASE_SIZE, MARGIN, &fonts.regular);
        }
        if let Some(line) = delivery.get(index) {
            cursor.text(line, BASE_SIZE, MARGIN + half, &fonts.regular);
        }
        cursor.advance(4.5);
    }
    cursor.advance(1.0);
    cursor.rule();
}

fn draw_shipment_tables(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    let shipment = &document.shipment;

    let port_columns = [
        Column { header: "Port of Loading", width: CONTENT_WIDTH / 2.0 },
        Column { header: "Port of Discharge", width: CONTENT_WIDTH / 2.0 },
    ];
    draw_table(
        cursor,
        fonts,
        &port_columns,
        &[vec![shipment.pol.clone(), shipment.pod.clone()]],
        BASE_SIZE,
    );
    cursor.advance(2.0);

    let measurement_columns = [
        Column { header: "Delivery Terms", width: CONTENT_WIDTH * 0.2 },
        Column { header: "PCS", width: CONTENT_WIDTH * 0.14 },
        Column { header: "Volume (CBM)", width: CONTENT_WIDTH * 0.22 },
        Column { header: "Gross Weight", width: CONTENT_WIDTH * 0.22 },
        Column { header: "Chargeable Weight", width: CONTENT_WIDTH * 0.22 },
    ];
    draw_table(
        cursor,
        fonts,
        &measurement_columns,
        &[vec![
            shipment.delivery_terms.clone(),
            shipment.pcs.to_string(),
            grouped_2dp(shipment.volume),
            grouped_2dp(shipment.gross_weight),
            grouped_2dp(shipment.chargeable_weight),
        ]],
        BASE_SIZE,
    );
    cursor.advance(4.0);
}

fn draw_freight_table(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    cursor.ensure_room(20.0);
    cursor.advance(4.0);
    cursor.text("Freight Charges", 10.0, MARGIN, &fonts.bold);
    cursor.advance(2.0);

    let rows: Vec<Vec<String>> = if document.freight_charges.is_empty() {
        vec![vec![
            "No freight charges added".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]]
    } else {
        document
            .freight_charges
            .iter()
            .map(|row| {
                vec![
                    row.carrier.clone(),
                    row.carrier_uom.clone(),
                    row.unit_type.clone(),
                    row.units.normalize().to_string(),
                    grouped_2dp(row.rate),
                    row.currency.clone(),
                    grouped_2dp(row.total()),
                    row.transit_time.clone(),
                    row.frequency.clone(),
                    row.route_label.clone(),
                    row.comments.clone(),
                ]
            })
            .collect()
    };

    draw_table(cursor, fonts, &FREIGHT_COLUMNS, &rows, SMALL_SIZE);
    cursor.advance(4.0);
}

fn draw_other_charges(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    cursor.ensure_room(20.0);
    cursor.advance(4.0);
    cursor.text("Other Charges", 10.0, MARGIN, &fonts.bold);
    cursor.advance(2.0);

    draw_table(cursor, fonts, &OTHER_CHARGE_COLUMNS, &other_charge_rows(document), SMALL_SIZE);
    cursor.advance(4.0);

    // Bold total per currency; zero totals are suppressed.
    for group in document.other_charges.groups() {
        if group.total.is_zero() {
            continue;
        }
        cursor.ensure_room(6.0);
        cursor.text(
            &format!("Total {}: {}", group.currency, grouped_2dp(group.total)),
            BASE_SIZE,
            MARGIN,
            &fonts.bold,
        );
        cursor.advance(5.0);
    }
    cursor.advance(1.0);
}

/// Flattens handling charges section by section (origin, transit
/// stops, destination), then appends destination-tagged freight rows
/// under a "Destination Charges (POD)" label.
fn other_charge_rows(document: &QuotationDocument) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    let mut push_section = |matches: &dyn Fn(ChargeSection) -> bool, rows: &mut Vec<Vec<String>>| {
        for group in document.other_charges.groups() {
            for item in group.items.iter().filter(|item| matches(item.section)) {
                rows.push(vec![
                    item.name.clone(),
                    format!("{} {}", group.currency, grouped_2dp(item.amount)),
                    format!("{} ({})", item.unit, item.unit_count.normalize()),
                ]);
            }
        }
    };

    push_section(&|section| section == ChargeSection::Origin, &mut rows);
    push_section(&|section| matches!(section, ChargeSection::Transit(_)), &mut rows);
    push_section(&|section| section == ChargeSection::Destination, &mut rows);

    let pod_freight: Vec<&freightdesk_core::FreightChargeRow> = document
        .freight_charges
        .iter()
        .filter(|row| row.section == ChargeSection::Destination)
        .collect();
    if !pod_freight.is_empty() {
        rows.push(vec!["Destination Charges (POD)".to_string(), String::new(), String::new()]);
        for row in pod_freight {
            rows.push(vec![
                row.carrier_uom.clone(),
                format!("{} {}", row.currency, grouped_2dp(row.total())),
                format!("{} ({})", row.unit_type, row.units.normalize()),
            ]);
        }
    }

    if rows.is_empty() {
        rows.push(vec!["No additional charges".to_string(), String::new(), String::new()]);
    }
    rows
}

fn draw_terms(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    if document.terms_and_conditions.is_empty() {
        return;
    }
    cursor.advance(4.0);
    cursor.text("Terms & Conditions", 10.0, MARGIN, &fonts.bold);
    cursor.advance(5.0);

    for term in &document.terms_and_conditions {
        for (index, line) in wrap_text(term, 100).iter().enumerate() {
            cursor.ensure_room(5.0);
            let text =
                if index == 0 { format!("- {line}") } else { format!("  {line}") };
            cursor.text(&text, BASE_SIZE, MARGIN, &fonts.regular);
            cursor.advance(4.2);
        }
    }
}

fn draw_footer(cursor: &mut PageCursor<'_>, fonts: &Fonts, document: &QuotationDocument) {
    cursor.ensure_room(14.0);
    cursor.advance(6.0);
    cursor.text(
        &format!("Generated by: {}", document.generated_by),
        BASE_SIZE,
        MARGIN,
        &fonts.regular,
    );
    cursor.advance(5.0);
    cursor.text(
        "This is a system generated quotation and is valid only for the stated validity period.",
        SMALL_SIZE,
        MARGIN,
        &fonts.italic,
    );
    cursor.advance(4.0);
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use freightdesk_core::{
        ChargeKind, ChargeLine, ChargeSection, CompanyInfo, CustomerInfo, OtherChargeItem,
        OtherCharges, QuotationDocument, QuoteMeta, ShipmentDetails,
    };

    use super::{draw_document, other_charge_rows};

    fn document() -> QuotationDocument {
        let mut other_charges = OtherCharges::default();
        other_charges.push(
            "USD",
            OtherChargeItem {
                name: "Handling Charge".to_string(),
                amount: Decimal::new(2_500, 2),
                unit: "Per Shipment".to_string(),
                unit_count: Decimal::ONE,
                section: ChargeSection::Origin,
            },
        );
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
    fn produces_a_pdf_byte_stream() {
        let bytes = draw_document(&document()).expect("draw");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn many_terms_still_render() {
        let mut document = document();
        document.terms_and_conditions = (0..60)
            .map(|index| format!("Condition {index}: subject to standard trading conditions."))
            .collect();
        let bytes = draw_document(&document).expect("draw with page breaks");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn origin_rows_come_before_destination_rows() {
        let rows = other_charge_rows(&document());
        assert_eq!(rows[0][0], "Handling Charge");
        assert_eq!(rows[1][0], "DO CHARGES");
        assert!(rows[1][1].starts_with("LKR"));
    }

    #[test]
    fn destination_freight_forms_a_labeled_subgroup() {
        let mut document = document();
        let line = ChargeLine {
            name: "DELIVERY ORDER".to_string(),
            unit_type: "Per BL".to_string(),
            number_of_units: Decimal::ONE,
            amount: Decimal::new(4_500, 2),
            currency: "USD".to_string(),
            section: ChargeSection::Destination,
            kind: ChargeKind::Freight,
            ..ChargeLine::default()
        };
        document.freight_charges.push(freightdesk_core::FreightChargeRow {
            carrier_uom: line.name.clone(),
            unit_type: line.unit_type.clone(),
            units: line.number_of_units,
            rate: line.amount,
            currency: line.currency_code(),
            section: ChargeSection::Destination,
            ..freightdesk_core::FreightChargeRow::default()
        });

        let rows = other_charge_rows(&document);
        let label_index = rows
            .iter()
            .position(|row| row[0] == "Destination Charges (POD)")
            .expect("labeled subgroup");
        assert_eq!(rows[label_index + 1][0], "DELIVERY ORDER");
        assert_eq!(rows[label_index + 1][1], "USD 45.00");
    }
}
