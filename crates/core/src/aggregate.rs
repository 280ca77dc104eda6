//! Charge aggregation: flat wizard charge lines into per-currency
//! groups plus the ordered freight-table source list.
//!
//! Pure and deterministic given input order; no I/O.

use crate::domain::charges::{ChargeKind, ChargeLine};
use crate::domain::document::{OtherChargeItem, OtherCharges};

/// Aggregation output consumed by the document builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChargeBreakdown {
    /// Freight-kind lines in insertion order. These feed the main
    /// freight table and are never folded into `other_charges`, even
    /// though they share the same per-line total computation.
    pub freight_lines: Vec<ChargeLine>,
    pub other_charges: OtherCharges,
}

/// Partitions charge lines into the freight-table list and per-currency
/// buckets of everything else, accumulating per-currency totals.
pub fn add_charges_to_document(lines: &[ChargeLine]) -> ChargeBreakdown {
    let mut breakdown = ChargeBreakdown::default();

    for line in lines {
        match line.kind {
            ChargeKind::Freight => breakdown.freight_lines.push(line.clone()),
            ChargeKind::Handling => breakdown.other_charges.push(
                &line.currency_code(),
                OtherChargeItem {
                    name: line.name.clone(),
                    amount: line.line_total(),
                    unit: line.unit_type.clone(),
                    unit_count: line.number_of_units,
                    section: line.section,
                },
            ),
        }
    }

    breakdown
}
