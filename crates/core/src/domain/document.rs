//! The canonical, renderer-facing quotation document model.
//!
//! A `QuotationDocument` is an independent snapshot produced by the
//! builder once per preview or export request. It never aliases wizard
//! state, so later edits cannot mutate an already-rendered document.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::charges::ChargeSection;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub logo_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteMeta {
    pub quote_number: String,
    pub service_type: String,
    pub terms: String,
    pub rate_validity: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub address: String,
}

/// Shipment attributes resolved from the active route. Every field has
/// a displayable default so renderers never see a missing value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDetails {
    pub pol: String,
    pub pod: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub delivery_terms: String,
    pub pcs: u32,
    pub volume: Decimal,
    pub gross_weight: Decimal,
    pub chargeable_weight: Decimal,
}

impl Default for ShipmentDetails {
    fn default() -> Self {
        Self {
            pol: "-".to_string(),
            pod: "-".to_string(),
            pickup_address: "-".to_string(),
            delivery_address: "-".to_string(),
            delivery_terms: "-".to_string(),
            pcs: 0,
            volume: Decimal::ZERO,
            gross_weight: Decimal::ZERO,
            chargeable_weight: Decimal::ZERO,
        }
    }
}

/// One row of the main freight-charges table, insertion order preserved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FreightChargeRow {
    pub carrier: String,
    pub equipment: String,
    pub containers: u32,
    pub rate: Decimal,
    pub rate_unit: String,
    pub currency: String,
    /// Carrier unit of measure, shown by the vector layout.
    pub carrier_uom: String,
    pub unit_type: String,
    pub units: Decimal,
    pub surcharge: String,
    pub transit_time: String,
    pub frequency: String,
    pub route_label: String,
    pub comments: String,
    pub section: ChargeSection,
}

impl FreightChargeRow {
    pub fn total(&self) -> Decimal {
        self.rate * self.units
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OtherChargeItem {
    pub name: String,
    pub amount: Decimal,
    pub unit: String,
    pub unit_count: Decimal,
    pub section: ChargeSection,
}

/// Charges for one currency. `total` is maintained by [`OtherCharges`]
/// and always equals the sum of `items[].amount`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyGroup {
    pub currency: String,
    pub items: Vec<OtherChargeItem>,
    pub total: Decimal,
}

/// Per-currency charge groups, ordered by first appearance. Groups are
/// only created when an item is pushed, so zero-item currencies never
/// show up in rendered output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtherCharges {
    groups: Vec<CurrencyGroup>,
}

impl OtherCharges {
    pub fn push(&mut self, currency: &str, item: OtherChargeItem) {
        let code = normalize_currency(currency);
        let amount = item.amount;
        match self.groups.iter_mut().find(|group| group.currency == code) {
            Some(group) => {
                group.items.push(item);
                group.total += amount;
            }
            None => {
                self.groups.push(CurrencyGroup { currency: code, items: vec![item], total: amount })
            }
        }
    }

    /// Case-insensitive lookup by currency code.
    pub fn get(&self, currency: &str) -> Option<&CurrencyGroup> {
        let code = normalize_currency(currency);
        self.groups.iter().find(|group| group.currency == code)
    }

    pub fn groups(&self) -> &[CurrencyGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn normalize_currency(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        "USD".to_string()
    } else {
        trimmed.to_ascii_uppercase()
    }
}

/// The complete quotation document consumed by both renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuotationDocument {
    pub company: CompanyInfo,
    pub meta: QuoteMeta,
    pub customer: CustomerInfo,
    pub shipment: ShipmentDetails,
    pub freight_charges: Vec<FreightChargeRow>,
    pub other_charges: OtherCharges,
    pub terms_and_conditions: Vec<String>,
    pub generated_by: String,
}
