//! Tolerant decoding of stored wizard state.
//!
//! The persistence collaborator stores route, charge, and term
//! sub-structures as opaque JSON text blobs. Any of them may come back
//! absent or malformed; loading degrades to empty structures (or the
//! typed legacy route variant) instead of failing the whole edit-load.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::charges::ChargeLine;
use crate::domain::document::{CustomerInfo, QuoteMeta};
use crate::domain::route::RoutePlan;
use crate::domain::terms::{TermEntry, TermSheet};
use crate::wizard::session::WizardState;
use crate::wizard::states::{FreightMode, RoutingCategory};

/// The stored form of one quotation, as handed back by the persistence
/// API. Sub-structures are opaque text blobs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredQuotation {
    pub quote_number: String,
    pub service_type: String,
    pub terms_label: String,
    pub rate_validity: Option<chrono::DateTime<chrono::Utc>>,
    pub mode: Option<FreightMode>,
    pub category: Option<RoutingCategory>,
    pub customer_name: String,
    pub customer_address: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub generated_by: String,
    pub active_option: usize,
    pub route_blob: Option<String>,
    pub charges_blob: Option<String>,
    pub terms_blob: Option<String>,
}

pub fn decode_route_plan(raw: Option<&str>) -> RoutePlan {
    let Some(text) = non_blank(raw) else {
        return RoutePlan::default();
    };
    match serde_json::from_str::<RoutePlan>(text) {
        Ok(plan) => plan,
        Err(error) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => {
                warn!(%error, "unrecognized route blob shape, keeping raw value");
                RoutePlan::Legacy { raw: value }
            }
            Err(parse_error) => {
                warn!(%parse_error, "unparseable route blob, using empty direct route");
                RoutePlan::default()
            }
        },
    }
}

pub fn decode_charges(raw: Option<&str>) -> Vec<ChargeLine> {
    let Some(text) = non_blank(raw) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<ChargeLine>>(text) {
        Ok(lines) => lines,
        Err(error) => {
            warn!(%error, "unparseable charges blob, using no charges");
            Vec::new()
        }
    }
}

pub fn decode_terms(raw: Option<&str>) -> TermSheet {
    let Some(text) = non_blank(raw) else {
        return TermSheet::default();
    };
    match serde_json::from_str::<Vec<TermEntry>>(text) {
        Ok(entries) => TermSheet::from_entries(entries),
        Err(error) => {
            warn!(%error, "unparseable terms blob, reseeding defaults");
            TermSheet::default()
        }
    }
}

/// Rebuilds wizard state from the stored record. Every blob decodes
/// independently, so one bad blob never poisons the others.
pub fn load_wizard_state(stored: &StoredQuotation) -> WizardState {
    WizardState {
        mode: stored.mode,
        category: stored.category,
        route_plan: decode_route_plan(stored.route_blob.as_deref()),
        active_option: stored.active_option,
        charges: decode_charges(stored.charges_blob.as_deref()),
        terms: decode_terms(stored.terms_blob.as_deref()),
        meta: QuoteMeta {
            quote_number: stored.quote_number.clone(),
            service_type: stored.service_type.clone(),
            terms: stored.terms_label.clone(),
            rate_validity: stored.rate_validity,
        },
        customer: CustomerInfo {
            name: display_or_dash(&stored.customer_name),
            address: display_or_dash(&stored.customer_address),
        },
        pickup_address: display_or_dash(&stored.pickup_address),
        delivery_address: display_or_dash(&stored.delivery_address),
        generated_by: stored.generated_by.clone(),
    }
}

/// Serializes the wizard sub-structures back into storable blobs.
pub fn store_wizard_state(state: &WizardState) -> StoredQuotation {
    StoredQuotation {
        quote_number: state.meta.quote_number.clone(),
        service_type: state.meta.service_type.clone(),
        terms_label: state.meta.terms.clone(),
        rate_validity: state.meta.rate_validity,
        mode: state.mode,
        category: state.category,
        customer_name: state.customer.name.clone(),
        customer_address: state.customer.address.clone(),
        pickup_address: state.pickup_address.clone(),
        delivery_address: state.delivery_address.clone(),
        generated_by: state.generated_by.clone(),
        active_option: state.active_option,
        route_blob: serde_json::to_string(&state.route_plan).ok(),
        charges_blob: serde_json::to_string(&state.charges).ok(),
        terms_blob: serde_json::to_string(state.terms.entries()).ok(),
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|text| !text.is_empty())
}

fn display_or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
