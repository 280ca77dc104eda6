//! Document model builder: combines wizard state, aggregation, and
//! normalization into one canonical `QuotationDocument` snapshot.

use tracing::debug;

use crate::aggregate::add_charges_to_document;
use crate::domain::charges::ChargeLine;
use crate::domain::document::{CompanyInfo, FreightChargeRow, QuotationDocument};
use crate::domain::route::{RouteOption, RoutePlan};
use crate::normalize::resolve_shipment_fields;
use crate::wizard::session::WizardState;

/// Builds a fresh document snapshot for one preview or export request.
/// `option_index` overrides the wizard's active carrier option; out of
/// range falls back per the normalizer. The result shares nothing with
/// the wizard state, so later edits cannot mutate it.
pub fn build_document(
    state: &WizardState,
    company: &CompanyInfo,
    option_index: Option<usize>,
) -> QuotationDocument {
    let active_option = option_index.unwrap_or(state.active_option);
    let mut shipment = resolve_shipment_fields(&state.route_plan, active_option);
    shipment.pickup_address = state.pickup_address.clone();
    shipment.delivery_address = state.delivery_address.clone();

    let breakdown = add_charges_to_document(&state.charges);
    let option = selected_option(&state.route_plan, active_option);
    let route_label = state.route_plan.label().to_string();
    let freight_charges = breakdown
        .freight_lines
        .iter()
        .map(|line| freight_row(line, option, &route_label))
        .collect();

    debug!(
        quote_number = %state.meta.quote_number,
        option = active_option,
        currencies = breakdown.other_charges.groups().len(),
        "built quotation document"
    );

    QuotationDocument {
        company: company.clone(),
        meta: state.meta.clone(),
        customer: state.customer.clone(),
        shipment,
        freight_charges,
        other_charges: breakdown.other_charges,
        terms_and_conditions: state.terms.selected_texts(),
        generated_by: state.generated_by.clone(),
    }
}

/// One independent document per carrier option of a direct route,
/// sharing the same quote number and differing only in option content.
/// Non-direct plans produce a single document.
pub fn build_all_option_documents(
    state: &WizardState,
    company: &CompanyInfo,
) -> Vec<QuotationDocument> {
    match &state.route_plan {
        RoutePlan::Direct(route) if route.options.len() > 1 => (0..route.options.len())
            .map(|index| build_document(state, company, Some(index)))
            .collect(),
        _ => vec![build_document(state, company, None)],
    }
}

fn selected_option(plan: &RoutePlan, active_option: usize) -> Option<&RouteOption> {
    match plan {
        RoutePlan::Direct(route) => {
            route.options.get(active_option).or_else(|| route.options.first())
        }
        RoutePlan::Transit(route) => Some(&route.measurements),
        RoutePlan::Multimodal | RoutePlan::Legacy { .. } => None,
    }
}

fn freight_row(line: &ChargeLine, option: Option<&RouteOption>, route_label: &str) -> FreightChargeRow {
    let carrier = if line.carrier.trim().is_empty() {
        option.map(|option| option.carrier.clone()).unwrap_or_default()
    } else {
        line.carrier.clone()
    };

    FreightChargeRow {
        carrier,
        equipment: option.map(|option| option.equipment.clone()).unwrap_or_default(),
        containers: option.map(|option| option.units).unwrap_or_default(),
        rate: line.amount,
        rate_unit: line.unit_type.clone(),
        currency: line.currency_code(),
        carrier_uom: line.name.clone(),
        unit_type: line.unit_type.clone(),
        units: line.number_of_units,
        surcharge: line.surcharge.clone(),
        transit_time: line.transit_time.clone(),
        frequency: line.frequency.clone(),
        route_label: route_label.to_string(),
        comments: line.comments.clone(),
        section: line.section,
    }
}
