//! Route normalization: reduce whichever route shape the wizard holds
//! to the shipment fields the document model needs.

use tracing::warn;

use crate::domain::document::ShipmentDetails;
use crate::domain::route::{RouteOption, RoutePlan};

/// Resolves the shipment sub-object from the active route. Always
/// returns a complete value with `"-"`/`0` defaults for anything the
/// route does not supply; renderers never see a missing field.
pub fn resolve_shipment_fields(plan: &RoutePlan, active_option: usize) -> ShipmentDetails {
    match plan {
        RoutePlan::Direct(route) => {
            // Out-of-range option selectors fall back to the first
            // option rather than failing the whole export.
            let option = route.options.get(active_option).or_else(|| route.options.first());
            let mut shipment = match option {
                Some(option) => from_option(option),
                None => ShipmentDetails::default(),
            };
            shipment.pol = port_or_dash(&route.port_of_loading);
            shipment.pod = port_or_dash(&route.port_of_discharge);
            shipment
        }
        RoutePlan::Transit(route) => {
            // End-to-end ports plus the overall measurement bundle.
            // Per-leg measurements are a known modeling gap; segments
            // carry carrier/rate detail only.
            let mut shipment = from_option(&route.measurements);
            shipment.pol = port_or_dash(&route.port_of_loading);
            shipment.pod = port_or_dash(&route.port_of_discharge);
            shipment
        }
        RoutePlan::Multimodal => ShipmentDetails::default(),
        RoutePlan::Legacy { .. } => {
            warn!("legacy route shape encountered, rendering shipment defaults");
            ShipmentDetails::default()
        }
    }
}

fn from_option(option: &RouteOption) -> ShipmentDetails {
    ShipmentDetails {
        delivery_terms: if option.incoterm.trim().is_empty() {
            "-".to_string()
        } else {
            option.incoterm.clone()
        },
        pcs: option.total_pieces,
        volume: option.cbm,
        gross_weight: option.gross_weight,
        chargeable_weight: option.chargeable_weight,
        ..ShipmentDetails::default()
    }
}

fn port_or_dash(port: &str) -> String {
    let trimmed = port.trim();
    if trimmed.is_empty() {
        "-".to_string()
    } else {
        trimmed.to_string()
    }
}
