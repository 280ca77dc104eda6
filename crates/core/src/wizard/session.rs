//! One quotation editing session: the wizard-owned mutable state and
//! the step cursor driving it.

use serde::{Deserialize, Serialize};

use crate::domain::charges::ChargeLine;
use crate::domain::document::{CustomerInfo, QuoteMeta};
use crate::domain::route::{DirectRoute, RoutePlan, TransitRoute};
use crate::domain::terms::TermSheet;
use crate::wizard::engine::{self, WizardTransitionError};
use crate::wizard::states::{
    FreightMode, RoutingCategory, StepOutcome, WizardEvent, WizardStep,
};

/// Everything the wizard owns for the lifetime of one session. The
/// document builder only ever reads this; exported documents are
/// independent snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub mode: Option<FreightMode>,
    pub category: Option<RoutingCategory>,
    pub route_plan: RoutePlan,
    /// Selected carrier option for direct routes.
    pub active_option: usize,
    pub charges: Vec<ChargeLine>,
    pub terms: TermSheet,
    pub meta: QuoteMeta,
    pub customer: CustomerInfo,
    pub pickup_address: String,
    pub delivery_address: String,
    pub generated_by: String,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            mode: None,
            category: None,
            route_plan: RoutePlan::default(),
            active_option: 0,
            charges: Vec::new(),
            terms: TermSheet::default(),
            meta: QuoteMeta {
                quote_number: String::new(),
                service_type: String::new(),
                terms: String::new(),
                rate_validity: None,
            },
            customer: CustomerInfo { name: "-".to_string(), address: "-".to_string() },
            pickup_address: "-".to_string(),
            delivery_address: "-".to_string(),
            generated_by: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    step: WizardStep,
    pub state: WizardState,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Fresh session starting at mode selection.
    pub fn new() -> Self {
        Self { step: WizardStep::ModeSelection, state: WizardState::default() }
    }

    /// Session over a pre-existing document. Mode and category are
    /// already fixed, so editing starts directly at route entry.
    pub fn edit(state: WizardState) -> Self {
        Self { step: WizardStep::RouteAndDetails, state }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn apply(&mut self, event: WizardEvent) -> Result<StepOutcome, WizardTransitionError> {
        let outcome = engine::transition(self.step, event, &self.state)?;
        self.step = outcome.to;
        Ok(outcome)
    }

    /// Records the first-step selections and seeds the matching route
    /// shape. Switching category replaces the plan; switching mode
    /// only updates the service label.
    pub fn select(&mut self, mode: FreightMode, category: RoutingCategory) {
        self.state.mode = Some(mode);
        self.state.meta.service_type = mode.label().to_string();
        if self.state.category != Some(category) {
            self.state.route_plan = match category {
                RoutingCategory::Direct => RoutePlan::Direct(DirectRoute::default()),
                RoutingCategory::Transit => {
                    let mut route = TransitRoute::default();
                    route.recompute_segments();
                    RoutePlan::Transit(route)
                }
                RoutingCategory::Multimodal => RoutePlan::Multimodal,
            };
            self.state.active_option = 0;
        }
        self.state.category = Some(category);
    }

    /// Replaces the transit stop list and recomputes segments in
    /// place. Carrier options already entered for a segment survive as
    /// long as the segment's position is unchanged.
    pub fn set_transit_stops(&mut self, stops: Vec<String>) {
        if let RoutePlan::Transit(route) = &mut self.state.route_plan {
            route.stops = stops;
            route.recompute_segments();
        }
    }

    /// Updates the overall origin/destination, recomputing transit
    /// segments when applicable.
    pub fn set_endpoints(&mut self, pol: impl Into<String>, pod: impl Into<String>) {
        match &mut self.state.route_plan {
            RoutePlan::Direct(route) => {
                route.port_of_loading = pol.into();
                route.port_of_discharge = pod.into();
            }
            RoutePlan::Transit(route) => {
                route.port_of_loading = pol.into();
                route.port_of_discharge = pod.into();
                route.recompute_segments();
            }
            RoutePlan::Multimodal | RoutePlan::Legacy { .. } => {}
        }
    }

    pub fn add_charge(&mut self, line: ChargeLine) {
        self.state.charges.push(line);
    }

    pub fn remove_charge(&mut self, index: usize) {
        if index < self.state.charges.len() {
            self.state.charges.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::route::{RouteOption, RoutePlan};
    use crate::wizard::states::{FreightMode, RoutingCategory};

    use super::WizardSession;

    #[test]
    fn selecting_transit_seeds_one_segment() {
        let mut session = WizardSession::new();
        session.select(FreightMode::AirExport, RoutingCategory::Transit);
        session.set_endpoints("CMB", "LHR");

        match &session.state.route_plan {
            RoutePlan::Transit(route) => {
                assert_eq!(route.segments.len(), 1);
                assert_eq!(route.segments[0].from, "CMB");
                assert_eq!(route.segments[0].to, "LHR");
            }
            other => panic!("expected transit plan, got {other:?}"),
        }
    }

    #[test]
    fn stop_edits_preserve_unmoved_segment_options() {
        let mut session = WizardSession::new();
        session.select(FreightMode::AirExport, RoutingCategory::Transit);
        session.set_endpoints("CMB", "LHR");
        session.set_transit_stops(vec!["DXB".to_string()]);

        if let RoutePlan::Transit(route) = &mut session.state.route_plan {
            route.segments[0].options =
                vec![RouteOption { carrier: "EK".to_string(), ..RouteOption::default() }];
        }

        // Appending a later stop must not discard the CMB->DXB rates.
        session.set_transit_stops(vec!["DXB".to_string(), "FRA".to_string()]);

        match &session.state.route_plan {
            RoutePlan::Transit(route) => {
                assert_eq!(route.segments.len(), 3);
                assert_eq!(route.segments[0].options[0].carrier, "EK");
            }
            other => panic!("expected transit plan, got {other:?}"),
        }
    }

    #[test]
    fn reselecting_same_category_keeps_route_data() {
        let mut session = WizardSession::new();
        session.select(FreightMode::SeaExportFcl, RoutingCategory::Direct);
        session.set_endpoints("CMB", "SIN");

        session.select(FreightMode::SeaImportFcl, RoutingCategory::Direct);
        match &session.state.route_plan {
            RoutePlan::Direct(route) => assert_eq!(route.port_of_loading, "CMB"),
            other => panic!("expected direct plan, got {other:?}"),
        }
        assert_eq!(session.state.meta.service_type, "Sea Import FCL");
    }

    #[test]
    fn switching_category_resets_the_plan() {
        let mut session = WizardSession::new();
        session.select(FreightMode::SeaExportFcl, RoutingCategory::Direct);
        session.set_endpoints("CMB", "SIN");

        session.select(FreightMode::SeaExportFcl, RoutingCategory::Multimodal);
        assert_eq!(session.state.route_plan, RoutePlan::Multimodal);
    }
}
