//! Transition rules for the quotation wizard.
//!
//! `ModeSelection -> RouteAndDetails` is guarded: both a freight mode
//! and a routing category must be chosen, and failures are typed and
//! shown inline, never thrown as panics. The forward transition out of
//! `RouteAndDetails` is deliberately unguarded; measurement fields may
//! stay at their defaults. `Save` and `GeneratePdf` are independent
//! terminal actions available only on the final step.

use thiserror::Error;

use crate::wizard::session::WizardState;
use crate::wizard::states::{StepOutcome, WizardAction, WizardEvent, WizardStep};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardTransitionError {
    #[error("selections required before continuing: {missing:?}")]
    MissingSelections { missing: Vec<String> },
    #[error("invalid wizard transition from {step:?} using event {event:?}")]
    InvalidTransition { step: WizardStep, event: WizardEvent },
}

pub(crate) fn transition(
    current: WizardStep,
    event: WizardEvent,
    state: &WizardState,
) -> Result<StepOutcome, WizardTransitionError> {
    use WizardEvent::{Back, GeneratePdf, Next, Save};
    use WizardStep::{ChargesAndTerms, ModeSelection, RouteAndDetails};

    let (to, actions) = match (current, event) {
        (ModeSelection, Next) => {
            let mut missing = Vec::new();
            if state.mode.is_none() {
                missing.push("freight mode".to_string());
            }
            if state.category.is_none() {
                missing.push("routing category".to_string());
            }
            if !missing.is_empty() {
                return Err(WizardTransitionError::MissingSelections { missing });
            }
            (RouteAndDetails, Vec::new())
        }
        (RouteAndDetails, Next) => (ChargesAndTerms, Vec::new()),
        (RouteAndDetails, Back) => (ModeSelection, Vec::new()),
        (ChargesAndTerms, Back) => (RouteAndDetails, Vec::new()),
        (ChargesAndTerms, Save) => {
            (ChargesAndTerms, vec![WizardAction::PersistDraft, WizardAction::CloseWizard])
        }
        (ChargesAndTerms, GeneratePdf) => (ChargesAndTerms, vec![WizardAction::RenderDocuments]),
        (step, event) => {
            return Err(WizardTransitionError::InvalidTransition { step, event });
        }
    };

    Ok(StepOutcome { from: current, to, event, actions })
}

#[cfg(test)]
mod tests {
    use crate::wizard::session::{WizardSession, WizardState};
    use crate::wizard::states::{
        FreightMode, RoutingCategory, WizardAction, WizardEvent, WizardStep,
    };

    use super::WizardTransitionError;

    #[test]
    fn mode_selection_requires_both_selections() {
        let mut session = WizardSession::new();
        let error = session.apply(WizardEvent::Next).expect_err("guard must hold");
        assert_eq!(
            error,
            WizardTransitionError::MissingSelections {
                missing: vec!["freight mode".to_string(), "routing category".to_string()],
            }
        );
        assert_eq!(session.step(), WizardStep::ModeSelection);
    }

    #[test]
    fn category_alone_is_not_enough() {
        let mut session = WizardSession::new();
        session.state.category = Some(RoutingCategory::Direct);

        let error = session.apply(WizardEvent::Next).expect_err("guard must hold");
        assert!(matches!(
            error,
            WizardTransitionError::MissingSelections { ref missing } if missing == &["freight mode".to_string()]
        ));
    }

    #[test]
    fn route_step_forward_is_permissive() {
        let mut session = WizardSession::new();
        session.select(FreightMode::SeaExportLcl, RoutingCategory::Direct);

        session.apply(WizardEvent::Next).expect("mode -> route");
        // Measurements untouched; the forward transition must still pass.
        session.apply(WizardEvent::Next).expect("route -> charges");
        assert_eq!(session.step(), WizardStep::ChargesAndTerms);
    }

    #[test]
    fn back_walks_the_steps_linearly() {
        let mut session = WizardSession::new();
        session.select(FreightMode::AirExport, RoutingCategory::Direct);
        session.apply(WizardEvent::Next).expect("forward");
        session.apply(WizardEvent::Next).expect("forward");

        session.apply(WizardEvent::Back).expect("charges -> route");
        assert_eq!(session.step(), WizardStep::RouteAndDetails);
        session.apply(WizardEvent::Back).expect("route -> mode");
        assert_eq!(session.step(), WizardStep::ModeSelection);
    }

    #[test]
    fn save_and_generate_are_terminal_step_actions() {
        let mut session = WizardSession::new();
        session.select(FreightMode::AirImport, RoutingCategory::Transit);
        session.apply(WizardEvent::Next).expect("forward");
        session.apply(WizardEvent::Next).expect("forward");

        let saved = session.apply(WizardEvent::Save).expect("save");
        assert_eq!(saved.actions, vec![WizardAction::PersistDraft, WizardAction::CloseWizard]);

        let rendered = session.apply(WizardEvent::GeneratePdf).expect("generate");
        assert_eq!(rendered.actions, vec![WizardAction::RenderDocuments]);
    }

    #[test]
    fn save_is_rejected_before_the_terminal_step() {
        let mut session = WizardSession::new();
        session.select(FreightMode::AirImport, RoutingCategory::Direct);
        session.apply(WizardEvent::Next).expect("forward");

        let error = session.apply(WizardEvent::Save).expect_err("save too early");
        assert!(matches!(error, WizardTransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn edit_sessions_skip_mode_selection() {
        let mut state = WizardState::default();
        state.mode = Some(FreightMode::SeaImportFcl);
        state.category = Some(RoutingCategory::Direct);

        let session = WizardSession::edit(state);
        assert_eq!(session.step(), WizardStep::RouteAndDetails);
    }
}
