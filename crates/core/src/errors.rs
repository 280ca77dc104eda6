use thiserror::Error;

use crate::wizard::engine::WizardTransitionError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    WizardTransition(#[from] WizardTransitionError),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
