pub mod engine;
pub mod session;
pub mod states;

pub use engine::WizardTransitionError;
pub use session::{WizardSession, WizardState};
pub use states::{
    FreightMode, RoutingCategory, StepOutcome, WizardAction, WizardEvent, WizardStep,
};
