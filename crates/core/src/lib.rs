pub mod aggregate;
pub mod blob;
pub mod builder;
pub mod config;
pub mod domain;
pub mod errors;
pub mod format;
pub mod normalize;
pub mod wizard;

pub use aggregate::{add_charges_to_document, ChargeBreakdown};
pub use blob::{load_wizard_state, store_wizard_state, StoredQuotation};
pub use builder::{build_all_option_documents, build_document};
pub use domain::charges::{ChargeKind, ChargeLine, ChargeSection};
pub use domain::document::{
    CompanyInfo, CurrencyGroup, CustomerInfo, FreightChargeRow, OtherChargeItem, OtherCharges,
    QuotationDocument, QuoteMeta, ShipmentDetails,
};
pub use domain::route::{DirectRoute, RouteOption, RoutePlan, RouteSegment, TransitRoute};
pub use domain::terms::{TermEntry, TermSheet};
pub use errors::DomainError;
pub use normalize::resolve_shipment_fields;
pub use wizard::{
    FreightMode, RoutingCategory, StepOutcome, WizardAction, WizardEvent, WizardSession,
    WizardState, WizardStep, WizardTransitionError,
};
