use serde::{Deserialize, Serialize};

/// The three wizard steps, strictly linear in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    ModeSelection,
    RouteAndDetails,
    ChargesAndTerms,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    Next,
    Back,
    Save,
    GeneratePdf,
}

/// Side effects the caller performs after a successful transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    PersistDraft,
    RenderDocuments,
    CloseWizard,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub from: WizardStep,
    pub to: WizardStep,
    pub event: WizardEvent,
    pub actions: Vec<WizardAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreightMode {
    AirImport,
    AirExport,
    SeaImportFcl,
    SeaExportFcl,
    SeaImportLcl,
    SeaExportLcl,
}

impl FreightMode {
    /// Service-type label shown in the quote meta block.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AirImport => "Air Import",
            Self::AirExport => "Air Export",
            Self::SeaImportFcl => "Sea Import FCL",
            Self::SeaExportFcl => "Sea Export FCL",
            Self::SeaImportLcl => "Sea Import LCL",
            Self::SeaExportLcl => "Sea Export LCL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingCategory {
    Direct,
    Transit,
    Multimodal,
}
