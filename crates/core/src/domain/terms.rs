//! Terms-and-conditions entries and their edit-session lifecycle.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub id: u32,
    pub text: String,
    pub selected: bool,
    /// UI-only edit flag, never part of the stored or exported form.
    #[serde(skip)]
    pub editing: bool,
}

/// Default seed set offered for every new quotation.
const SEED_TERMS: &[&str] = &[
    "Rates are valid only for the validity period stated above.",
    "Rates are subject to change without prior notice due to carrier GRI/surcharge revisions.",
    "Duties, taxes, and customs inspection charges at destination are for the account of the consignee.",
    "Transit times are estimates provided by carriers and are not guaranteed.",
    "All business is undertaken subject to our standard trading conditions.",
];

/// Owns the term entries for one wizard session. Only `selected`
/// entries flow into the exported document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSheet {
    entries: Vec<TermEntry>,
}

impl Default for TermSheet {
    fn default() -> Self {
        let entries = SEED_TERMS
            .iter()
            .enumerate()
            .map(|(index, text)| TermEntry {
                id: index as u32 + 1,
                text: (*text).to_string(),
                selected: true,
                editing: false,
            })
            .collect();
        Self { entries }
    }
}

impl TermSheet {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn from_entries(entries: Vec<TermEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    /// Appends a new selected entry; ids stay stable for the session,
    /// so the next id is `max + 1`, never a reused slot.
    pub fn add(&mut self, text: impl Into<String>) -> u32 {
        let id = self.entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1;
        self.entries.push(TermEntry { id, text: text.into(), selected: true, editing: false });
        id
    }

    pub fn remove(&mut self, id: u32) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn toggle(&mut self, id: u32) {
        if let Some(entry) = self.entry_mut(id) {
            entry.selected = !entry.selected;
        }
    }

    pub fn start_edit(&mut self, id: u32) {
        if let Some(entry) = self.entry_mut(id) {
            entry.editing = true;
        }
    }

    pub fn apply_edit(&mut self, id: u32, text: impl Into<String>) {
        if let Some(entry) = self.entry_mut(id) {
            entry.text = text.into();
            entry.editing = false;
        }
    }

    /// Selected texts in entry order; this is exactly what
    /// `QuotationDocument::terms_and_conditions` receives.
    pub fn selected_texts(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.selected)
            .map(|entry| entry.text.clone())
            .collect()
    }

    fn entry_mut(&mut self, id: u32) -> Option<&mut TermEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}
