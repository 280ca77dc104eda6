//! File export for rendered quotations.
//!
//! Rendering is strictly sequential: one document is rendered and
//! written before the next starts, so a failure partway through leaves
//! only the files that already completed.

use std::path::{Path, PathBuf};

use tracing::info;

use freightdesk_core::format::sanitize_file_stem;
use freightdesk_core::{build_all_option_documents, CompanyInfo, QuotationDocument, WizardState};

use crate::{QuotationRenderer, RenderError};

/// Renders one document and writes it under `output_dir`, creating the
/// directory if needed. Returns the written path.
pub async fn export_document(
    renderer: &dyn QuotationRenderer,
    document: &QuotationDocument,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let bytes = renderer.render(document).await?;
    let path = output_dir.join(renderer.file_name(document));
    tokio::fs::create_dir_all(output_dir).await?;
    tokio::fs::write(&path, bytes).await?;
    info!(path = %path.display(), "quotation exported");
    Ok(path)
}

/// Exports every route option as its own PDF.
///
/// A single-option quotation keeps the plain `<quote>.pdf` name; with
/// several options each file gets an `-OPT<n>` suffix (1-based) so the
/// set sorts together in a directory listing.
pub async fn export_all_options(
    renderer: &dyn QuotationRenderer,
    state: &WizardState,
    company: &CompanyInfo,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let documents = build_all_option_documents(state, company);
    tokio::fs::create_dir_all(output_dir).await?;

    let mut paths = Vec::with_capacity(documents.len());
    for (index, document) in documents.iter().enumerate() {
        let file_name = if documents.len() == 1 {
            renderer.file_name(document)
        } else {
            format!(
                "{}-OPT{}.pdf",
                sanitize_file_stem(&document.meta.quote_number),
                index + 1
            )
        };
        let bytes = renderer.render(document).await?;
        let path = output_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), option = index + 1, "quotation option exported");
        paths.push(path);
    }
    Ok(paths)
}
