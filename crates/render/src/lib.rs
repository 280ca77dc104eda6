//! Rendering of `QuotationDocument` snapshots.
//!
//! Two independent implementations of one contract: the template
//! renderer reproduces the on-screen layout pixel-for-pixel via an
//! HTML template and wkhtmltopdf, and the vector renderer draws the
//! same document directly with PDF primitives. They are deliberately
//! not unified; their layout arithmetic genuinely differs, and callers
//! pick fidelity-to-screen versus file size and crispness.

pub mod export;
pub mod template;
pub mod vector;

use async_trait::async_trait;
use thiserror::Error;

use freightdesk_core::format::sanitize_file_stem;
use freightdesk_core::QuotationDocument;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("wkhtmltopdf not found; install it or set export.wkhtmltopdf_path")]
    ConverterNotFound,
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A renderer turns one document into one complete PDF byte stream.
/// No partial output: implementations either return a whole file or an
/// error, leaving nothing behind.
#[async_trait]
pub trait QuotationRenderer: Send + Sync {
    async fn render(&self, document: &QuotationDocument) -> Result<Vec<u8>, RenderError>;

    /// Download filename for the rendered document: sanitized quote
    /// number plus `.pdf`.
    fn file_name(&self, document: &QuotationDocument) -> String {
        format!("{}.pdf", sanitize_file_stem(&document.meta.quote_number))
    }
}

pub use export::{export_all_options, export_document};
pub use template::TemplateRenderer;
pub use vector::VectorRenderer;
