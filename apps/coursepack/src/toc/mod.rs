// Table-of-contents extraction from a PDF's bookmark outline.
// The extractor in `outline` is pure; `pdf` is the lopdf collaborator that feeds it.

pub mod outline;
pub mod pdf;

use std::path::Path;

use tracing::info;

pub use outline::{parse_outline, TocNode};

use crate::errors::AppError;
use crate::toc::pdf::{read_outline, PdfPageResolver};

/// File the TOC is written to, relative to the working directory.
pub const TOC_OUTPUT_FILE: &str = "toc.json";

/// Loads a PDF and extracts its outline as a TOC tree.
pub fn extract_toc(pdf_path: &Path) -> Result<Vec<TocNode>, AppError> {
    let doc = lopdf::Document::load(pdf_path)?;
    toc_from_document(&doc)
}

pub fn toc_from_document(doc: &lopdf::Document) -> Result<Vec<TocNode>, AppError> {
    let outline = read_outline(doc);
    let resolver = PdfPageResolver::new(doc);
    Ok(parse_outline(&outline, &resolver)?)
}

/// Writes the TOC as 2-space indented JSON, replacing any existing file.
pub fn write_toc(path: &Path, toc: &[TocNode]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(toc)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// `coursepack toc <PDF_PATH>`
pub fn run(pdf_path: &Path) -> Result<(), AppError> {
    let toc = extract_toc(pdf_path)?;
    write_toc(Path::new(TOC_OUTPUT_FILE), &toc)?;
    info!(
        "Extracted {} top-level entries from {} into {}",
        toc.len(),
        pdf_path.display(),
        TOC_OUTPUT_FILE
    );
    Ok(())
}
