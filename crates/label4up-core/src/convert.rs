//! Conversion pipeline orchestrator.
//!
//! Drives render -> crop -> normalize -> place for every page of every
//! input, in order, and serializes the 4-up output document. Progress is
//! reported synchronously before each page and once more before the final
//! serialization.

use tracing::{debug, error, info};

use crate::compose::SheetComposer;
use crate::detect::crop_label;
use crate::error::Label4UpError;
use crate::options::{ConvertOptions, Progress};
use crate::orient::normalize_orientation;
use crate::rasterize::{RasterDocument, Rasterizer};

/// Convert label documents into a single 4-up A4 PDF.
///
/// All inputs are opened up front so the progress total spans every page of
/// every document. A fatal error aborts the whole run: partially built
/// output is discarded and every open document handle is dropped before the
/// error reaches the caller. Zero inputs (or inputs with zero pages) are
/// not an error; the result is a PDF with no pages.
pub fn convert_labels_to_4up<R, F>(
    rasterizer: &R,
    inputs: &[Vec<u8>],
    options: &ConvertOptions,
    mut on_progress: F,
) -> Result<Vec<u8>, Label4UpError>
where
    R: Rasterizer,
    F: FnMut(Progress),
{
    let mut documents = Vec::with_capacity(inputs.len());
    for (index, bytes) in inputs.iter().enumerate() {
        let document = rasterizer.open(bytes).map_err(|e| {
            error!(input = index + 1, "failed to open input document: {e}");
            e
        })?;
        documents.push(document);
    }

    let total_pages: u32 = documents.iter().map(|d| d.page_count() as u32).sum();
    info!(
        inputs = inputs.len(),
        total_pages, "starting label conversion"
    );

    let mut composer = SheetComposer::new();
    let mut processed: u32 = 0;
    let document_count = documents.len();

    for (doc_index, document) in documents.iter_mut().enumerate() {
        let page_count = document.page_count();
        for page_index in 0..page_count {
            on_progress(Progress {
                current: processed + 1,
                total: total_pages,
                message: format!(
                    "Processing: file {}/{}, page {}/{}",
                    doc_index + 1,
                    document_count,
                    page_index + 1,
                    page_count
                ),
            });

            let raster = document.render_page(page_index, options.render_scale)?;
            let label = crop_label(&raster, &options.detect);
            let label = normalize_orientation(label, options.mode);
            debug!(
                page = processed + 1,
                width = label.width(),
                height = label.height(),
                "placing label"
            );
            composer.place(&label)?;
            processed += 1;
        }
    }

    on_progress(Progress {
        current: total_pages,
        total: total_pages,
        message: "Generating output PDF...".to_string(),
    });

    let sheets = composer.sheet_count();
    let bytes = composer.finish()?;
    info!(
        labels = processed,
        sheets,
        output_bytes = bytes.len(),
        "label conversion finished"
    );
    Ok(bytes)
}
