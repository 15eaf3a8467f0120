//! Page rasterization boundary.
//!
//! The pipeline consumes rasterization through a small trait pair so the
//! rendering engine stays swappable (and so tests can drive the pipeline
//! with synthetic rasters). The production implementation binds pdfium and
//! renders pages at `scale x nativeSize` onto an opaque white background.

use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::error::Label4UpError;

/// Opens raw PDF bytes into a rasterizable document handle.
pub trait Rasterizer {
    type Document<'a>: RasterDocument
    where
        Self: 'a;

    /// Open one input document. Rejecting malformed bytes is fatal to the
    /// run; the error carries the underlying cause.
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Self::Document<'a>, Label4UpError>;
}

/// One open source document.
///
/// Any native resources are released when the value drops, which is what
/// guarantees cleanup on every exit path of a conversion run.
pub trait RasterDocument {
    fn page_count(&self) -> usize;

    /// Render one page (0-based) into an RGBA raster at `scale` times the
    /// page's native point dimensions, white beneath the content.
    fn render_page(&mut self, index: usize, scale: f32) -> Result<RgbaImage, Label4UpError>;
}

/// Rasterizer backed by the pdfium library.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind pdfium, preferring a library next to the executable and falling
    /// back to the system-wide installation.
    pub fn new() -> Result<Self, Label4UpError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Label4UpError::RasterizerUnavailable(e.to_string()))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Page count of a document without keeping it open; handy for
    /// pre-flight display in a host UI.
    pub fn page_count(&self, bytes: &[u8]) -> Result<u32, Label4UpError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| Label4UpError::InvalidDocument(e.to_string()))?;
        Ok(u32::from(document.pages().len()))
    }
}

pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl std::fmt::Debug for PdfiumDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfiumDocument")
            .field("page_count", &self.document.pages().len())
            .finish()
    }
}

impl Rasterizer for PdfiumRasterizer {
    type Document<'a>
        = PdfiumDocument<'a>
    where
        Self: 'a;

    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<PdfiumDocument<'a>, Label4UpError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| Label4UpError::InvalidDocument(e.to_string()))?;
        Ok(PdfiumDocument { document })
    }
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        usize::from(self.document.pages().len())
    }

    fn render_page(&mut self, index: usize, scale: f32) -> Result<RgbaImage, Label4UpError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| Label4UpError::RenderFailed(format!("page {}: {}", index + 1, e)))?;

        let pixel_width = (page.width().value * scale).ceil() as i32;
        let pixel_height = (page.height().value * scale).ceil() as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(pixel_width)
                    .set_target_height(pixel_height),
            )
            .map_err(|e| Label4UpError::RenderFailed(format!("page {}: {}", index + 1, e)))?;

        Ok(bitmap.as_image().to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Document, Object, Stream};

    /// Minimal one-page PDF for smoke-testing the pdfium binding.
    fn blank_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let content_id = doc.add_object(Stream::new(Dictionary::new(), Vec::new()));
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        let page_id = doc.add_object(page);

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(1)),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn pdfium_renders_a_blank_page_when_available() {
        // Skip if pdfium is not installed on this machine
        let rasterizer = match PdfiumRasterizer::new() {
            Ok(rasterizer) => rasterizer,
            Err(e) => {
                eprintln!("Skipping test - pdfium not available: {e}");
                return;
            }
        };

        let bytes = blank_pdf();
        assert_eq!(rasterizer.page_count(&bytes).unwrap(), 1);

        let mut document = rasterizer.open(&bytes).unwrap();
        assert_eq!(document.page_count(), 1);

        let raster = document.render_page(0, 2.0).unwrap();
        assert_eq!(raster.dimensions(), (1224, 1584));
        // Blank page renders to opaque white
        assert_eq!(raster.get_pixel(600, 700).0, [255, 255, 255, 255]);
    }

    #[test]
    fn garbage_bytes_are_rejected_when_available() {
        let rasterizer = match PdfiumRasterizer::new() {
            Ok(rasterizer) => rasterizer,
            Err(e) => {
                eprintln!("Skipping test - pdfium not available: {e}");
                return;
            }
        };

        let err = rasterizer.open(b"not a pdf").unwrap_err();
        assert!(matches!(err, Label4UpError::InvalidDocument(_)));
    }
}
