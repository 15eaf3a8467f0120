//! Output sheet composition.
//!
//! `SheetComposer` accumulates label images into a new PDF, four to an A4
//! sheet. The algorithm:
//! 1. Allocate the pages-root id up front so pages can reference it
//! 2. Every 4th label, flush the open sheet and start a new page
//! 3. Embed each raster as a FlateDecode DeviceRGB image XObject
//! 4. Draw it with a `cm`/`Do` pair, fitted and centered in its slot
//! 5. On finish, write the page tree and catalog, compress, serialize

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::Label4UpError;
use crate::layout::{self, A4_HEIGHT_PT, A4_WIDTH_PT, LABELS_PER_SHEET};

/// Builds the 4-up output document; owns the run-wide label counter.
pub struct SheetComposer {
    doc: Document,
    pages_root: ObjectId,
    page_refs: Vec<ObjectId>,
    open_sheet: Option<OpenSheet>,
    labels_placed: u32,
}

/// A sheet that is still collecting labels.
#[derive(Default)]
struct OpenSheet {
    xobjects: Dictionary,
    operations: Vec<Operation>,
}

impl SheetComposer {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_root = doc.new_object_id();
        Self {
            doc,
            pages_root,
            page_refs: Vec::new(),
            open_sheet: None,
            labels_placed: 0,
        }
    }

    /// Labels placed so far, across all sheets.
    pub fn labels_placed(&self) -> u32 {
        self.labels_placed
    }

    /// Sheets opened so far, including the one still being filled.
    pub fn sheet_count(&self) -> u32 {
        self.labels_placed.div_ceil(LABELS_PER_SHEET)
    }

    /// Place the next label.
    ///
    /// Slot index is `labels_placed % 4`; slot 0 opens a fresh A4 sheet.
    /// The image is uniformly scaled to its cell and centered.
    pub fn place(&mut self, label: &RgbaImage) -> Result<(), Label4UpError> {
        let slot = self.labels_placed % LABELS_PER_SHEET;
        if slot == 0 {
            self.flush_open_sheet()?;
        }

        let (width, height) = label.dimensions();
        let image_id = embed_raster(&mut self.doc, label)?;
        let name = format!("Im{}", self.labels_placed);

        let cell = layout::slot_rect(slot);
        let fit = layout::fit_rect(width as f32, height as f32, cell.width, cell.height);

        let sheet = self.open_sheet.get_or_insert_with(OpenSheet::default);
        sheet
            .xobjects
            .set(name.as_bytes(), Object::Reference(image_id));
        sheet.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(fit.width),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(fit.height),
                    Object::Real(cell.x + fit.offset_x),
                    Object::Real(cell.y + fit.offset_y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ]);

        self.labels_placed += 1;
        Ok(())
    }

    /// Serialize the document, closing any half-filled sheet first.
    ///
    /// With no labels placed this still yields a valid PDF with an empty
    /// page tree.
    pub fn finish(mut self) -> Result<Vec<u8>, Label4UpError> {
        self.flush_open_sheet()?;

        let kids: Vec<Object> = self
            .page_refs
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let count = kids.len() as i64;
        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_root, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_root)),
        ]));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| Label4UpError::OutputWrite(e.to_string()))?;
        Ok(buffer)
    }

    /// Turn the open sheet, if any, into a finished A4 page.
    fn flush_open_sheet(&mut self) -> Result<(), Label4UpError> {
        let Some(sheet) = self.open_sheet.take() else {
            return Ok(());
        };

        let content = Content {
            operations: sheet.operations,
        };
        let data = content
            .encode()
            .map_err(|e| Label4UpError::OutputWrite(e.to_string()))?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), data));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(sheet.xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(self.pages_root));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(A4_WIDTH_PT),
                Object::Real(A4_HEIGHT_PT),
            ]),
        );
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(page);
        self.page_refs.push(page_id);
        Ok(())
    }
}

impl Default for SheetComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Embed an RGBA raster as a DeviceRGB image XObject.
///
/// Rasters arrive composited on an opaque white background, so the alpha
/// channel is dropped and the RGB samples are zlib-compressed into a
/// FlateDecode stream. The stream is marked incompressible so the final
/// `compress()` pass leaves it alone.
fn embed_raster(doc: &mut Document, label: &RgbaImage) -> Result<ObjectId, Label4UpError> {
    let (width, height) = label.dimensions();
    if width == 0 || height == 0 {
        return Err(Label4UpError::ImageExport(
            "label raster has no pixels".into(),
        ));
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for px in label.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&rgb)
        .map_err(|e| Label4UpError::ImageExport(e.to_string()))?;
    let data = encoder
        .finish()
        .map_err(|e| Label4UpError::ImageExport(e.to_string()))?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));

    let mut stream = Stream::new(dict, data);
    stream.allows_compression = false;
    Ok(doc.add_object(stream))
}
