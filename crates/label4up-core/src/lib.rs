//! Label 4-up conversion pipeline
//!
//! This crate turns multi-page scanned-label PDFs (one shipping label per
//! page, label in the upper region of an oversized page) into a print-ready
//! PDF with four labels per A4 sheet in a 2x2 grid.
//!
//! The pipeline per page: rasterize via [`rasterize::Rasterizer`], find and
//! crop the label against its near-white background ([`detect`]), optionally
//! rotate it to a requested orientation ([`orient`]), then scale and center
//! it into the next free slot of the output document ([`compose`]).
//!
//! The main entry point is [`convert_labels_to_4up`]; production callers
//! pair it with [`PdfiumRasterizer`].

pub mod compose;
pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod options;
pub mod orient;
pub mod rasterize;

pub use compose::SheetComposer;
pub use convert::convert_labels_to_4up;
pub use detect::{content_bounds, crop_label, Region};
pub use error::Label4UpError;
pub use options::{ConvertOptions, DetectSettings, OrientationMode, Progress};
pub use orient::normalize_orientation;
pub use rasterize::{PdfiumRasterizer, RasterDocument, Rasterizer};
