use thiserror::Error;

#[derive(Error, Debug)]
pub enum Label4UpError {
    #[error("Failed to read input document: {0}")]
    InvalidDocument(String),

    #[error("Failed to render page: {0}")]
    RenderFailed(String),

    #[error("Failed to export label image: {0}")]
    ImageExport(String),

    #[error("Failed to write output document: {0}")]
    OutputWrite(String),

    #[error("PDF rasterizer unavailable: {0}")]
    RasterizerUnavailable(String),
}
