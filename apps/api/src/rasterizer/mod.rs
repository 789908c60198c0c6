//! Document rasterization — turns an uploaded resume PDF into page images.
//!
//! Only the first page is ever rendered. Callers receive a `Vec<PageImage>`
//! so the adapter keeps the shape of a general page sequence, but it always
//! holds exactly one element on success.
//!
//! `AppState` holds an `Arc<dyn Rasterizer>` so tests can swap in a mock.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub mod poppler;

pub use poppler::PopplerRasterizer;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// A rasterized page, already base64-encoded for transport to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded) of the encoded image bytes.
    pub data: String,
}

impl PageImage {
    pub fn jpeg(bytes: &[u8]) -> Self {
        Self {
            mime_type: JPEG_MIME_TYPE.to_string(),
            data: STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Error)]
pub enum RasterizationError {
    #[error("uploaded file is not a PDF document")]
    NotPdf,

    #[error("rasterizer '{tool}' could not be started: {source}")]
    ToolMissing {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    #[error("page image encoding failed: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("I/O error during rasterization: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts a PDF byte buffer into page images.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, document: &[u8]) -> Result<Vec<PageImage>, RasterizationError>;
}

/// PDF files must carry the `%PDF-` marker within the first 1024 bytes.
pub fn looks_like_pdf(document: &[u8]) -> bool {
    let head = &document[..document.len().min(1024)];
    head.windows(5).any(|w| w == b"%PDF-")
}
