//! Poppler-backed rasterizer. Shells out to `pdftoppm` for page 1 only,
//! then re-encodes the PNG it produces as JPEG.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::rasterizer::{looks_like_pdf, PageImage, RasterizationError, Rasterizer};

#[cfg(windows)]
const PDFTOPPM: &str = "pdftoppm.exe";
#[cfg(not(windows))]
const PDFTOPPM: &str = "pdftoppm";

pub struct PopplerRasterizer {
    poppler_path: Option<PathBuf>,
    dpi: u32,
    jpeg_quality: u8,
}

impl PopplerRasterizer {
    pub fn new(poppler_path: Option<PathBuf>, dpi: u32, jpeg_quality: u8) -> Self {
        Self {
            poppler_path,
            dpi,
            jpeg_quality,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.poppler_path.clone(),
            config.raster_dpi,
            config.jpeg_quality,
        )
    }

    /// Full path of `pdftoppm`, or the bare name when it should come from `PATH`.
    pub fn binary(&self) -> PathBuf {
        match &self.poppler_path {
            Some(dir) => dir.join(PDFTOPPM),
            None => PathBuf::from(PDFTOPPM),
        }
    }

    /// Renders page 1 of `document` to PNG bytes.
    async fn render_first_page(&self, document: &[u8]) -> Result<Vec<u8>, RasterizationError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.pdf");
        tokio::fs::write(&input, document).await?;

        let output_root = workdir.path().join("page");
        let binary = self.binary();
        debug!("Running {} at {} dpi", binary.display(), self.dpi);

        let output = Command::new(&binary)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .args(["-f", "1", "-l", "1", "-singlefile"])
            .arg(&input)
            .arg(&output_root)
            .output()
            .await
            .map_err(|e| spawn_error(&binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("pdftoppm failed ({}): {}", output.status, stderr.trim());
            return Err(RasterizationError::Conversion(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // -singlefile writes exactly `<root>.png`
        tokio::fs::read(output_root.with_extension("png"))
            .await
            .map_err(|e| {
                RasterizationError::Conversion(format!("rasterizer produced no page image: {e}"))
            })
    }
}

#[async_trait]
impl Rasterizer for PopplerRasterizer {
    async fn rasterize(&self, document: &[u8]) -> Result<Vec<PageImage>, RasterizationError> {
        if !looks_like_pdf(document) {
            return Err(RasterizationError::NotPdf);
        }

        let png = self.render_first_page(document).await?;
        let quality = self.jpeg_quality;
        let page = tokio::task::spawn_blocking(move || encode_page(&png, quality))
            .await
            .map_err(|e| {
                RasterizationError::Conversion(format!("page encoding task failed: {e}"))
            })??;
        info!(
            "Rasterized first page: {} bytes PDF -> {} base64 chars",
            document.len(),
            page.data.len()
        );

        Ok(vec![page])
    }
}

fn spawn_error(binary: &Path, e: std::io::Error) -> RasterizationError {
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => RasterizationError::ToolMissing {
            tool: binary.display().to_string(),
            source: e,
        },
        _ => RasterizationError::Io(e),
    }
}

/// Decodes a rendered page and re-encodes it as a JPEG `PageImage`.
pub fn encode_page(rendered: &[u8], quality: u8) -> Result<PageImage, RasterizationError> {
    let page = image::load_from_memory(rendered)?;

    let mut jpeg = Vec::new();
    // JPEG has no alpha channel
    page.to_rgb8()
        .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))?;

    Ok(PageImage::jpeg(&jpeg))
}
