use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Directory holding the Poppler binaries. `None` resolves them from `PATH`.
    pub poppler_path: Option<PathBuf>,
    pub raster_dpi: u32,
    pub jpeg_quality: u8,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_BASE_URL.to_string()),
            poppler_path: std::env::var("POPPLER_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            raster_dpi: std::env::var("RASTER_DPI")
                .unwrap_or_else(|_| "150".to_string())
                .parse::<u32>()
                .context("RASTER_DPI must be a positive integer")?,
            jpeg_quality: parse_jpeg_quality(
                &std::env::var("JPEG_QUALITY").unwrap_or_else(|_| "85".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-key".to_string(),
            gemini_model: crate::llm_client::DEFAULT_MODEL.to_string(),
            gemini_base_url: crate::llm_client::DEFAULT_BASE_URL.to_string(),
            poppler_path: None,
            raster_dpi: 150,
            jpeg_quality: 85,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_jpeg_quality(raw: &str) -> Result<u8> {
    let quality = raw
        .trim()
        .parse::<u8>()
        .context("JPEG_QUALITY must be an integer between 1 and 100")?;
    anyhow::ensure!(
        (1..=100).contains(&quality),
        "JPEG_QUALITY must be between 1 and 100, got {quality}"
    );
    Ok(quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_quality_accepts_range() {
        assert_eq!(parse_jpeg_quality("85").unwrap(), 85);
        assert_eq!(parse_jpeg_quality(" 100 ").unwrap(), 100);
        assert_eq!(parse_jpeg_quality("1").unwrap(), 1);
    }

    #[test]
    fn test_jpeg_quality_rejects_out_of_range() {
        assert!(parse_jpeg_quality("0").is_err());
        assert!(parse_jpeg_quality("101").is_err());
        assert!(parse_jpeg_quality("high").is_err());
    }
}
