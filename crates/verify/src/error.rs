//! Error types for the verification runner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Front-end at {url} not reachable after {attempts} attempts")]
    FrontendUnreachable { url: String, attempts: usize },

    #[error("Unknown flow: {0}")]
    UnknownFlow(String),

    #[error("Screenshot not found: {0}")]
    ScreenshotMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type VerifyResult<T> = Result<T, VerifyError>;
