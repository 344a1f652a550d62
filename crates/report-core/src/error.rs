use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to encode page content: {0}")]
    EncodeError(String),

    #[error("Failed to render PDF: {0}")]
    RenderError(String),
}
