use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong during a mail merge run.
#[derive(Debug, Error)]
pub enum BlastError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {var}: `{value}`")]
    InvalidEnv { var: &'static str, value: String },

    #[error("template `{name}` not found: {}", .path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no email address column in CSV header (use --email-column)")]
    NoEmailColumn,

    #[error("invalid email address `{0}`")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(String),
}
