//! Document export
//!
//! Renders generated contract text into downloadable documents:
//! - PDF: paginated, fixed-width layout. Lossy: anything outside Basic Latin
//!   becomes `?`.
//! - DOCX: one paragraph per line. Lossless.
//!
//! Both formats treat the input as plain lines; markdown is not interpreted.

pub mod docx;
pub mod pdf;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ExportConfig;
use crate::models::{ExportArtifact, ExportFormat};

pub use docx::render_docx;
pub use pdf::{layout_pdf, render_pdf, PageLayout};

/// Base name of every exported file
pub const EXPORT_BASENAME: &str = "api_contract";

/// Export failures
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output location missing or not writable
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// PDF backend failure
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Text cannot be represented in the target format
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// DOCX package could not be assembled
    #[error("Archive error: {0}")]
    Archive(String),
}

/// Split text into lines on `\n`, dropping one trailing `\r` per line.
///
/// N line breaks always give N+1 lines, so an empty string is one empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Render text into an artifact of the requested format
pub fn render(text: &str, format: ExportFormat, filename: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Pdf => render_pdf(text, filename)?,
        ExportFormat::Docx => render_docx(text)?,
    };

    Ok(ExportArtifact {
        bytes,
        filename: filename.to_string(),
        format,
    })
}

/// Writes artifacts into the export directory
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
    unique_filenames: bool,
}

impl ExportWriter {
    pub fn new(dir: impl Into<PathBuf>, unique_filenames: bool) -> Self {
        Self {
            dir: dir.into(),
            unique_filenames,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.dir.clone(), config.unique_filenames)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filename for a new export: `api_contract.<ext>`, or
    /// `api_contract-<uuid>.<ext>` when unique filenames are enabled.
    pub fn filename_for(&self, format: ExportFormat) -> String {
        if self.unique_filenames {
            format!("{}-{}.{}", EXPORT_BASENAME, uuid::Uuid::new_v4(), format.extension())
        } else {
            format!("{}.{}", EXPORT_BASENAME, format.extension())
        }
    }

    /// Write an artifact and return its path.
    ///
    /// The directory is never created here; a missing directory is an error.
    pub async fn write(&self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes)
            .await
            .map_err(|e| ExportError::Io {
                path: path.display().to_string(),
                source: e,
            })?;

        tracing::info!("Exported {} ({} bytes) to {}", artifact.format, artifact.bytes.len(), path.display());
        Ok(path)
    }
}
