//! Contract service
//!
//! Runs the generation pipeline: build the prompt, make one call to the
//! generation service, wrap the text. Export is a separate, on-demand step
//! over text the caller already holds; nothing is kept between requests.

use std::path::PathBuf;
use std::sync::Arc;

use crate::models::{ContractRequest, ExportArtifact, ExportFormat, GeneratedContract};
use crate::services::export::{self, ExportError, ExportWriter};
use crate::services::generation::{ServiceError, TextGenerator};
use crate::services::prompt::build_prompt;

pub struct ContractService {
    generator: Arc<dyn TextGenerator>,
    exporter: ExportWriter,
}

impl ContractService {
    pub fn new(generator: Arc<dyn TextGenerator>, exporter: ExportWriter) -> Self {
        Self { generator, exporter }
    }

    /// Generate a contract for one form submission.
    ///
    /// Exactly one generation call is made. A failure is returned as is; no
    /// partial contract is ever produced.
    pub async fn generate(&self, request: ContractRequest) -> Result<GeneratedContract, ServiceError> {
        let prompt = build_prompt(&request);
        tracing::info!(
            api_name = %request.api_name,
            model = %self.generator.model(),
            "Generating API contract"
        );

        match self.generator.generate(&prompt).await {
            Ok(content) => {
                tracing::info!("Contract generated ({} chars)", content.len());
                Ok(GeneratedContract::new(content))
            }
            Err(e) => {
                tracing::warn!("Contract generation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Render text in the given format and write it to the export directory.
    pub async fn export(
        &self,
        content: &str,
        format: ExportFormat,
    ) -> Result<(ExportArtifact, PathBuf), ExportError> {
        let filename = self.exporter.filename_for(format);
        let artifact = export::render(content, format, &filename)?;
        let path = self.exporter.write(&artifact).await?;
        Ok((artifact, path))
    }
}
