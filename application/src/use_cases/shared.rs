//! Helpers shared by the content generators.

use crate::ports::progress::GenerationProgress;
use crate::use_cases::generate_text::{GenerationError, GenerationOrchestrator};
use serde::de::DeserializeOwned;
use studybuddy_domain::{DomainError, GenerationRequest, parse_structured};
use thiserror::Error;

/// Why a generator fell back to its offline content
#[derive(Error, Debug)]
pub(crate) enum ContentError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Ask for JSON, then normalize and parse the answer into `T`.
pub(crate) async fn generate_structured<T: DeserializeOwned>(
    orchestrator: &GenerationOrchestrator,
    prompt: String,
    progress: &dyn GenerationProgress,
) -> Result<T, ContentError> {
    let generated = orchestrator
        .generate_with_progress(&GenerationRequest::structured(prompt), progress)
        .await?;
    Ok(parse_structured(&generated.text)?)
}
