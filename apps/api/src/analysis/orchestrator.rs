//! Request orchestration: validate, build the prompt, complete, parse.

use std::sync::Arc;

use tracing::info;

use crate::analysis::parser::ResponseParser;
use crate::analysis::prompts::build_prompt;
use crate::analysis::{AnalysisOutcome, AnalysisRequest, AnalyzePayload};
use crate::errors::AppError;
use crate::llm_client::CompletionService;

pub const NOT_CONFIGURED_MESSAGE: &str = "API key not configured";

/// Stateless entry point for analysis requests. Cheap to clone; safe to share
/// across concurrent requests.
///
/// `completion` is `None` when no completion credential was configured at
/// startup. Every analysis is then refused before the request is inspected.
#[derive(Clone)]
pub struct Analyzer {
    completion: Option<Arc<dyn CompletionService>>,
    parser: Arc<ResponseParser>,
}

impl Analyzer {
    pub fn new(completion: Option<Arc<dyn CompletionService>>) -> Self {
        Self {
            completion,
            parser: Arc::new(ResponseParser::new()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.completion.is_some()
    }

    pub fn ensure_configured(&self) -> Result<&dyn CompletionService, AppError> {
        self.completion
            .as_deref()
            .ok_or_else(|| AppError::Configuration(NOT_CONFIGURED_MESSAGE.to_string()))
    }

    pub async fn handle(&self, payload: AnalyzePayload) -> Result<AnalysisOutcome, AppError> {
        let completion = self.ensure_configured()?;
        let request = AnalysisRequest::try_from(payload)?;

        info!(
            "Running {} analysis: resume_chars={}, jd_chars={}",
            request.mode,
            request.resume_text.len(),
            request.job_description.len()
        );

        let prompt = build_prompt(
            &request.resume_text,
            &request.job_description,
            request.mode,
            request.additional_info.as_deref(),
        );
        let raw = completion
            .complete(&prompt, &request.mode.generation_parameters())
            .await?;

        let result = self.parser.parse(&raw, request.mode);

        Ok(AnalysisOutcome {
            success: true,
            analysis_type: request.mode,
            result,
        })
    }
}
