// Analysis engine: prompt building, completion call, response parsing.
// All completion calls go through llm_client; no direct Gemini calls here.

pub mod handlers;
pub mod orchestrator;
pub mod parser;
pub mod prompts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::GenerationParameters;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Resume text, job description, and analysis type are required";
pub const INVALID_MODE_MESSAGE: &str = "Invalid analysis type";

/// The three supported operations. Wire names match the `analysisType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// ATS match score, missing keywords and a tailored summary.
    #[serde(rename = "analyze")]
    ScoreAndSummary,
    #[serde(rename = "cover-letter")]
    CoverLetter,
    #[serde(rename = "rewrite-resume")]
    ResumeRewrite,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::ScoreAndSummary,
        AnalysisMode::CoverLetter,
        AnalysisMode::ResumeRewrite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::ScoreAndSummary => "analyze",
            AnalysisMode::CoverLetter => "cover-letter",
            AnalysisMode::ResumeRewrite => "rewrite-resume",
        }
    }

    /// Scoring wants short, stable output; the two writing modes get more room
    /// and a warmer temperature.
    pub fn generation_parameters(&self) -> GenerationParameters {
        match self {
            AnalysisMode::ScoreAndSummary => GenerationParameters {
                temperature: 0.3,
                top_k: 40,
                top_p: 0.8,
                max_output_tokens: 1024,
            },
            AnalysisMode::CoverLetter | AnalysisMode::ResumeRewrite => GenerationParameters {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.8,
                max_output_tokens: 2048,
            },
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| AppError::Validation(INVALID_MODE_MESSAGE.to_string()))
    }
}

/// Raw `POST /analyze` body. Every field is optional here so that missing
/// values surface as validation errors rather than extractor rejections.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePayload {
    pub resume_text: Option<String>,
    pub job_desc: Option<String>,
    pub analysis_type: Option<String>,
    pub additional_info: Option<String>,
}

/// A validated request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
    pub mode: AnalysisMode,
    pub additional_info: Option<String>,
}

impl TryFrom<AnalyzePayload> for AnalysisRequest {
    type Error = AppError;

    fn try_from(payload: AnalyzePayload) -> Result<Self, Self::Error> {
        let (Some(resume_text), Some(job_description), Some(analysis_type)) = (
            non_blank(payload.resume_text),
            non_blank(payload.job_desc),
            non_blank(payload.analysis_type),
        ) else {
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        Ok(AnalysisRequest {
            resume_text,
            job_description,
            mode: analysis_type.parse()?,
            additional_info: non_blank(payload.additional_info),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parsed completion output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    #[serde(rename_all = "camelCase")]
    Score {
        match_score: u8,
        missing_keywords: String,
        rewritten_summary: String,
    },
    Freeform { content: String },
}

/// Successful `POST /analyze` response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub success: bool,
    pub analysis_type: AnalysisMode,
    #[serde(flatten)]
    pub result: AnalysisResult,
}
