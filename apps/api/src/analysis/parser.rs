//! Turns raw completion text into an `AnalysisResult`.
//!
//! Each field is scanned independently. A miss falls back to a fixed default
//! instead of failing the request.

use regex::Regex;

use crate::analysis::{AnalysisMode, AnalysisResult};

pub const DEFAULT_MATCH_SCORE: u8 = 0;
pub const DEFAULT_MISSING_KEYWORDS: &str = "No keywords identified";
pub const DEFAULT_REWRITTEN_SUMMARY: &str = "Unable to generate summary";

const MAX_MATCH_SCORE: u64 = 100;

pub struct ResponseParser {
    match_score_regex: Regex,
    missing_keywords_regex: Regex,
    summary_regex: Regex,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        // Anything that is not a digit may sit between the label and the score.
        let match_score_regex =
            Regex::new(r"(?i)MATCH_SCORE:\D*(\d+)").expect("Invalid match score regex");

        let missing_keywords_regex = Regex::new(r"(?i)MISSING_KEYWORDS:\s*([^\n]+)")
            .expect("Invalid missing keywords regex");

        // Lazy across newlines; ends at the first blank line or end of input.
        let summary_regex = Regex::new(r"(?is)REWRITTEN_SUMMARY:\s*(.+?)(?:\n\n|\z)")
            .expect("Invalid summary regex");

        Self {
            match_score_regex,
            missing_keywords_regex,
            summary_regex,
        }
    }

    pub fn parse(&self, raw: &str, mode: AnalysisMode) -> AnalysisResult {
        match mode {
            AnalysisMode::ScoreAndSummary => AnalysisResult::Score {
                match_score: self.match_score(raw),
                missing_keywords: self.missing_keywords(raw),
                rewritten_summary: self.rewritten_summary(raw),
            },
            AnalysisMode::CoverLetter | AnalysisMode::ResumeRewrite => AnalysisResult::Freeform {
                content: raw.to_string(),
            },
        }
    }

    /// Scores above 100 are clamped; digit runs too long for `u64` fall back
    /// to the default.
    pub fn match_score(&self, raw: &str) -> u8 {
        self.match_score_regex
            .captures(raw)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .map(|score| score.min(MAX_MATCH_SCORE) as u8)
            .unwrap_or(DEFAULT_MATCH_SCORE)
    }

    pub fn missing_keywords(&self, raw: &str) -> String {
        capture_trimmed(&self.missing_keywords_regex, raw)
            .unwrap_or_else(|| DEFAULT_MISSING_KEYWORDS.to_string())
    }

    pub fn rewritten_summary(&self, raw: &str) -> String {
        capture_trimmed(&self.summary_regex, raw)
            .unwrap_or_else(|| DEFAULT_REWRITTEN_SUMMARY.to_string())
    }
}

fn capture_trimmed(regex: &Regex, raw: &str) -> Option<String> {
    regex
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
