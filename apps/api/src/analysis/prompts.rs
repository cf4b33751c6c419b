//! Prompt templates for the three analysis modes.
//!
//! Placeholders are `{name}` tokens, filled in a single pass so that braces
//! inside a user's resume or job description are never re-expanded.

use crate::analysis::AnalysisMode;

/// Used in cover letters when the caller supplied no extra context.
pub const NO_ADDITIONAL_INFO: &str = "None provided";
/// Used in resume rewrites when the caller named no focus areas.
pub const DEFAULT_FOCUS_AREAS: &str = "General optimization";

/// ATS scoring prompt. Replace: {resume_text}, {job_description}
pub const SCORE_PROMPT_TEMPLATE: &str = r#"You are a professional ATS (Applicant Tracking System) analyzer. Analyze the resume against the job description and provide EXACTLY the following format:

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide your analysis in this EXACT format:

MATCH_SCORE: [number between 0-100]

MISSING_KEYWORDS: [comma-separated list of important keywords/skills from job description that are missing from resume]

REWRITTEN_SUMMARY: [A 3-4 sentence professional summary that incorporates missing keywords and better aligns with the job requirements. Make it specific to this role and include relevant skills/experience.]

Instructions:
- Match score should reflect how well the resume aligns with job requirements
- Missing keywords should be technical skills, tools, qualifications, or important terms from the job description
- Rewritten summary should be tailored specifically for this job application
- Keep the format exactly as specified above
- Be concise but accurate"#;

/// Cover letter prompt. Replace: {resume_text}, {job_description}, {additional_info}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a professional career counselor. Write a compelling cover letter based on the resume and job description provided.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

ADDITIONAL INFO (if provided):
{additional_info}

Write a professional cover letter that:
1. Has a strong opening that grabs attention
2. Highlights relevant experience from the resume that matches the job
3. Shows enthusiasm for the role and company
4. Includes specific achievements and quantifiable results where possible
5. Has a compelling closing that requests action
6. Is 3-4 paragraphs long
7. Uses a professional but engaging tone

Format the cover letter with proper business letter structure including placeholders for:
[Your Name]
[Your Address]
[City, State ZIP Code]
[Your Email]
[Your Phone]
[Date]

[Hiring Manager's Name]
[Company Name]
[Company Address]
[City, State ZIP Code]

Dear [Hiring Manager's Name / Hiring Manager],

[Cover letter content]

Sincerely,
[Your Name]"#;

/// Resume rewrite prompt. Replace: {resume_text}, {job_description}, {focus_areas}
pub const RESUME_REWRITE_PROMPT_TEMPLATE: &str = r#"You are a professional resume writer and career coach. Rewrite the provided resume to better match the job description while maintaining truthfulness and the candidate's actual experience.

ORIGINAL RESUME:
{resume_text}

TARGET JOB DESCRIPTION:
{job_description}

FOCUS AREAS (if provided):
{focus_areas}

Please rewrite the resume with the following improvements:
1. Optimize the professional summary/objective for this specific job
2. Reorder and rewrite experience bullets to highlight relevant skills
3. Add relevant keywords naturally throughout
4. Quantify achievements where possible
5. Ensure ATS-friendly formatting
6. Tailor skills section to match job requirements
7. Keep all information truthful - only reframe, don't fabricate

Provide the rewritten resume in a clean, professional format with clear sections:
- Professional Summary
- Core Skills/Technical Skills
- Professional Experience
- Education
- Additional relevant sections as needed

Make it compelling while staying honest about the candidate's background."#;

/// Builds the instruction text sent to the completion service.
pub fn build_prompt(
    resume_text: &str,
    job_description: &str,
    mode: AnalysisMode,
    additional_info: Option<&str>,
) -> String {
    match mode {
        AnalysisMode::ScoreAndSummary => fill_template(
            SCORE_PROMPT_TEMPLATE,
            &[
                ("resume_text", resume_text),
                ("job_description", job_description),
            ],
        ),
        AnalysisMode::CoverLetter => fill_template(
            COVER_LETTER_PROMPT_TEMPLATE,
            &[
                ("resume_text", resume_text),
                ("job_description", job_description),
                (
                    "additional_info",
                    additional_info.unwrap_or(NO_ADDITIONAL_INFO),
                ),
            ],
        ),
        AnalysisMode::ResumeRewrite => fill_template(
            RESUME_REWRITE_PROMPT_TEMPLATE,
            &[
                ("resume_text", resume_text),
                ("job_description", job_description),
                ("focus_areas", additional_info.unwrap_or(DEFAULT_FOCUS_AREAS)),
            ],
        ),
    }
}

/// Replaces `{key}` tokens with their values. Unknown `{...}` sequences are
/// left untouched.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
