// Prompt text for CV skill analysis.

/// CV characters sent when no job description accompanies it.
pub const CV_CHAR_LIMIT: usize = 4000;
/// CV characters sent alongside a job description.
pub const CV_CHAR_LIMIT_WITH_JOB: usize = 3000;
pub const JOB_CHAR_LIMIT: usize = 2000;

const JOB_MATCHING_FIELDS: &str = r#"
3. "job_requirements": Array of skills/requirements from the job description
4. "skill_gaps": Array of skills needed for the job but missing from CV
5. "matching_skills": Array of skills that match between CV and job
6. "career_advice": Brief advice on how to bridge the gap
"#;

/// Builds the analysis prompt. A blank job description is treated as absent.
pub fn build_analysis_prompt(cv_text: &str, job_description: Option<&str>) -> String {
    let job_description = job_description.filter(|jd| !jd.trim().is_empty());

    let (job_desc_text, job_description_section, job_specific_fields, cv_limit) =
        match job_description {
            Some(jd) => (
                " and job description",
                format!("\nJOB DESCRIPTION:\n{}", truncate_chars(jd, JOB_CHAR_LIMIT)),
                JOB_MATCHING_FIELDS,
                CV_CHAR_LIMIT_WITH_JOB,
            ),
            None => ("", String::new(), "", CV_CHAR_LIMIT),
        };
    let cv_text = truncate_chars(cv_text, cv_limit);

    format!(
        r#"
Analyze this CV{job_desc_text} to extract skills and provide career guidance.

CV TEXT:
{cv_text}

{job_description_section}

Please provide a JSON response with:
1. "current_skills": Array of technical and professional skills found in the CV
{job_specific_fields}
2. "skill_categories": Object categorizing skills (e.g. "programming": [...], "data": [...], "management": [...])
3. "experience_level": Estimated experience level (entry/mid/senior)
4. "learning_recommendations": Array of specific courses/skills to focus on
5. "career_paths": Array of potential career directions based on current skills

Focus on technical skills, programming languages, frameworks, tools, certifications, and professional competencies.
Return only valid JSON without markdown formatting or code blocks.
"#
    )
}

/// Returns at most `limit` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
