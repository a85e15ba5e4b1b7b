use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse seniority bucket. Anything the model says outside the known
/// vocabulary collapses to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    #[default]
    Unknown,
}

impl ExperienceLevel {
    /// Maps free text onto a level: junior→entry, middle→mid, lead/principal→senior.
    pub fn parse_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "entry" | "junior" => ExperienceLevel::Entry,
            "mid" | "middle" => ExperienceLevel::Mid,
            "senior" | "lead" | "principal" => ExperienceLevel::Senior,
            _ => ExperienceLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra fields produced when the CV is analysed against a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_requirements: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub matching_skills: Vec<String>,
    pub career_advice: String,
}

/// Outcome of analysing one CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysisResult {
    pub current_skills: Vec<String>,
    /// Category name (lower snake case) → skills. Empty categories are never present.
    /// Keys serialize in sorted order, whatever order the model or fallback produced.
    pub skill_categories: BTreeMap<String, Vec<String>>,
    pub experience_level: ExperienceLevel,
    pub learning_recommendations: Vec<String>,
    pub career_paths: Vec<String>,
    #[serde(flatten)]
    pub job_match: Option<JobMatch>,
}

impl SkillAnalysisResult {
    /// Canned answer for a CV with no extractable text.
    pub fn empty() -> Self {
        Self {
            current_skills: vec![],
            skill_categories: BTreeMap::new(),
            experience_level: ExperienceLevel::Unknown,
            learning_recommendations: vec![
                "Please upload a CV with detailed skills and experience information".to_string(),
            ],
            career_paths: vec!["Software Developer".to_string(), "IT Specialist".to_string()],
            job_match: None,
        }
    }
}

const PROGRAMMING_AREA: &[&str] = &["python", "java", "javascript", "c++", "c#"];
const DATA_AREA: &[&str] = &["data science", "machine learning", "analytics", "sql"];
const WEB_AREA: &[&str] = &["html", "css", "react", "angular", "web development"];
const DEVOPS_AREA: &[&str] = &["docker", "kubernetes", "aws", "azure", "devops"];

/// Broad skill areas used to pick follow-up suggestions on the results page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAreas {
    pub programming: bool,
    pub data: bool,
    pub web: bool,
    pub devops: bool,
}

impl SkillAreas {
    pub fn from_skills(skills: &[String]) -> Self {
        let lowered: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        let any_in = |area: &[&str]| lowered.iter().any(|s| area.contains(&s.as_str()));

        Self {
            programming: any_in(PROGRAMMING_AREA),
            data: any_in(DATA_AREA),
            web: any_in(WEB_AREA),
            devops: any_in(DEVOPS_AREA),
        }
    }
}
