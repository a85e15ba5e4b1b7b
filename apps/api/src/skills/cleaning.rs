//! Post-decode normalization of model output into a `SkillAnalysisResult`.
//!
//! The model's JSON is untrusted: every field is type-checked, trimmed, capped
//! and re-cased here. Applying the skill cleaner twice gives the same list.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use crate::skills::extractor::ExtractionError;
use crate::skills::models::{ExperienceLevel, JobMatch, SkillAnalysisResult};

pub const MAX_SKILLS: usize = 25;
pub const MAX_SKILL_CHARS: usize = 50;
pub const MIN_SKILL_CHARS: usize = 2;
pub const MAX_TEXT_ITEMS: usize = 10;
pub const MAX_TEXT_ITEM_CHARS: usize = 200;
pub const MAX_ADVICE_CHARS: usize = 500;

/// Kept fully upper-case whenever they appear in any casing.
const ACRONYMS: &[&str] = &[
    "SQL", "HTML", "CSS", "API", "REST", "JSON", "XML", "AWS", "GCP", "CI/CD", "AI", "ML", "UI",
    "UX",
];

/// Technology names with a canonical mixed-case spelling.
const CANONICAL_NAMES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("python", "Python"),
    ("java", "Java"),
    ("react", "React"),
    ("angular", "Angular"),
    ("vue.js", "Vue.js"),
    ("node.js", "Node.js"),
];

impl SkillAnalysisResult {
    /// Validates and cleans a decoded model reply.
    ///
    /// The reply must be a JSON object with a `current_skills` key; everything
    /// else is optional and defaults to empty. Job-matching fields are carried
    /// only if the reply includes `job_requirements`.
    pub fn from_llm_value(value: &Value) -> Result<Self, ExtractionError> {
        let object = value.as_object().ok_or_else(|| {
            ExtractionError::SchemaMismatch("model reply is not a JSON object".to_string())
        })?;
        if !object.contains_key("current_skills") {
            return Err(ExtractionError::SchemaMismatch(
                "model reply has no current_skills".to_string(),
            ));
        }

        let job_match = object.contains_key("job_requirements").then(|| JobMatch {
            job_requirements: clean_skills_list(object.get("job_requirements")),
            skill_gaps: clean_skills_list(object.get("skill_gaps")),
            matching_skills: clean_skills_list(object.get("matching_skills")),
            career_advice: clean_text(object.get("career_advice")),
        });

        Ok(Self {
            current_skills: clean_skills_list(object.get("current_skills")),
            skill_categories: clean_skill_categories(object.get("skill_categories")),
            experience_level: clean_experience_level(object.get("experience_level")),
            learning_recommendations: clean_text_list(object.get("learning_recommendations")),
            career_paths: clean_text_list(object.get("career_paths")),
            job_match,
        })
    }
}

/// Cleans a single skill name, or rejects it as too short/long.
pub fn clean_skill(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let len = collapsed.chars().count();
    if !(MIN_SKILL_CHARS..=MAX_SKILL_CHARS).contains(&len) {
        return None;
    }

    let upper = collapsed.to_uppercase();
    if ACRONYMS.contains(&upper.as_str()) {
        return Some(upper);
    }

    let lower = collapsed.to_lowercase();
    if let Some((_, canonical)) = CANONICAL_NAMES.iter().find(|(key, _)| *key == lower) {
        return Some(canonical.to_string());
    }

    // Title-casing can grow the text ("ß" becomes "Ss"), so the bound is checked again
    let titled = title_case(&collapsed);
    let len = titled.chars().count();
    (MIN_SKILL_CHARS..=MAX_SKILL_CHARS)
        .contains(&len)
        .then_some(titled)
}

/// Cleans a list of skills: strings only, deduplicated case-insensitively,
/// first occurrence wins, at most `MAX_SKILLS` entries.
pub fn clean_skills_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return vec![];
    };
    clean_skills(items.iter().filter_map(Value::as_str))
}

pub fn clean_skills<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(clean_skill)
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .take(MAX_SKILLS)
        .collect()
}

/// Keeps string-keyed list-valued categories, keys normalized to lower snake
/// case. Categories whose skills all clean away are dropped.
pub fn clean_skill_categories(value: Option<&Value>) -> BTreeMap<String, Vec<String>> {
    let Some(object) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    clean_category_map(object)
}

fn clean_category_map(object: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    let mut cleaned = BTreeMap::new();
    for (category, skills) in object {
        if !skills.is_array() {
            continue;
        }
        let skills = clean_skills_list(Some(skills));
        if skills.is_empty() {
            continue;
        }
        cleaned.insert(category.trim().to_lowercase().replace(' ', "_"), skills);
    }
    cleaned
}

pub fn clean_experience_level(value: Option<&Value>) -> ExperienceLevel {
    value
        .and_then(Value::as_str)
        .map(ExperienceLevel::parse_loose)
        .unwrap_or_default()
}

/// Recommendations and career paths: non-blank trimmed strings of at most
/// `MAX_TEXT_ITEM_CHARS`, capped at `MAX_TEXT_ITEMS`.
pub fn clean_text_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return vec![];
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|item| !item.is_empty() && item.chars().count() <= MAX_TEXT_ITEM_CHARS)
        .map(String::from)
        .take(MAX_TEXT_ITEMS)
        .collect()
}

pub fn clean_text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(|text| text.trim().chars().take(MAX_ADVICE_CHARS).collect())
        .unwrap_or_default()
}

/// Upper-cases the first cased character of every run of cased characters and
/// lower-cases the rest, so "node.js" becomes "Node.Js". A leading character
/// whose upper case spans several characters keeps only the first one upper,
/// so "ßa" becomes "Ssa" and "ﬁle" becomes "File".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}
