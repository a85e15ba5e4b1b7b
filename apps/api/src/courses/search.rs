//! Relevance scorer for free-text course search.
//!
//! score = 3 × (query tokens contained in the course name)
//!       + 1 × (query tokens contained in the description)
//!
//! Containment is raw substring matching on lower-cased text, so a token like
//! "ai" also hits "maintain". Repeated query tokens count once per repetition.

use serde::{Deserialize, Serialize};

use crate::courses::catalog::Catalog;

const NAME_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCourse {
    pub category: String,
    pub course: String,
    pub description: String,
    pub relevance_score: u32,
}

/// Scores one course against pre-tokenized, lower-cased query tokens.
pub fn relevance_score(tokens: &[&str], name: &str, description: &str) -> u32 {
    let name = name.to_lowercase();
    let description = description.to_lowercase();

    let in_name = tokens.iter().filter(|t| name.contains(*t)).count() as u32;
    let in_description = tokens.iter().filter(|t| description.contains(*t)).count() as u32;

    NAME_WEIGHT * in_name + DESCRIPTION_WEIGHT * in_description
}

/// Returns every course with a positive score, best first. Ties keep catalog order.
pub fn search_courses(query: &str, catalog: &Catalog) -> Vec<ScoredCourse> {
    let query = query.to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return vec![];
    }

    let mut results: Vec<ScoredCourse> = catalog
        .courses()
        .filter_map(|entry| {
            let score = relevance_score(&tokens, &entry.course.name, &entry.course.description);
            (score > 0).then(|| ScoredCourse {
                category: entry.category.name.clone(),
                course: entry.course.name.clone(),
                description: entry.course.description.clone(),
                relevance_score: score,
            })
        })
        .collect();

    // sort_by is stable, which keeps catalog order among equal scores
    results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    results
}
