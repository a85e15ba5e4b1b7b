//! Course recommender. Ranks catalog courses by how many of a student's
//! skills appear in the course name or description.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::courses::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedCourse {
    pub category: String,
    pub course: String,
    pub description: String,
    pub matching_skills: Vec<String>,
    pub match_score: usize,
}

/// Recommends at most `max_recommendations` courses for `skills`.
///
/// A skill matches when its lower-cased form is a substring of the lower-cased
/// course name or description. `match_score` counts distinct matching skills
/// (case-insensitive); ties keep catalog order. Courses repeated under the same
/// category and name are considered once.
pub fn recommend(
    skills: &[String],
    catalog: &Catalog,
    max_recommendations: usize,
) -> Vec<RecommendedCourse> {
    if skills.is_empty() {
        return vec![];
    }

    let needles: Vec<(String, &String)> = skills
        .iter()
        .map(|s| s.trim())
        .zip(skills)
        .filter(|(trimmed, _)| !trimmed.is_empty())
        .map(|(trimmed, original)| (trimmed.to_lowercase(), original))
        .collect();

    let mut seen_courses = HashSet::new();
    let mut recommendations = Vec::new();

    for entry in catalog.courses() {
        let key = (entry.category.name.as_str(), entry.course.name.as_str());
        if !seen_courses.insert(key) {
            continue;
        }

        let name = entry.course.name.to_lowercase();
        let description = entry.course.description.to_lowercase();

        let mut matched_lower = HashSet::new();
        let matching_skills: Vec<String> = needles
            .iter()
            .filter(|(needle, _)| name.contains(needle.as_str()) || description.contains(needle.as_str()))
            .filter(|(needle, _)| matched_lower.insert(needle.clone()))
            .map(|(_, original)| original.trim().to_string())
            .collect();

        if matching_skills.is_empty() {
            continue;
        }

        recommendations.push(RecommendedCourse {
            category: entry.category.name.clone(),
            course: entry.course.name.clone(),
            description: entry.course.description.clone(),
            match_score: matching_skills.len(),
            matching_skills,
        });
    }

    recommendations.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    recommendations.truncate(max_recommendations);
    recommendations
}
