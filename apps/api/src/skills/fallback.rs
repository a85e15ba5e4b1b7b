//! Deterministic skill extraction used whenever the LLM path is unavailable.
//!
//! Pure functions over the CV text: a fixed regex battery plus a default skill
//! vocabulary feed a frequency tally, and fixed rule tables turn the surviving
//! skills into categories, an experience estimate, recommendations and career
//! paths. Never fails, whatever the input.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::skills::cleaning::title_case;
use crate::skills::models::{ExperienceLevel, SkillAnalysisResult};

const MAX_RECOMMENDATIONS: usize = 8;
const MAX_CAREER_PATHS: usize = 5;

/// One pattern per technology domain, matched case-insensitively.
static SKILL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Programming languages
        r"\b(?:Python|Java|JavaScript|TypeScript|C\+\+|C#|PHP|Ruby|Swift|Kotlin|Go|Rust|Scala|R|MATLAB)\b",
        // Web
        r"\b(?:HTML|CSS|React|Angular|Vue\.js|Node\.js|Express|Django|Flask|Spring|Laravel|Ruby on Rails)\b",
        // Databases
        r"\b(?:SQL|MySQL|PostgreSQL|MongoDB|SQLite|Oracle|Redis|Cassandra|DynamoDB|Neo4j)\b",
        // Cloud and DevOps
        r"\b(?:Git|Docker|Kubernetes|AWS|Azure|GCP|Jenkins|CI/CD|DevOps|Terraform|Ansible)\b",
        // Data science and AI
        r"\b(?:Machine Learning|AI|Data Science|Analytics|TensorFlow|PyTorch|Pandas|NumPy|Scikit-learn)\b",
        // Management and soft skills
        r"\b(?:Project Management|Agile|Scrum|Leadership|Communication|Teamwork|Problem Solving)\b",
        // Systems
        r"\b(?:Linux|Windows|macOS|Unix|Shell|Bash|PowerShell|Vim|IntelliJ|Visual Studio)\b",
        // API and architecture
        r"\b(?:REST|API|GraphQL|Microservices|SOA|JSON|XML|SOAP|gRPC)\b",
        // Testing
        r"\b(?:Unit Testing|Integration Testing|Test Automation|Selenium|Jest|JUnit|PyTest)\b",
        // Business tools
        r"\b(?:Excel|PowerPoint|Tableau|Power BI|Salesforce|JIRA|Confluence|Slack)\b",
    ]
    .iter()
    .map(|pattern| {
        Regex::new(&format!("(?i){pattern}")).expect("static skill pattern must compile")
    })
    .collect()
});

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)[\s\-]*(?:years?|yrs?)").expect("static years pattern must compile")
});

/// Vocabulary checked by plain substring search (lower-case).
pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "html", "css", "sql", "nosql", "react", "angular", "node.js",
    "django", "flask", "php", "ruby", "c++", "c#", "swift", "kotlin", "machine learning", "ai",
    "data analysis", "data science", "cloud computing", "aws", "azure", "devops", "docker",
    "kubernetes", "git", "blockchain", "cybersecurity", "project management", "agile", "scrum",
    "lean", "six sigma", "leadership", "marketing", "seo", "content marketing",
    "social media marketing", "digital marketing", "sales", "crm", "accounting",
    "financial analysis", "budgeting", "audit", "communication", "public speaking", "writing",
    "editing", "excel", "word", "powerpoint", "time management", "problem solving",
    "critical thinking", "tensorflow", "pytorch", "pandas", "numpy", "matplotlib",
    "scikit-learn", "jupyter", "tableau", "power bi", "mongodb", "postgresql", "mysql", "redis",
    "elasticsearch", "apache spark", "hadoop", "kafka", "jenkins", "gitlab", "github", "jira",
    "confluence", "linux", "windows", "macos", "bash", "powershell", "terraform", "ansible",
    "microservices", "rest api", "graphql", "oauth", "jwt", "ssl", "https",
];

/// Lower-case spelling → display form. Anything else is title-cased.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("java", "Java"),
    ("c++", "C++"),
    ("c#", "C#"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sql", "SQL"),
    ("aws", "AWS"),
    ("gcp", "GCP"),
    ("api", "API"),
    ("rest", "REST API"),
    ("json", "JSON"),
    ("xml", "XML"),
    ("ai", "AI"),
    ("ml", "Machine Learning"),
    ("react", "React"),
    ("angular", "Angular"),
    ("vue.js", "Vue.js"),
    ("node.js", "Node.js"),
];

/// Category → keywords, in priority order. The first category with a keyword
/// contained in the skill (or containing it) claims the skill.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "swift",
            "kotlin", "go", "rust", "scala", "r", "matlab",
        ],
    ),
    (
        "web_development",
        &[
            "html", "css", "react", "angular", "vue.js", "node.js", "express", "django", "flask",
            "spring", "laravel", "ruby on rails",
        ],
    ),
    (
        "data_science",
        &[
            "machine learning", "ai", "data science", "analytics", "tensorflow", "pytorch",
            "pandas", "numpy", "scikit-learn", "tableau", "power bi",
        ],
    ),
    (
        "cloud_devops",
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "devops", "ci/cd", "jenkins",
            "terraform", "ansible",
        ],
    ),
    (
        "databases",
        &[
            "sql", "mysql", "postgresql", "mongodb", "sqlite", "oracle", "redis", "cassandra",
            "dynamodb", "neo4j",
        ],
    ),
    (
        "management",
        &[
            "project management", "agile", "scrum", "leadership", "communication", "teamwork",
            "problem solving",
        ],
    ),
    (
        "tools",
        &[
            "git", "linux", "windows", "shell", "bash", "rest api", "json", "xml", "excel", "jira",
            "confluence", "selenium", "junit",
        ],
    ),
];

const UNCATEGORIZED: &str = "tools";

const SENIOR_INDICATORS: &[&str] = &[
    "senior", "lead", "principal", "architect", "manager", "director", "team lead", "tech lead",
    "head of", "vp ", "cto", "cio",
];

const MID_INDICATORS: &[&str] = &[
    "experience", "years", "developed", "led", "managed", "designed", "implemented", "built",
    "created", "delivered",
];

const DEFAULT_CAREER_PATHS: &[&str] = &[
    "Software Developer",
    "IT Specialist",
    "Technical Analyst",
    "Systems Administrator",
];

/// Runs the whole deterministic pipeline over `text`, keeping the
/// `max_skills` most frequent skills.
pub fn analyze(text: &str, max_skills: usize) -> SkillAnalysisResult {
    if text.trim().is_empty() {
        return SkillAnalysisResult::empty();
    }

    let skills = extract_skills(text, max_skills);
    let skill_categories = categorize_skills(&skills);
    let experience_level = estimate_experience_level(&text.to_lowercase(), skills.len());
    let learning_recommendations = basic_recommendations(&skills, &skill_categories);
    let career_paths = suggest_career_paths(&skill_categories);

    SkillAnalysisResult {
        current_skills: skills,
        skill_categories,
        experience_level,
        learning_recommendations,
        career_paths,
        job_match: None,
    }
}

/// Display form for a matched skill spelling.
pub fn normalize_skill_name(skill: &str) -> String {
    let skill = skill.trim();
    let lower = skill.to_lowercase();
    DISPLAY_NAMES
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, display)| display.to_string())
        .unwrap_or_else(|| title_case(skill))
}

/// Frequency tally that remembers first-seen order for tie breaking.
#[derive(Default)]
struct SkillTally {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl SkillTally {
    fn bump(&mut self, skill: String) {
        match self.index.get(&skill) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(skill.clone(), self.counts.len());
                self.counts.push((skill, 1));
            }
        }
    }

    /// Most frequent first; equal counts keep first-seen order.
    fn most_common(mut self, limit: usize) -> Vec<String> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
            .into_iter()
            .take(limit)
            .map(|(skill, _)| skill)
            .collect()
    }
}

/// Spellings a vocabulary skill may appear under: as written, with spaces
/// dropped or turned into dots, and for dotted names with the dot spaced or dropped.
fn skill_variations(skill: &str) -> Vec<String> {
    let mut variations = vec![
        skill.to_string(),
        skill.replace(' ', ""),
        skill.replace(' ', "."),
    ];
    if skill.contains('.') {
        variations.push(skill.replace('.', " "));
        variations.push(skill.replace('.', ""));
    }
    variations
}

pub fn extract_skills(text: &str, max_skills: usize) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut tally = SkillTally::default();

    for pattern in SKILL_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            tally.bump(normalize_skill_name(found.as_str()));
        }
    }

    for skill in DEFAULT_SKILLS {
        if skill_variations(skill)
            .iter()
            .any(|variation| text_lower.contains(variation.as_str()))
        {
            tally.bump(normalize_skill_name(skill));
        }
    }

    tally.most_common(max_skills)
}

/// Buckets skills by keyword. Unmatched skills land in "tools"; empty buckets are omitted.
pub fn categorize_skills(skills: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for skill in skills {
        let lower = skill.to_lowercase();
        let category = CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|keyword| lower.contains(keyword) || keyword.contains(lower.as_str()))
            })
            .map(|(name, _)| *name)
            .unwrap_or(UNCATEGORIZED);

        categories
            .entry(category.to_string())
            .or_default()
            .push(skill.clone());
    }

    categories
}

/// First "N years"/"N yrs" figure in the text, or 0.
pub fn years_of_experience(text_lower: &str) -> u32 {
    YEARS_RE
        .captures(text_lower)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// senior: ≥2 seniority titles, ≥8 years or ≥20 skills;
/// mid: ≥3 delivery verbs, ≥3 years or ≥10 skills; entry otherwise.
pub fn estimate_experience_level(text_lower: &str, skill_count: usize) -> ExperienceLevel {
    let senior_count = SENIOR_INDICATORS
        .iter()
        .filter(|indicator| text_lower.contains(*indicator))
        .count();
    let mid_count = MID_INDICATORS
        .iter()
        .filter(|indicator| text_lower.contains(*indicator))
        .count();
    let years = years_of_experience(text_lower);

    if senior_count >= 2 || years >= 8 || skill_count >= 20 {
        ExperienceLevel::Senior
    } else if mid_count >= 3 || years >= 3 || skill_count >= 10 {
        ExperienceLevel::Mid
    } else {
        ExperienceLevel::Entry
    }
}

pub fn basic_recommendations(
    skills: &[String],
    categories: &BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    let mut recommendations: Vec<&str> = Vec::new();

    if let Some(programming) = categories.get("programming") {
        let has = |name: &str| programming.iter().any(|s| s.to_lowercase() == name);
        if has("python") {
            recommendations.push(
                "Advanced Python concepts like decorators, async programming, and design patterns",
            );
        }
        if has("javascript") {
            recommendations.push("Modern JavaScript frameworks and ES6+ features, TypeScript");
        }
        if has("java") {
            recommendations
                .push("Spring Boot, microservices architecture, and advanced Java concepts");
        }
    }

    if categories.contains_key("web_development") {
        recommendations.push("Full-stack development with modern frameworks and RESTful API design");
        recommendations.push("Progressive Web Apps (PWA) and modern deployment strategies");
    }

    if categories.contains_key("data_science") {
        recommendations
            .push("Advanced machine learning algorithms, deep learning with neural networks");
        recommendations.push("Data engineering, MLOps, and production-ready ML systems");
    }

    if categories.contains_key("cloud_devops") {
        recommendations
            .push("Container orchestration, serverless architecture, and Infrastructure as Code");
        recommendations.push("Site reliability engineering (SRE) and advanced CI/CD practices");
    }

    if categories.contains_key("databases") {
        recommendations.push("Database optimization, NoSQL design patterns, and data modeling");
    }

    if categories.contains_key("management") {
        recommendations
            .push("Technical leadership, system design, and cross-functional collaboration");
    }

    if skills.len() < 5 {
        recommendations.extend([
            "Build a strong foundation in programming fundamentals and computer science concepts",
            "Learn version control with Git and collaborative development practices",
            "Develop problem-solving skills through coding challenges and projects",
        ]);
    } else if skills.len() >= 15 {
        recommendations.extend([
            "Focus on system design and architecture patterns for scalable applications",
            "Develop expertise in emerging technologies like AI/ML or blockchain",
            "Consider technical leadership and mentoring opportunities",
        ]);
    }

    recommendations
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(String::from)
        .collect()
}

pub fn suggest_career_paths(categories: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let has = |name: &str| categories.contains_key(name);
    let mut paths: Vec<&str> = Vec::new();

    if has("programming") && has("web_development") {
        paths.push("Full-Stack Web Developer");
    }

    if has("data_science") {
        if has("programming") {
            paths.push("Data Scientist / Machine Learning Engineer");
        } else {
            paths.push("Data Analyst / Business Intelligence Specialist");
        }
    }

    if has("cloud_devops") {
        paths.push("DevOps Engineer / Site Reliability Engineer");
        paths.push("Cloud Solutions Architect");
    }

    if has("management") && categories.len() > 2 {
        paths.push("Technical Project Manager / Engineering Manager");
    }

    if has("programming") {
        paths.push("Software Engineer / Backend Developer");
        paths.push("Systems Architect / Technical Lead");
    }

    if has("web_development") {
        paths.push("Frontend Developer / UI/UX Developer");
    }

    if has("databases") && has("programming") {
        paths.push("Database Developer / Data Engineer");
    }

    if paths.is_empty() {
        paths.extend(DEFAULT_CAREER_PATHS);
    }

    paths
        .into_iter()
        .take(MAX_CAREER_PATHS)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_senior_engineer_scenario() {
        let text = "Senior Software Engineer with 10 years experience in Python, Docker, and AWS";
        let result = analyze(text, 20);

        for skill in ["Python", "Docker", "AWS"] {
            assert!(
                result.current_skills.iter().any(|s| s == skill),
                "missing {skill} in {:?}",
                result.current_skills
            );
        }
        assert_eq!(result.experience_level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_empty_text_returns_canned_result() {
        let result = analyze("   \n ", 20);
        assert_eq!(result, SkillAnalysisResult::empty());
    }

    #[test]
    fn test_arbitrary_input_does_not_panic() {
        for text in [
            "",
            "日本語の履歴書です。Pythonとデータ分析",
            "🚀🚀🚀 C++ ++ ## $$",
            "\u{0}\u{1}\u{2}",
            "99999999999999999999999 years",
        ] {
            let result = analyze(text, 20);
            assert!(result.current_skills.len() <= 20);
        }
    }

    #[test]
    fn test_frequency_then_first_seen_order() {
        let text = "Docker. Kubernetes. Kubernetes. Kubernetes on Docker. Terraform";
        let skills = extract_skills(text, 20);
        assert_eq!(skills[0], "Kubernetes");
        assert_eq!(skills[1], "Docker");
        assert!(skills.contains(&"Terraform".to_string()));
    }

    #[test]
    fn test_respects_max_skills() {
        let text = "Python Java JavaScript TypeScript PHP Ruby Swift Kotlin Rust Scala \
                    HTML CSS React Angular Django Flask MySQL MongoDB Redis Docker";
        assert_eq!(extract_skills(text, 5).len(), 5);
    }

    #[test]
    fn test_dotted_vocabulary_variants() {
        for text in ["Built services in Node.js", "Built services in node js", "nodejs"] {
            let skills = extract_skills(text, 20);
            assert!(skills.contains(&"Node.js".to_string()), "{text}: {skills:?}");
        }
    }

    #[test]
    fn test_normalize_skill_name_table() {
        assert_eq!(normalize_skill_name("ml"), "Machine Learning");
        assert_eq!(normalize_skill_name("rest"), "REST API");
        assert_eq!(normalize_skill_name("SQL"), "SQL");
        assert_eq!(normalize_skill_name("kubernetes"), "Kubernetes");
        assert_eq!(normalize_skill_name("power bi"), "Power Bi");
    }

    #[test]
    fn test_categorize_skills() {
        let categories = categorize_skills(&strings(&["Python", "AWS", "Agile", "Photoshop"]));
        assert_eq!(categories["programming"], strings(&["Python"]));
        assert_eq!(categories["cloud_devops"], strings(&["AWS"]));
        assert_eq!(categories["management"], strings(&["Agile"]));
        // unmatched skills default to tools
        assert_eq!(categories["tools"], strings(&["Photoshop"]));
        assert!(!categories.contains_key("databases"));
    }

    #[test]
    fn test_categorize_single_letter_keyword_claims_skills() {
        // "r" is a programming keyword and matches any skill containing the letter
        let categories = categorize_skills(&strings(&["Docker", "Scrum"]));
        assert_eq!(categories["programming"], strings(&["Docker", "Scrum"]));
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn test_categorize_empty_is_empty() {
        assert!(categorize_skills(&[]).is_empty());
    }

    #[test]
    fn test_years_extraction() {
        assert_eq!(years_of_experience("over 12 years of work"), 12);
        assert_eq!(years_of_experience("5-yrs in retail"), 5);
        assert_eq!(years_of_experience("no figures here"), 0);
    }

    #[test]
    fn test_experience_monotonic_in_years() {
        assert_eq!(
            estimate_experience_level("10 years experience", 2),
            ExperienceLevel::Senior
        );
        assert_eq!(
            estimate_experience_level("4 years experience", 2),
            ExperienceLevel::Mid
        );
        assert_eq!(
            estimate_experience_level("1 year experience", 2),
            ExperienceLevel::Entry
        );
    }

    #[test]
    fn test_experience_from_titles_and_skill_count() {
        assert_eq!(
            estimate_experience_level("principal architect", 0),
            ExperienceLevel::Senior
        );
        assert_eq!(estimate_experience_level("", 20), ExperienceLevel::Senior);
        assert_eq!(
            estimate_experience_level("developed, implemented and delivered", 0),
            ExperienceLevel::Mid
        );
        assert_eq!(estimate_experience_level("", 10), ExperienceLevel::Mid);
        assert_eq!(estimate_experience_level("", 9), ExperienceLevel::Entry);
    }

    #[test]
    fn test_recommendations_for_small_profile() {
        let skills = strings(&["Python"]);
        let categories = categorize_skills(&skills);
        let recs = basic_recommendations(&skills, &categories);
        assert!(recs[0].starts_with("Advanced Python concepts"));
        assert!(recs.iter().any(|r| r.contains("version control with Git")));
        assert!(recs.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_recommendations_capped_at_eight() {
        let mut categories = BTreeMap::new();
        for name in [
            "programming",
            "web_development",
            "data_science",
            "cloud_devops",
            "databases",
            "management",
        ] {
            categories.insert(name.to_string(), strings(&["Python", "JavaScript", "Java"]));
        }
        let skills: Vec<String> = (0..16).map(|i| format!("Skill {i}")).collect();
        assert_eq!(
            basic_recommendations(&skills, &categories).len(),
            MAX_RECOMMENDATIONS
        );
    }

    #[test]
    fn test_career_paths_rules() {
        let categories = categorize_skills(&strings(&["Python", "HTML", "Docker"]));
        let paths = suggest_career_paths(&categories);
        assert_eq!(paths[0], "Full-Stack Web Developer");
        assert!(paths.len() <= MAX_CAREER_PATHS);
    }

    #[test]
    fn test_career_paths_default_when_nothing_matches() {
        let paths = suggest_career_paths(&BTreeMap::new());
        assert_eq!(paths, strings(DEFAULT_CAREER_PATHS));
    }

    #[test]
    fn test_data_science_without_programming() {
        let mut categories = BTreeMap::new();
        categories.insert("data_science".to_string(), strings(&["Tableau"]));
        let paths = suggest_career_paths(&categories);
        assert_eq!(paths[0], "Data Analyst / Business Intelligence Specialist");
    }
}
