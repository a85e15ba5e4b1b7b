//! Course catalog: the static `{categories: [{name, courses: [...]}]}` document
//! that search and recommendation run against.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub skills: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub projects: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub career_paths: Vec<String>,
}

/// Reads an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub categories: usize,
    pub courses: usize,
}

/// A course together with the category it was found in.
#[derive(Debug, Clone, Copy)]
pub struct CourseRef<'a> {
    pub category: &'a Category,
    pub course: &'a Course,
}

impl Catalog {
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            categories: self.categories.len(),
            courses: self.categories.iter().map(|c| c.courses.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.courses.is_empty())
    }

    /// Iterates every course in catalog order.
    pub fn courses(&self) -> impl Iterator<Item = CourseRef<'_>> {
        self.categories.iter().flat_map(|category| {
            category
                .courses
                .iter()
                .map(move |course| CourseRef { category, course })
        })
    }

    /// Case-insensitive exact name lookup; the first match in catalog order wins.
    pub fn find_course(&self, name: &str) -> Option<CourseRef<'_>> {
        let wanted = name.trim().to_lowercase();
        self.courses()
            .find(|entry| entry.course.name.to_lowercase() == wanted)
    }
}

/// Reads and parses the catalog at `path`.
///
/// A missing or malformed file yields an empty catalog rather than an error;
/// callers must tolerate `categories: []`.
pub fn load(path: &Path) -> Catalog {
    let parsed = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))
        .and_then(|raw| {
            serde_json::from_str::<Catalog>(&raw)
                .with_context(|| format!("parsing {}", path.display()))
        });

    match parsed {
        Ok(catalog) => {
            let stats = catalog.stats();
            info!(
                "Loaded course catalog from {}: {} categories, {} courses",
                path.display(),
                stats.categories,
                stats.courses
            );
            catalog
        }
        Err(e) => {
            error!("Error loading course catalog: {e:#}");
            Catalog::default()
        }
    }
}

/// Process-wide catalog cache. Readers take a cheap `Arc` snapshot; `reload`
/// re-reads the file and swaps the snapshot in place.
#[derive(Clone)]
pub struct CatalogStore {
    path: PathBuf,
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogStore {
    /// Loads the catalog once from `path`.
    pub fn open(path: PathBuf) -> Self {
        let catalog = load(&path);
        Self::with_catalog(path, catalog)
    }

    pub fn with_catalog(path: PathBuf, catalog: Catalog) -> Self {
        Self {
            path,
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    pub async fn current(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    pub async fn reload(&self) -> anyhow::Result<CatalogStats> {
        let path = self.path.clone();
        let catalog = tokio::task::spawn_blocking(move || load(&path))
            .await
            .context("catalog reload task failed")?;
        let stats = catalog.stats();
        *self.current.write().await = Arc::new(catalog);
        Ok(stats)
    }
}

/// Renders a course as a human-readable brief. Optional sections appear only
/// when the catalog provides them.
pub fn course_brief(course: &Course) -> String {
    let mut brief = format!("Course: {}\n\n", course.name);

    let description = if course.description.trim().is_empty() {
        "No description available"
    } else {
        course.description.as_str()
    };
    brief.push_str(&format!("Description: {description}\n\n"));

    if let Some(duration) = &course.duration {
        brief.push_str(&format!("Duration: {duration}\n"));
    }
    if let Some(level) = &course.level {
        brief.push_str(&format!("Level: {level}\n\n"));
    }

    for (heading, items) in [
        ("Skills You'll Learn", &course.skills),
        ("Projects You'll Build", &course.projects),
        ("Career Opportunities", &course.career_paths),
    ] {
        if items.is_empty() {
            continue;
        }
        brief.push_str(heading);
        brief.push_str(":\n");
        for item in items {
            brief.push_str(&format!("- {item}\n"));
        }
        brief.push('\n');
    }

    brief
}
