use serde::Deserialize;
use std::{borrow::Cow, collections::HashSet, sync::OnceLock};
use thiserror::Error;

use crate::telemetry::{log_event, LogLevel};

const CATALOG_JSON: &str = include_str!("../assets/projects.json");
const FALLBACK_TECHNOLOGIES: [&str; 4] = ["React", "TypeScript", "Tailwind CSS", "Motion"];
const OVERVIEW_SUFFIX: &str = " This project showcases innovative design thinking and technical excellence, pushing the boundaries of what's possible in digital experiences. Through careful attention to detail and user-centered design principles, we created a solution that not only meets functional requirements but also delivers an exceptional user experience.";

static CATALOG: OnceLock<Catalog> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

impl Project {
    pub fn overview(&self) -> Cow<'_, str> {
        match self.full_description.as_deref() {
            Some(full) if !full.trim().is_empty() => Cow::Borrowed(full),
            _ => Cow::Owned(format!("{}{OVERVIEW_SUFFIX}", self.description)),
        }
    }

    pub fn technologies(&self) -> Vec<&str> {
        match self.technologies.as_ref() {
            Some(list) if !list.is_empty() => list.iter().map(String::as_str).collect(),
            _ => FALLBACK_TECHNOLOGIES.to_vec(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("project catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("project id {0} appears more than once")]
    DuplicateId(u32),
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(source)?;

        let mut ids = HashSet::new();
        for project in &catalog.projects {
            if !ids.insert(project.id) {
                return Err(CatalogError::DuplicateId(project.id));
            }
        }

        Ok(catalog)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}

pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| {
        Catalog::from_json(CATALOG_JSON).unwrap_or_else(|error| {
            log_event(
                LogLevel::Info,
                "catalog_invalid",
                serde_json::json!({ "message": error.to_string() }),
            );
            Catalog::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_lists_three_projects_in_order() {
        let titles: Vec<&str> = catalog()
            .projects()
            .iter()
            .map(|project| project.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec!["ARCHITECTURAL VISION", "CREATIVE WORKSPACE", "MINIMAL DESIGN"]
        );
        assert_eq!(
            catalog().find(2).map(|project| project.category.as_str()),
            Some("Branding & Strategy")
        );
        assert!(catalog().find(99).is_none());
    }

    #[test]
    fn optional_fields_fall_back() {
        let project = catalog().find(1).expect("project 1 exists");

        assert!(project.overview().starts_with("A minimalist approach"));
        assert!(project.overview().ends_with("exceptional user experience."));
        assert_eq!(
            project.technologies(),
            vec!["React", "TypeScript", "Tailwind CSS", "Motion"]
        );
    }

    #[test]
    fn explicit_fields_are_used() {
        let catalog = Catalog::from_json(
            r#"[{
                "id": 7,
                "title": "T",
                "category": "C",
                "image": "https://example.com/i.jpg",
                "description": "D",
                "fullDescription": "Everything about T.",
                "technologies": ["Rust", "Yew"],
                "liveUrl": "https://example.com",
                "githubUrl": "https://github.com/example/t"
            }]"#,
        )
        .expect("valid catalog");
        let project = catalog.find(7).expect("project 7 exists");

        assert_eq!(project.overview(), "Everything about T.");
        assert_eq!(project.technologies(), vec!["Rust", "Yew"]);
        assert_eq!(project.live_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let source = r#"[
            {"id": 1, "title": "A", "category": "c", "image": "i", "description": "d"},
            {"id": 1, "title": "B", "category": "c", "image": "i", "description": "d"}
        ]"#;

        assert!(matches!(
            Catalog::from_json(source),
            Err(CatalogError::DuplicateId(1))
        ));
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
