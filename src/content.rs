use std::collections::HashSet;
use std::sync::{LazyLock, OnceLock};

use chrono::NaiveDate;
use dashmap::DashMap;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blog::TocEntry;
use crate::metric::{parse_metric_value, ParsedMetric};
use crate::projects::Project;

pub const PROJECTS_FILE: &str = "projects.yaml";
pub const CASE_STUDIES_FILE: &str = "case_studies.yaml";

/// Rendered case study pages fetched from the server, keyed by slug.
pub static GLOBAL_CASE_STUDY_CACHE: LazyLock<DashMap<String, Option<CaseStudyPage>>> =
    LazyLock::new(DashMap::new);

static PROJECTS: OnceLock<Vec<Project>> = OnceLock::new();
static CASE_STUDIES: OnceLock<Vec<CaseStudy>> = OnceLock::new();

#[derive(Embed)]
#[folder = "content"]
#[cfg_attr(feature = "hydrate", metadata_only = true)]
pub struct Content;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content file {0} is missing")]
    Missing(String),
    #[error("Couldn't parse content: {0}")]
    Parse(String),
    #[error("Duplicate slug {0}")]
    DuplicateSlug(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetric {
    pub label: String,
    /// Display string such as `"$184.4M"`, animated on the page.
    pub value: String,
}

impl CaseMetric {
    pub fn parsed(&self) -> ParsedMetric {
        parse_metric_value(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub summary: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<CaseMetric>,
    #[serde(default)]
    pub body: String,
}

/// A case study with its markdown body rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudyPage {
    pub study: CaseStudy,
    pub body_html: String,
    pub toc: Vec<TocEntry>,
}

fn read(file: &str) -> Result<String, ContentError> {
    let data = Content::get(file).ok_or_else(|| ContentError::Missing(file.to_string()))?;
    String::from_utf8(data.data.into()).map_err(|e| ContentError::Parse(e.to_string()))
}

fn check_unique<'a>(slugs: impl Iterator<Item = &'a str>) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug(slug.to_string()));
        }
    }
    Ok(())
}

pub fn parse_projects(yaml: &str) -> Result<Vec<Project>, ContentError> {
    let projects: Vec<Project> =
        serde_yaml::from_str(yaml).map_err(|e| ContentError::Parse(e.to_string()))?;
    check_unique(projects.iter().map(|p| p.slug.as_str()))?;
    Ok(projects)
}

/// Parses case studies and orders them newest first.
pub fn parse_case_studies(yaml: &str) -> Result<Vec<CaseStudy>, ContentError> {
    let mut studies: Vec<CaseStudy> =
        serde_yaml::from_str(yaml).map_err(|e| ContentError::Parse(e.to_string()))?;
    check_unique(studies.iter().map(|s| s.slug.as_str()))?;
    studies.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(studies)
}

pub fn load_projects() -> Result<Vec<Project>, ContentError> {
    if let Some(projects) = PROJECTS.get() {
        return Ok(projects.clone());
    }
    let projects = parse_projects(&read(PROJECTS_FILE)?)?;
    #[cfg(any(feature = "ssr", feature = "rss"))]
    tracing::debug!(count = projects.len(), "loaded projects");
    Ok(PROJECTS.get_or_init(|| projects).clone())
}

pub fn load_case_studies() -> Result<Vec<CaseStudy>, ContentError> {
    if let Some(studies) = CASE_STUDIES.get() {
        return Ok(studies.clone());
    }
    let studies = parse_case_studies(&read(CASE_STUDIES_FILE)?)?;
    #[cfg(any(feature = "ssr", feature = "rss"))]
    tracing::debug!(count = studies.len(), "loaded case studies");
    Ok(CASE_STUDIES.get_or_init(|| studies).clone())
}

pub fn get_case_study(slug: &str) -> Option<CaseStudy> {
    load_case_studies()
        .ok()?
        .into_iter()
        .find(|s| s.slug == slug)
}
