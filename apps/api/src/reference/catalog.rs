//! In-memory reference store loaded from a JSON catalogue document.
//!
//! Used when no database is configured: either the catalogue bundled into the
//! binary or one read from `REFERENCE_DATA_PATH`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::quiz::Category;
use crate::reference::models::{Cluster, College, Course, CourseLevel, Pathway};
use crate::reference::{ReferenceError, ReferenceStore};

const BUNDLED_CATALOG: &str = include_str!("../../data/reference.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub pathways: Vec<Pathway>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub colleges: Vec<College>,
}

impl Catalog {
    /// Structural checks: unique ids per collection, at most one cluster per
    /// category, and every pathway owned by a known cluster.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        let mut categories = HashSet::new();
        let mut cluster_ids = HashSet::new();
        for cluster in &self.clusters {
            if !categories.insert(cluster.category) {
                return Err(ReferenceError::Invalid(format!(
                    "more than one cluster for category '{}'",
                    cluster.category
                )));
            }
            if !cluster_ids.insert(cluster.id) {
                return Err(ReferenceError::Invalid(format!(
                    "duplicate cluster id {}",
                    cluster.id
                )));
            }
        }

        let mut pathway_ids = HashSet::new();
        for pathway in &self.pathways {
            if !pathway_ids.insert(pathway.id) {
                return Err(ReferenceError::Invalid(format!(
                    "duplicate pathway id {}",
                    pathway.id
                )));
            }
            if !cluster_ids.contains(&pathway.cluster_id) {
                return Err(ReferenceError::Invalid(format!(
                    "pathway '{}' references unknown cluster {}",
                    pathway.name, pathway.cluster_id
                )));
            }
        }

        ensure_unique("course", self.courses.iter().map(|c| c.id))?;
        ensure_unique("college", self.colleges.iter().map(|c| c.id))?;
        Ok(())
    }
}

fn ensure_unique(kind: &str, ids: impl Iterator<Item = Uuid>) -> Result<(), ReferenceError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ReferenceError::Invalid(format!("duplicate {kind} id {id}")));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Catalog,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Result<Self, ReferenceError> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: Catalog =
            serde_json::from_str(raw).context("Reference catalogue is not valid JSON")?;
        Ok(Self::new(catalog)?)
    }

    /// The catalogue compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference catalogue {}", path.display()))?;
        let store = Self::from_json(&raw)
            .with_context(|| format!("Failed to load reference catalogue {}", path.display()))?;
        info!(
            "Loaded reference catalogue from {} ({} clusters, {} pathways)",
            path.display(),
            store.catalog.clusters.len(),
            store.catalog.pathways.len()
        );
        Ok(store)
    }

    /// The authored cluster for `category`, if the catalogue has one.
    pub fn cluster(&self, category: Category) -> Option<&Cluster> {
        self.catalog.clusters.iter().find(|c| c.category == category)
    }
}

#[async_trait]
impl ReferenceStore for CatalogStore {
    async fn clusters(&self) -> Result<Vec<Cluster>, ReferenceError> {
        Ok(self.catalog.clusters.clone())
    }

    async fn cluster_for(&self, category: Category) -> Result<Option<Cluster>, ReferenceError> {
        Ok(self.cluster(category).cloned())
    }

    async fn pathways_for_cluster(&self, cluster_id: Uuid) -> Result<Vec<Pathway>, ReferenceError> {
        Ok(self
            .catalog
            .pathways
            .iter()
            .filter(|p| p.cluster_id == cluster_id)
            .cloned()
            .collect())
    }

    async fn courses(&self, level: Option<CourseLevel>) -> Result<Vec<Course>, ReferenceError> {
        let mut courses: Vec<Course> = self
            .catalog
            .courses
            .iter()
            .filter(|c| level.map_or(true, |l| c.level == l))
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(courses)
    }

    async fn course(&self, id: Uuid) -> Result<Option<Course>, ReferenceError> {
        Ok(self.catalog.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn colleges(&self) -> Result<Vec<College>, ReferenceError> {
        let mut colleges = self.catalog.colleges.clone();
        colleges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(colleges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_catalog_loads_and_validates() {
        let store = CatalogStore::bundled().unwrap();
        assert_eq!(store.catalog.clusters.len(), 4);
        assert!(!store.catalog.pathways.is_empty());
    }

    #[tokio::test]
    async fn test_bundled_catalog_has_cluster_for_every_reachable_category() {
        let store = CatalogStore::bundled().unwrap();
        for category in Category::REACHABLE {
            let cluster = store.cluster_for(category).await.unwrap();
            assert!(cluster.is_some(), "no cluster for {category}");
        }
        assert!(store
            .cluster_for(Category::Explorer)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_pathways_keep_stored_order() {
        let store = CatalogStore::bundled().unwrap();
        let builder = store
            .cluster_for(Category::Builder)
            .await
            .unwrap()
            .unwrap();
        let names: Vec<_> = store
            .pathways_for_cluster(builder.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Civil Engineering", "Polytechnic Diploma"]);
    }

    #[tokio::test]
    async fn test_pathway_colleges_loaded_and_default_empty() {
        let store = CatalogStore::bundled().unwrap();
        let builder = store.cluster(Category::Builder).unwrap().id;
        let pathways = store.pathways_for_cluster(builder).await.unwrap();
        assert!(pathways[0].colleges.contains(&"NIT Warangal".to_string()));
        assert!(pathways[1].colleges.is_empty());
    }

    #[tokio::test]
    async fn test_courses_filtered_by_level_and_sorted() {
        let store = CatalogStore::bundled().unwrap();
        let all = store.courses(None).await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let post_10th = store.courses(Some(CourseLevel::Post10th)).await.unwrap();
        assert!(!post_10th.is_empty());
        assert!(post_10th.iter().all(|c| c.level == CourseLevel::Post10th));
    }

    #[tokio::test]
    async fn test_course_lookup_by_id() {
        let store = CatalogStore::bundled().unwrap();
        let first = store.courses(None).await.unwrap().remove(0);
        assert_eq!(store.course(first.id).await.unwrap(), Some(first));
        assert_eq!(store.course(Uuid::new_v4()).await.unwrap(), None);
    }

    #[test]
    fn test_pathway_with_unknown_cluster_rejected() {
        let raw = r#"{
            "clusters": [],
            "pathways": [{
                "id": "a1000000-0000-4000-8000-000000000001",
                "cluster_id": "c1000000-0000-4000-8000-000000000009",
                "name": "Orphan",
                "stream": "Arts"
            }]
        }"#;
        let err = CatalogStore::from_json(raw).unwrap_err();
        assert!(format!("{err:#}").contains("unknown cluster"), "{err:#}");
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let raw = r#"{
            "clusters": [
                { "id": "c1000000-0000-4000-8000-000000000001", "category": "builder", "name": "A", "description": "" },
                { "id": "c1000000-0000-4000-8000-000000000002", "category": "builder", "name": "B", "description": "" }
            ]
        }"#;
        assert!(CatalogStore::from_json(raw).is_err());
    }

    #[test]
    fn test_from_path_reads_catalogue_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "clusters": [{{ "id": "c1000000-0000-4000-8000-000000000004", "category": "helper", "name": "The Helper", "description": "Caring" }}] }}"#
        )
        .unwrap();

        let store = CatalogStore::from_path(file.path()).unwrap();
        assert_eq!(store.catalog.clusters.len(), 1);
        assert!(store.catalog.pathways.is_empty());
    }

    #[test]
    fn test_from_path_missing_file_has_context() {
        let err = CatalogStore::from_path(Path::new("/nonexistent/catalogue.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read reference catalogue"));
    }
}
