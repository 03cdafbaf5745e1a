// Read-only reference data: clusters, pathways, courses, colleges.
// `ReferenceStore` is the seam; the catalogue backend serves bundled or
// file-based JSON, the Postgres backend reads the content tables.

pub mod catalog;
pub mod handlers;
pub mod models;
pub mod pathways;
pub mod postgres;
pub mod resolver;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::quiz::Category;
use models::{Cluster, College, Course, CourseLevel, Pathway};

#[derive(Debug, Error)]
pub enum ReferenceError {
    /// A lookup the caller expected to succeed found nothing. Signals a
    /// content/question-bank mismatch or stale client state.
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid reference data: {0}")]
    Invalid(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only queries against the reference collections.
///
/// Carried in `AppState` as `Arc<dyn ReferenceStore>`. Ordering contracts:
/// clusters and pathways come back in stored (insertion) order; courses and
/// colleges are sorted by name.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn clusters(&self) -> Result<Vec<Cluster>, ReferenceError>;

    async fn cluster_for(&self, category: Category) -> Result<Option<Cluster>, ReferenceError>;

    async fn pathways_for_cluster(&self, cluster_id: Uuid) -> Result<Vec<Pathway>, ReferenceError>;

    async fn courses(&self, level: Option<CourseLevel>) -> Result<Vec<Course>, ReferenceError>;

    async fn course(&self, id: Uuid) -> Result<Option<Course>, ReferenceError>;

    async fn colleges(&self) -> Result<Vec<College>, ReferenceError>;
}
