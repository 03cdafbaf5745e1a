//! Cluster Resolver — category → cluster record.

use crate::quiz::Category;
use crate::reference::models::Cluster;
use crate::reference::{ReferenceError, ReferenceStore};

/// Looks up the cluster registered for `category`.
///
/// A missing cluster is surfaced as `NotFound`, never substituted: it means
/// the question bank can produce a category the reference data doesn't cover.
pub async fn resolve(
    store: &dyn ReferenceStore,
    category: Category,
) -> Result<Cluster, ReferenceError> {
    store
        .cluster_for(category)
        .await?
        .ok_or_else(|| ReferenceError::NotFound(format!("Cluster for category '{category}'")))
}
