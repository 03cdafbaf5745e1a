//! Pathway Selector — the pathways shown for a cluster, and which one is open.

use uuid::Uuid;

use crate::reference::models::Pathway;
use crate::reference::{ReferenceError, ReferenceStore};

/// All pathways owned by `cluster_id`, in stored order. Empty is a normal
/// outcome for clusters whose content hasn't been written yet.
pub async fn list_for_cluster(
    store: &dyn ReferenceStore,
    cluster_id: Uuid,
) -> Result<Vec<Pathway>, ReferenceError> {
    store.pathways_for_cluster(cluster_id).await
}

/// First pathway, or `None` when the list is empty ("coming soon").
pub fn select_default(pathways: &[Pathway]) -> Option<&Pathway> {
    pathways.first()
}

/// Explicit switch to `pathway_id`. An id that isn't in the current list
/// (e.g. left over from a previous cluster) is `NotFound`.
pub fn select(pathways: &[Pathway], pathway_id: Uuid) -> Result<&Pathway, ReferenceError> {
    pathways
        .iter()
        .find(|p| p.id == pathway_id)
        .ok_or_else(|| ReferenceError::NotFound(format!("Pathway {pathway_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Category;
    use crate::reference::catalog::{Catalog, CatalogStore};
    use crate::reference::models::Cluster;
    use crate::reference::resolver::resolve;

    fn store_with_empty_cluster() -> (CatalogStore, Uuid) {
        let cluster_id = Uuid::new_v4();
        let catalog = Catalog {
            clusters: vec![Cluster {
                id: cluster_id,
                category: Category::Helper,
                name: "The Helper".to_string(),
                description: "Caring".to_string(),
                streams: vec![],
                careers: vec![],
                colleges: vec![],
            }],
            ..Catalog::default()
        };
        (CatalogStore::new(catalog).unwrap(), cluster_id)
    }

    #[tokio::test]
    async fn test_empty_cluster_yields_empty_list_and_no_default() {
        let (store, cluster_id) = store_with_empty_cluster();
        let pathways = list_for_cluster(&store, cluster_id).await.unwrap();
        assert!(pathways.is_empty());
        assert!(select_default(&pathways).is_none());
    }

    #[tokio::test]
    async fn test_default_is_first_stored_pathway() {
        let store = CatalogStore::bundled().unwrap();
        let cluster = resolve(&store, Category::Builder).await.unwrap();
        let pathways = list_for_cluster(&store, cluster.id).await.unwrap();
        assert!(pathways.iter().all(|p| p.cluster_id == cluster.id));
        assert_eq!(select_default(&pathways).unwrap().name, "Civil Engineering");
    }

    #[tokio::test]
    async fn test_select_switches_within_list() {
        let store = CatalogStore::bundled().unwrap();
        let cluster = resolve(&store, Category::Builder).await.unwrap();
        let pathways = list_for_cluster(&store, cluster.id).await.unwrap();
        let second = pathways[1].id;
        assert_eq!(select(&pathways, second).unwrap().id, second);
    }

    #[tokio::test]
    async fn test_select_stale_id_from_other_cluster_is_not_found() {
        let store = CatalogStore::bundled().unwrap();
        let builder = resolve(&store, Category::Builder).await.unwrap();
        let analyst = resolve(&store, Category::Analyst).await.unwrap();
        let builder_pathways = list_for_cluster(&store, builder.id).await.unwrap();
        let analyst_pathways = list_for_cluster(&store, analyst.id).await.unwrap();

        let stale = builder_pathways[0].id;
        assert!(matches!(
            select(&analyst_pathways, stale),
            Err(ReferenceError::NotFound(_))
        ));
    }
}
