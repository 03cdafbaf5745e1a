use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::quiz::category::CategoryStyle;
use crate::quiz::Category;
use crate::reference::models::{Cluster, College, Course, CourseLevel, Pathway};
use crate::reference::pathways::{list_for_cluster, select, select_default};
use crate::reference::resolver::resolve;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PathwayQuery {
    pub selected: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct CourseQuery {
    pub level: Option<String>,
}

#[derive(Serialize)]
pub struct ClusterSummary {
    #[serde(flatten)]
    pub cluster: Cluster,
    pub style: CategoryStyle,
}

#[derive(Serialize)]
pub struct ClusterListResponse {
    pub clusters: Vec<ClusterSummary>,
}

#[derive(Serialize)]
pub struct PathwayListResponse {
    pub cluster_id: Uuid,
    pub pathways: Vec<Pathway>,
    /// `None` only when the cluster has no pathways yet.
    pub selected: Option<Pathway>,
}

#[derive(Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
}

#[derive(Serialize)]
pub struct CollegeListResponse {
    pub colleges: Vec<College>,
}

fn parse_category(raw: &str) -> Result<Category, AppError> {
    raw.parse::<Category>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// GET /api/v1/clusters
pub async fn handle_list_clusters(
    State(state): State<AppState>,
) -> Result<Json<ClusterListResponse>, AppError> {
    let clusters = state
        .reference
        .clusters()
        .await?
        .into_iter()
        .map(|cluster| ClusterSummary {
            style: cluster.category.style(),
            cluster,
        })
        .collect();
    Ok(Json(ClusterListResponse { clusters }))
}

/// GET /api/v1/clusters/:category
pub async fn handle_get_cluster(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ClusterSummary>, AppError> {
    let category = parse_category(&category)?;
    let cluster = resolve(state.reference.as_ref(), category).await?;
    Ok(Json(ClusterSummary {
        style: category.style(),
        cluster,
    }))
}

/// GET /api/v1/clusters/:category/pathways?selected=<uuid>
pub async fn handle_cluster_pathways(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<PathwayQuery>,
) -> Result<Json<PathwayListResponse>, AppError> {
    let category = parse_category(&category)?;
    let cluster = resolve(state.reference.as_ref(), category).await?;
    let pathways = list_for_cluster(state.reference.as_ref(), cluster.id).await?;

    let selected = match query.selected {
        Some(id) => Some(select(&pathways, id)?.clone()),
        None => select_default(&pathways).cloned(),
    };

    Ok(Json(PathwayListResponse {
        cluster_id: cluster.id,
        pathways,
        selected,
    }))
}

/// GET /api/v1/courses?level=post_10th|post_12th
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<CourseListResponse>, AppError> {
    let level = match query.level.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(CourseLevel::parse(raw).ok_or_else(|| {
            AppError::Validation(format!(
                "level must be one of post_10th, post_12th (got '{raw}')"
            ))
        })?),
    };
    let courses = state.reference.courses(level).await?;
    Ok(Json(CourseListResponse { courses }))
}

/// GET /api/v1/courses/:id
pub async fn handle_get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    state
        .reference
        .course(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Course {id}")))
}

/// GET /api/v1/colleges
pub async fn handle_list_colleges(
    State(state): State<AppState>,
) -> Result<Json<CollegeListResponse>, AppError> {
    let colleges = state.reference.colleges().await?;
    Ok(Json(CollegeListResponse { colleges }))
}
