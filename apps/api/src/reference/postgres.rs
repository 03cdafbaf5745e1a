//! PostgreSQL-backed reference store.
//!
//! Reads the content tables maintained by the content team:
//!
//! - `career_clusters (id, name, description, streams text[], icon, color, created_at)`
//! - `career_pathways (id, cluster_id, pathway_name, stream, degree_program, description, duration,
//!    immediate_jobs jsonb, higher_studies jsonb, govt_jobs jsonb, roadmap_steps jsonb, colleges jsonb, created_at)`
//! - `courses (id, name, description, level, duration, course_type, specializations jsonb, entrance_exams jsonb,
//!    career_paths jsonb, job_opportunities jsonb, roadmap_stages jsonb, colleges_offering jsonb, fees_range jsonb)`
//! - `colleges (id, name, location, type, programs text[], fees jsonb, contact_info jsonb)`
//!
//! Clusters are keyed by `name` ("Builder", "Analyst", ...), which maps onto
//! `Category`. The table carries no careers or colleges; those come from the
//! catalogue the store is built with, as do streams when the column is null.
//! `icon` and `color` are not read: `Category::style()` owns presentation.
//!
//! Read-only: this module issues SELECTs only. JSON columns are decoded into
//! typed records here. Null becomes the empty value; a malformed value is
//! logged and replaced by the empty value so one bad row can't take a whole
//! listing down.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::quiz::Category;
use crate::reference::catalog::CatalogStore;
use crate::reference::models::{Cluster, College, Course, CourseLevel, Pathway};
use crate::reference::{ReferenceError, ReferenceStore};

#[derive(Debug, FromRow)]
struct ClusterRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    streams: Option<Vec<String>>,
}

#[derive(Debug, FromRow)]
struct PathwayRow {
    id: Uuid,
    cluster_id: Uuid,
    pathway_name: String,
    stream: String,
    degree_program: Option<String>,
    description: Option<String>,
    duration: Option<String>,
    immediate_jobs: Option<Value>,
    higher_studies: Option<Value>,
    govt_jobs: Option<Value>,
    roadmap_steps: Option<Value>,
    colleges: Option<Value>,
}

#[derive(Debug, FromRow)]
struct CourseRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    level: String,
    duration: Option<String>,
    course_type: Option<String>,
    specializations: Option<Value>,
    entrance_exams: Option<Value>,
    career_paths: Option<Value>,
    job_opportunities: Option<Value>,
    roadmap_stages: Option<Value>,
    colleges_offering: Option<Value>,
    fees_range: Option<Value>,
}

#[derive(Debug, FromRow)]
struct CollegeRow {
    id: Uuid,
    name: String,
    location: Option<String>,
    #[sqlx(rename = "type")]
    college_type: Option<String>,
    programs: Option<Vec<String>>,
    fees: Option<Value>,
    contact_info: Option<Value>,
}

const CLUSTER_COLUMNS: &str = "id, name, description, streams";

const PATHWAY_COLUMNS: &str = "id, cluster_id, pathway_name, stream, degree_program, description, \
     duration, immediate_jobs, higher_studies, govt_jobs, roadmap_steps, colleges";

const COURSE_COLUMNS: &str = "id, name, description, level, duration, course_type, specializations, \
     entrance_exams, career_paths, job_opportunities, roadmap_stages, colleges_offering, fees_range";

#[derive(Clone)]
pub struct PgReferenceStore {
    pool: PgPool,
    /// Source of the per-cluster careers and colleges lists.
    content: CatalogStore,
}

impl PgReferenceStore {
    pub fn new(pool: PgPool, content: CatalogStore) -> Self {
        Self { pool, content }
    }

    pub async fn connect(database_url: &str, content: CatalogStore) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL reference store...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool, content))
    }
}

#[async_trait]
impl ReferenceStore for PgReferenceStore {
    async fn clusters(&self) -> Result<Vec<Cluster>, ReferenceError> {
        let rows: Vec<ClusterRow> = sqlx::query_as(&format!(
            "SELECT {CLUSTER_COLUMNS} FROM career_clusters ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| cluster_from_row(row, &self.content))
            .collect())
    }

    async fn cluster_for(&self, category: Category) -> Result<Option<Cluster>, ReferenceError> {
        let row: Option<ClusterRow> = sqlx::query_as(&format!(
            "SELECT {CLUSTER_COLUMNS} FROM career_clusters \
             WHERE lower(trim(name)) IN ($1, $2) ORDER BY created_at, id LIMIT 1"
        ))
        .bind(category.as_str())
        .bind(format!("the {}", category.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.and_then(|row| cluster_from_row(row, &self.content)))
    }

    async fn pathways_for_cluster(&self, cluster_id: Uuid) -> Result<Vec<Pathway>, ReferenceError> {
        let rows: Vec<PathwayRow> = sqlx::query_as(&format!(
            "SELECT {PATHWAY_COLUMNS} FROM career_pathways WHERE cluster_id = $1 ORDER BY created_at, id"
        ))
        .bind(cluster_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(pathway_from_row).collect())
    }

    async fn courses(&self, level: Option<CourseLevel>) -> Result<Vec<Course>, ReferenceError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE ($1::text IS NULL OR level = $1) ORDER BY name"
        ))
        .bind(level.map(|l| l.as_str()))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().filter_map(course_from_row).collect())
    }

    async fn course(&self, id: Uuid) -> Result<Option<Course>, ReferenceError> {
        let row: Option<CourseRow> =
            sqlx::query_as(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.and_then(course_from_row))
    }

    async fn colleges(&self) -> Result<Vec<College>, ReferenceError> {
        let rows: Vec<CollegeRow> = sqlx::query_as(
            "SELECT id, name, location, type, programs, fees, contact_info FROM colleges ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(college_from_row).collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row → record conversion
// ────────────────────────────────────────────────────────────────────────────

/// "Builder", "builder" and "The Builder" all name `Category::Builder`.
fn category_from_name(name: &str) -> Option<Category> {
    let trimmed = name.trim();
    let bare = trimmed
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("the "))
        .map_or(trimmed, |_| &trimmed[4..]);
    bare.parse().ok()
}

fn cluster_from_row(row: ClusterRow, content: &CatalogStore) -> Option<Cluster> {
    let Some(category) = category_from_name(&row.name) else {
        warn!("Skipping cluster {}: no category named '{}'", row.id, row.name);
        return None;
    };
    let (streams, careers, colleges) = match content.cluster(category) {
        Some(c) => (c.streams.clone(), c.careers.clone(), c.colleges.clone()),
        None => Default::default(),
    };
    Some(Cluster {
        id: row.id,
        category,
        description: row.description.unwrap_or_default(),
        streams: row.streams.unwrap_or(streams),
        careers,
        colleges,
        name: row.name,
    })
}

fn pathway_from_row(row: PathwayRow) -> Pathway {
    let id = row.id;
    Pathway {
        id,
        cluster_id: row.cluster_id,
        name: row.pathway_name,
        stream: row.stream,
        degree_program: row.degree_program,
        description: row.description.unwrap_or_default(),
        duration: row.duration.unwrap_or_default(),
        immediate_jobs: decode_field(row.immediate_jobs, "immediate_jobs", id),
        higher_studies: decode_field(row.higher_studies, "higher_studies", id),
        govt_jobs: decode_field(row.govt_jobs, "govt_jobs", id),
        roadmap: decode_field(row.roadmap_steps, "roadmap_steps", id),
        colleges: string_list(row.colleges, "colleges", id),
    }
}

fn course_from_row(row: CourseRow) -> Option<Course> {
    let id = row.id;
    let Some(level) = CourseLevel::parse(&row.level) else {
        warn!("Skipping course {id}: unknown level '{}'", row.level);
        return None;
    };
    Some(Course {
        id,
        name: row.name,
        description: row.description.unwrap_or_default(),
        level,
        duration: row.duration.unwrap_or_default(),
        course_type: row.course_type,
        specializations: string_list(row.specializations, "specializations", id),
        entrance_exams: string_list(row.entrance_exams, "entrance_exams", id),
        career_paths: string_list(row.career_paths, "career_paths", id),
        job_opportunities: string_list(row.job_opportunities, "job_opportunities", id),
        roadmap_stages: decode_field(row.roadmap_stages, "roadmap_stages", id),
        colleges_offering: string_list(row.colleges_offering, "colleges_offering", id),
        fees_range: decode_field(row.fees_range, "fees_range", id),
    })
}

fn college_from_row(row: CollegeRow) -> College {
    let id = row.id;
    College {
        id,
        name: row.name,
        location: row.location,
        college_type: row.college_type,
        programs: row.programs.unwrap_or_default(),
        fees: decode_field(row.fees, "fees", id),
        contact_info: decode_field(row.contact_info, "contact_info", id),
    }
}

/// Decodes a JSON column into `T`, treating null as empty and logging (then
/// emptying) anything that doesn't fit the expected shape.
fn decode_field<T: DeserializeOwned + Default>(value: Option<Value>, field: &str, id: Uuid) -> T {
    match value {
        None | Some(Value::Null) => T::default(),
        Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
            warn!("Malformed {field} on record {id}: {e}");
            T::default()
        }),
    }
}

/// JSON array → list of strings. Non-string elements are stringified rather
/// than dropped; a non-array is logged and treated as empty.
fn string_list(value: Option<Value>, field: &str, id: Uuid) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(other) => {
            warn!("Expected array for {field} on record {id}, got {other}");
            Vec::new()
        }
    }
}
