//! Typed reference records. Every JSON-ish field of the backing store is
//! decoded into one of these at the store boundary; nothing downstream
//! inspects raw `serde_json::Value` shapes except the opaque fee/contact maps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::quiz::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: Uuid,
    pub category: Category,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub streams: Vec<String>,
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default)]
    pub colleges: Vec<String>,
}

/// Salary band, hiring companies and skills for one job or study track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub companies: String,
    #[serde(default)]
    pub skills: String,
}

/// Title → detail, in the order the content authors wrote them.
pub type JobCategory = IndexMap<String, JobDetail>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub step: u32,
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub id: Uuid,
    pub cluster_id: Uuid,
    pub name: String,
    pub stream: String,
    #[serde(default)]
    pub degree_program: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub immediate_jobs: JobCategory,
    #[serde(default)]
    pub higher_studies: JobCategory,
    #[serde(default)]
    pub govt_jobs: JobCategory,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
    /// Colleges offering this pathway.
    #[serde(default)]
    pub colleges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    #[serde(rename = "post_10th")]
    Post10th,
    #[serde(rename = "post_12th")]
    Post12th,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Post10th => "post_10th",
            CourseLevel::Post12th => "post_12th",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "post_10th" => Some(CourseLevel::Post10th),
            "post_12th" => Some(CourseLevel::Post12th),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseLevel::Post10th => "After 10th",
            CourseLevel::Post12th => "After 12th",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStage {
    pub stage: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level: CourseLevel,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub course_type: Option<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub entrance_exams: Vec<String>,
    #[serde(default)]
    pub career_paths: Vec<String>,
    #[serde(default)]
    pub job_opportunities: Vec<String>,
    #[serde(default)]
    pub roadmap_stages: Vec<RoadmapStage>,
    #[serde(default)]
    pub colleges_offering: Vec<String>,
    #[serde(default)]
    pub fees_range: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub college_type: Option<String>,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub fees: Map<String, Value>,
    #[serde(default)]
    pub contact_info: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_level_wire_names() {
        assert_eq!(
            serde_json::to_value(CourseLevel::Post10th).unwrap(),
            json!("post_10th")
        );
        assert_eq!(CourseLevel::parse("post_12th"), Some(CourseLevel::Post12th));
        assert_eq!(CourseLevel::parse("post_graduate"), None);
        assert_eq!(CourseLevel::Post12th.label(), "After 12th");
    }

    #[test]
    fn test_pathway_job_maps_keep_authored_order() {
        let pathway: Pathway = serde_json::from_value(json!({
            "id": "a1000000-0000-4000-8000-000000000099",
            "cluster_id": "c1000000-0000-4000-8000-000000000001",
            "name": "Test",
            "stream": "Science",
            "immediate_jobs": {
                "Zeta Role": { "salary": "1", "companies": "Z", "skills": "z" },
                "Alpha Role": { "salary": "2", "companies": "A", "skills": "a" }
            }
        }))
        .unwrap();
        let titles: Vec<_> = pathway.immediate_jobs.keys().cloned().collect();
        assert_eq!(titles, vec!["Zeta Role", "Alpha Role"]);
        assert!(pathway.roadmap.is_empty());
        assert!(pathway.govt_jobs.is_empty());
    }

    #[test]
    fn test_college_type_field_renamed() {
        let college: College = serde_json::from_value(json!({
            "id": "d1000000-0000-4000-8000-000000000099",
            "name": "Govt. Polytechnic",
            "type": "government"
        }))
        .unwrap();
        assert_eq!(college.college_type.as_deref(), Some("government"));
        assert!(college.fees.is_empty());
    }
}
