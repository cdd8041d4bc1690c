use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::course;
use crate::entities::sea_orm_active_enums::DurationUnit;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub name: String,
    pub code: Option<String>,
    pub duration: i32,
    pub duration_unit: DurationUnit,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub code: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub course_id: String,
    pub name: String,
    pub code: Option<String>,
    pub duration: i32,
    pub duration_unit: DurationUnit,
    pub max_period: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        let max_period = model.max_period();
        Self {
            course_id: model.course_id.to_string(),
            name: model.name,
            code: model.code,
            duration: model.duration,
            duration_unit: model.duration_unit,
            max_period,
            description: model.description,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseListResponse {
    pub total: usize,
    pub courses: Vec<CourseResponse>,
}
