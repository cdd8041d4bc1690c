use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::subject;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSubjectRequest {
    pub course_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub period_index: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectResponse {
    pub subject_id: String,
    pub course_id: String,
    pub name: String,
    pub code: Option<String>,
    pub period_index: i32,
    pub syllabus_path: Option<String>,
}

impl From<subject::Model> for SubjectResponse {
    fn from(model: subject::Model) -> Self {
        Self {
            subject_id: model.subject_id.to_string(),
            course_id: model.course_id.to_string(),
            name: model.name,
            code: model.code,
            period_index: model.period_index,
            syllabus_path: model.syllabus_path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectListResponse {
    pub total: usize,
    pub subjects: Vec<SubjectResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubjectQueryParams {
    pub period_index: Option<i32>,
}
