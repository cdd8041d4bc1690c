use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::StudentStatus;
use crate::entities::{principal, student_profile};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub course_id: Option<Uuid>,
    pub current_period: Option<i32>,
    pub status: Option<StudentStatus>,
    pub joining_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub temporary_address: Option<String>,
    pub permanent_address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub course_id: Option<Option<Uuid>>,
    pub current_period: Option<i32>,
    pub status: Option<StudentStatus>,
    pub joining_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub course_id: Option<String>,
    pub current_period: i32,
    pub status: StudentStatus,
    pub joining_date: Option<NaiveDate>,
}

impl StudentResponse {
    pub fn from_parts(principal: principal::Model, profile: student_profile::Model) -> Self {
        Self {
            student_id: profile.student_id.to_string(),
            name: principal.name,
            phone: principal.phone,
            email: principal.email,
            course_id: profile.course_id.map(|id| id.to_string()),
            current_period: profile.current_period,
            status: profile.status,
            joining_date: profile.joining_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub course_id: Option<Uuid>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}
