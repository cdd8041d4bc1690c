use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{principal, staff_profile};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateStaffRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: RoleEnum,
    pub designation: Option<String>,
    pub joining_date: Option<NaiveDate>,
    /// Set to make this staff member the HOD of a course.
    pub hod_course_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffResponse {
    pub staff_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: RoleEnum,
    pub designation: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub hod_course_id: Option<String>,
}

impl StaffResponse {
    pub fn from_parts(principal: principal::Model, profile: staff_profile::Model) -> Self {
        Self {
            staff_id: profile.staff_id.to_string(),
            name: principal.name,
            phone: principal.phone,
            email: principal.email,
            role: principal.role,
            designation: profile.designation,
            joining_date: profile.joining_date,
            hod_course_id: profile.hod_course_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffListResponse {
    pub staff: Vec<StaffResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub role: Option<RoleEnum>,
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}
