pub mod sea_orm_active_enums;

pub mod attendance_record;
pub mod attendance_session;
pub mod batch;
pub mod course;
pub mod course_tracking;
pub mod device_token;
pub mod feedback;
pub mod institute;
pub mod leave_request;
pub mod meeting;
pub mod notice;
pub mod otp_secret;
pub mod parent_profile;
pub mod parent_student;
pub mod principal;
pub mod reset_token;
pub mod routine;
pub mod staff_profile;
pub mod student_batch;
pub mod student_profile;
pub mod subject;
