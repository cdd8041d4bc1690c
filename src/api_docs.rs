use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::auth::route::login,
        routes::auth::route::logout,
        routes::auth::route::forgot_password,
        routes::auth::route::verify_otp,
        routes::auth::route::reset_password,
        routes::auth::route::change_password,
        routes::courses::route::create_course,
        routes::courses::route::get_all_courses,
        routes::courses::route::get_course,
        routes::courses::route::update_course,
        routes::subjects::route::create_subject,
        routes::subjects::route::get_subject,
        routes::subjects::route::get_course_subjects,
        routes::subjects::route::upload_syllabus,
        routes::subjects::route::delete_subject,
        routes::batches::route::create_batch,
        routes::batches::route::get_all_batches,
        routes::batches::route::assign_student,
        routes::students::route::create_student,
        routes::students::route::get_all_students,
        routes::students::route::get_student,
        routes::students::route::update_student,
        routes::students::route::delete_student,
        routes::staff::route::create_staff,
        routes::staff::route::get_all_staff,
        routes::staff::route::get_staff,
        routes::routines::route::create_routine,
        routes::routines::route::get_my_routines,
        routes::routines::route::get_course_routines,
        routes::routines::route::set_active,
        routes::routines::route::delete_routine,
        routes::attendance::route::submit_attendance,
        routes::attendance::route::get_eligible_students,
        routes::attendance::route::get_session_rollup,
        routes::attendance::route::get_student_rollup,
        routes::tracking::route::get_or_create_tracking,
        routes::tracking::route::get_student_trackings,
        routes::tracking::route::set_period,
        routes::tracking::route::advance_period,
        routes::tracking::route::recompute,
        routes::tracking::route::complete,
        routes::tracking::route::drop_tracking,
        routes::leaves::route::submit_leave,
        routes::leaves::route::get_my_leaves,
        routes::leaves::route::get_pending_leaves,
        routes::leaves::route::approve_leave,
        routes::leaves::route::reject_leave,
        routes::meetings::route::schedule_meeting,
        routes::meetings::route::get_all_meetings,
        routes::meetings::route::reschedule_meeting,
        routes::meetings::route::complete_meeting,
        routes::meetings::route::cancel_meeting,
        routes::feedback::route::submit_teacher_feedback,
        routes::feedback::route::submit_parent_feedback,
        routes::feedback::route::submit_institute_feedback,
        routes::feedback::route::get_teacher_feedback,
        routes::notices::route::create_notice,
        routes::notices::route::get_all_notices,
        routes::notices::route::upload_attachment,
        routes::notices::route::update_notice,
        routes::notices::route::delete_notice,
        routes::devices::route::register_device,
        routes::dashboard::route::student_dashboard,
        routes::dashboard::route::teacher_dashboard,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout and password reset"),
        (name = "Courses", description = "Course catalog"),
        (name = "Subjects", description = "Subjects and syllabus uploads"),
        (name = "Batches", description = "Student batches"),
        (name = "Students", description = "Student enrollment"),
        (name = "Staff", description = "Staff management"),
        (name = "Routines", description = "Class routines"),
        (name = "Attendance", description = "Attendance sessions and rollups"),
        (name = "Course Tracking", description = "Per-student course progress"),
        (name = "Leaves", description = "Leave requests"),
        (name = "Meetings", description = "Parent-teacher meetings"),
        (name = "Feedback", description = "Teacher and institute feedback"),
        (name = "Notices", description = "Notices"),
        (name = "Devices", description = "Push token registry"),
        (name = "Dashboards", description = "Role dashboards"),
    )
)]
pub struct ApiDoc;
