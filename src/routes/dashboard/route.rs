use axum::{Json, Router, http::StatusCode, routing::get};
use chrono::{Days, Local};

use super::dto::{StudentDashboardResponse, TeacherDashboardResponse};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{AttendanceRepository, CourseTrackingRepository};
use crate::routes::attendance::dto::SessionResponse;
use crate::utils::streaks;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/dashboard/student", get(student_dashboard))
        .route("/api/v1/dashboard/teacher", get(teacher_dashboard))
}

/// Progress and attendance summary for the calling student.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/student",
    responses(
        (status = 200, description = "Dashboard", body = StudentDashboardResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
pub async fn student_dashboard(
    AuthClaims(claims): AuthClaims,
) -> Result<(StatusCode, Json<StudentDashboardResponse>), ServiceError> {
    if claims.role != RoleEnum::Student {
        return Err(ServiceError::PermissionDenied);
    }

    let tracking_repo = CourseTrackingRepository::new();
    let tracking = match tracking_repo
        .find_active_by_student(claims.sub)
        .await
        .map_err(ServiceError::Internal)?
    {
        // Readers get a fresh percentage; the reconcile pass is idempotent.
        Some(tracking) => {
            let tracking = tracking_repo.reconcile_period(tracking).await?;
            Some(tracking_repo.recompute_completion(tracking.tracking_id).await?)
        }
        None => None,
    };

    let attendance_repo = AttendanceRepository::new();
    let history = attendance_repo
        .student_record_history(claims.sub)
        .await
        .map_err(ServiceError::Internal)?;

    let today = Local::now().date_naive();
    let current_streak = streaks::current_streak(&history, today);
    let longest_streak = streaks::longest_streak(&history, today);

    let window_start = today - Days::new(30);
    let (present, total) = attendance_repo
        .student_rollup(claims.sub, window_start, today)
        .await
        .map_err(ServiceError::Internal)?;
    let rate = if total == 0 {
        0.0
    } else {
        present as f64 / total as f64
    };

    Ok((
        StatusCode::OK,
        Json(StudentDashboardResponse {
            tracking: tracking.map(Into::into),
            current_streak,
            longest_streak,
            attendance_present: present,
            attendance_total: total,
            attendance_rate: rate,
        }),
    ))
}

/// Today's sessions and present-count for the calling teacher.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/teacher",
    responses(
        (status = 200, description = "Dashboard", body = TeacherDashboardResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboards"
)]
pub async fn teacher_dashboard(
    AuthClaims(claims): AuthClaims,
) -> Result<(StatusCode, Json<TeacherDashboardResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Teacher | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let attendance_repo = AttendanceRepository::new();
    let today = Local::now().date_naive();

    let mut sessions = Vec::new();
    for session in attendance_repo
        .sessions_for_teacher_on(claims.sub, today)
        .await
        .map_err(ServiceError::Internal)?
    {
        let (present, total) = attendance_repo
            .session_rollup(session.session_id)
            .await
            .map_err(ServiceError::Internal)?;
        sessions.push(SessionResponse::from_session(session, present, total));
    }

    let present_today = attendance_repo
        .teacher_present_count_for(claims.sub, today)
        .await
        .map_err(ServiceError::Internal)?;

    Ok((
        StatusCode::OK,
        Json(TeacherDashboardResponse {
            date: today,
            sessions,
            present_today,
        }),
    ))
}
