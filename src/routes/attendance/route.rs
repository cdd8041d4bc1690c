use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    EligibleStudent, EligibleStudentsResponse, RollupWindowParams, SessionResponse,
    StudentRollupResponse, SubmitAttendanceRequest, SubmitAttendanceResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ServiceError;
use crate::extractor::AuthClaims;
use crate::repositories::{AttendanceRepository, RoutineRepository, StudentRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/attendance/submit", post(submit_attendance))
        .route(
            "/api/v1/attendance/routines/{routine_id}/students",
            get(get_eligible_students),
        )
        .route(
            "/api/v1/attendance/sessions/{session_id}/rollup",
            get(get_session_rollup),
        )
        .route(
            "/api/v1/attendance/students/{student_id}/rollup",
            get(get_student_rollup),
        )
}

/// Submit attendance for one (routine, date). Idempotent: re-submitting the
/// same flags leaves the same state.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/submit",
    request_body = SubmitAttendanceRequest,
    responses(
        (status = 200, description = "Attendance saved", body = SubmitAttendanceResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn submit_attendance(
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<SubmitAttendanceRequest>,
) -> Result<(StatusCode, Json<SubmitAttendanceResponse>), ServiceError> {
    if !matches!(claims.role, RoleEnum::Teacher | RoleEnum::Hod) {
        return Err(ServiceError::PermissionDenied);
    }

    let attendance_repo = AttendanceRepository::new();
    let session = attendance_repo
        .submit(
            payload.routine_id,
            claims.sub,
            payload.date,
            payload.teacher_attended,
            payload.class_held,
            &payload.student_flags,
        )
        .await?;

    let (present, total) = attendance_repo.session_rollup(session.session_id).await?;
    let date = session.date;

    Ok((
        StatusCode::OK,
        Json(SubmitAttendanceResponse {
            success: true,
            message: format!("Attendance for {} saved", date.format("%d %b, %Y")),
            session: SessionResponse::from_session(session, present, total),
        }),
    ))
}

/// Eligible students for a routine, in name order. Falls back to the whole
/// course when no student sits at the routine's period.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/routines/{routine_id}/students",
    params(("routine_id" = Uuid, Path, description = "Routine ID")),
    responses(
        (status = 200, description = "Eligible students", body = EligibleStudentsResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_eligible_students(
    AuthClaims(claims): AuthClaims,
    Path(routine_id): Path<Uuid>,
) -> Result<(StatusCode, Json<EligibleStudentsResponse>), ServiceError> {
    let routine = RoutineRepository::new()
        .find_by_id(routine_id)
        .await?
        .ok_or(ServiceError::NotFound("routine"))?;

    // Only the assigned teacher (or admin) may list the roster.
    if claims.role != RoleEnum::Admin && routine.teacher_id != claims.sub {
        return Err(ServiceError::PermissionDenied);
    }

    let students = AttendanceRepository::new().eligible_students(&routine).await?;

    let response = EligibleStudentsResponse {
        total: students.len(),
        students: students
            .into_iter()
            .map(|(profile, principal)| EligibleStudent {
                student_id: profile.student_id.to_string(),
                name: principal.name,
                current_period: profile.current_period,
            })
            .collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Present/total for one session.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/sessions/{session_id}/rollup",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Rollup", body = SessionResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_session_rollup(
    AuthClaims(claims): AuthClaims,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionResponse>), ServiceError> {
    if !matches!(
        claims.role,
        RoleEnum::Teacher | RoleEnum::Hod | RoleEnum::Admin
    ) {
        return Err(ServiceError::PermissionDenied);
    }

    let attendance_repo = AttendanceRepository::new();
    let session = attendance_repo
        .find_session_by_id(session_id)
        .await?
        .ok_or(ServiceError::NotFound("attendance session"))?;
    let (present, total) = attendance_repo.session_rollup(session_id).await?;

    Ok((
        StatusCode::OK,
        Json(SessionResponse::from_session(session, present, total)),
    ))
}

/// Per-student attendance rate over an inclusive window. Students see their
/// own, parents their children's, staff anyone's.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/students/{student_id}/rollup",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("from" = chrono::NaiveDate, Query, description = "Window start"),
        ("to" = chrono::NaiveDate, Query, description = "Window end")
    ),
    responses(
        (status = 200, description = "Rollup", body = StudentRollupResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_student_rollup(
    AuthClaims(claims): AuthClaims,
    Path(student_id): Path<Uuid>,
    Query(window): Query<RollupWindowParams>,
) -> Result<(StatusCode, Json<StudentRollupResponse>), ServiceError> {
    let self_access = claims.role == RoleEnum::Student && claims.sub == student_id;
    let parent_access = claims.role == RoleEnum::Parent
        && StudentRepository::new()
            .is_parent_of(claims.sub, student_id)
            .await?;
    let staff_access = matches!(
        claims.role,
        RoleEnum::Teacher | RoleEnum::Hod | RoleEnum::Admin
    );
    if !(self_access || parent_access || staff_access) {
        return Err(ServiceError::PermissionDenied);
    }

    let (present, total) = AttendanceRepository::new()
        .student_rollup(student_id, window.from, window.to)
        .await?;

    let rate = if total == 0 {
        0.0
    } else {
        present as f64 / total as f64
    };

    Ok((
        StatusCode::OK,
        Json(StudentRollupResponse {
            student_id: student_id.to_string(),
            from: window.from,
            to: window.to,
            present,
            total,
            rate,
        }),
    ))
}
