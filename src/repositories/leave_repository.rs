use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::leave_request;
use crate::entities::sea_orm_active_enums::{LeaveKind, LeaveStatus, RoleEnum};
use crate::error::ServiceError;
use crate::static_service::DATABASE_CONNECTION;

/// Student leave is decided by the HOD, staff leave by the admin.
pub fn can_decide(kind: LeaveKind, actor_role: RoleEnum) -> bool {
    match kind {
        LeaveKind::Student => matches!(actor_role, RoleEnum::Hod),
        LeaveKind::Staff => matches!(actor_role, RoleEnum::Admin),
    }
}

pub struct LeaveRepository;

impl LeaveRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, leave_id: Uuid) -> Result<Option<leave_request::Model>> {
        let db = self.get_connection();
        let leave = leave_request::Entity::find_by_id(leave_id).one(db).await?;
        Ok(leave)
    }

    pub async fn submit(
        &self,
        kind: LeaveKind,
        principal_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        message: String,
    ) -> Result<leave_request::Model, ServiceError> {
        if end_date < start_date {
            return Err(ServiceError::Validation(
                "leave end date cannot be before the start date".to_string(),
            ));
        }
        if message.trim().is_empty() {
            return Err(ServiceError::Validation(
                "leave message is required".to_string(),
            ));
        }

        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let model = leave_request::ActiveModel {
            leave_id: Set(Uuid::new_v4()),
            kind: Set(kind),
            principal_id: Set(principal_id),
            start_date: Set(start_date),
            end_date: Set(end_date),
            message: Set(message),
            status: Set(LeaveStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    /// Approve or reject. Transitions are only allowed out of pending, and
    /// only by the deciding role for the leave kind. Approvals have no side
    /// effects on attendance.
    pub async fn decide(
        &self,
        leave_id: Uuid,
        actor_role: RoleEnum,
        approve: bool,
    ) -> Result<leave_request::Model, ServiceError> {
        let db = self.get_connection();
        let leave = leave_request::Entity::find_by_id(leave_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("leave request"))?;

        if !can_decide(leave.kind, actor_role) {
            return Err(ServiceError::PermissionDenied);
        }
        if leave.status != LeaveStatus::Pending {
            return Err(ServiceError::InvalidTransition(
                "leave request has already been decided",
            ));
        }

        let mut model: leave_request::ActiveModel = leave.into();
        model.status = Set(if approve {
            LeaveStatus::Approved
        } else {
            LeaveStatus::Rejected
        });
        model.updated_at = Set(Utc::now().naive_utc());

        let result = model.update(db).await.map_err(ServiceError::from)?;
        Ok(result)
    }

    pub async fn find_by_principal(
        &self,
        principal_id: Uuid,
    ) -> Result<Vec<leave_request::Model>> {
        let db = self.get_connection();
        let leaves = leave_request::Entity::find()
            .filter(leave_request::Column::PrincipalId.eq(principal_id))
            .order_by_desc(leave_request::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(leaves)
    }

    pub async fn find_pending(&self, kind: LeaveKind) -> Result<Vec<leave_request::Model>> {
        let db = self.get_connection();
        let leaves = leave_request::Entity::find()
            .filter(leave_request::Column::Kind.eq(kind))
            .filter(leave_request::Column::Status.eq(LeaveStatus::Pending))
            .order_by_desc(leave_request::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hod_decides_student_leave() {
        assert!(can_decide(LeaveKind::Student, RoleEnum::Hod));
        assert!(!can_decide(LeaveKind::Student, RoleEnum::Admin));
        assert!(!can_decide(LeaveKind::Student, RoleEnum::Teacher));
        assert!(!can_decide(LeaveKind::Student, RoleEnum::Student));
    }

    #[test]
    fn only_admin_decides_staff_leave() {
        assert!(can_decide(LeaveKind::Staff, RoleEnum::Admin));
        assert!(!can_decide(LeaveKind::Staff, RoleEnum::Hod));
        assert!(!can_decide(LeaveKind::Staff, RoleEnum::Teacher));
    }
}
