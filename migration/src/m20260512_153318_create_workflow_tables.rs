use crate::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(LeaveKind::Table)
                    .values([LeaveKind::Student, LeaveKind::Staff])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(MeetingStatus::Table)
                    .values([
                        MeetingStatus::Scheduled,
                        MeetingStatus::Rescheduled,
                        MeetingStatus::Completed,
                        MeetingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequest::LeaveId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(
                        ColumnDef::new(LeaveRequest::Kind)
                            .enumeration(LeaveKind::Table, [LeaveKind::Student, LeaveKind::Staff])
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequest::PrincipalId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequest::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequest::EndDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequest::Message).text().not_null())
                    // 0 pending, 1 approved, 2 rejected.
                    .col(
                        ColumnDef::new(LeaveRequest::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeaveRequest::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(LeaveRequest::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_principal")
                            .from_tbl(LeaveRequest::Table)
                            .from_col(LeaveRequest::PrincipalId)
                            .to_tbl(Principal::Table)
                            .to_col(Principal::PrincipalId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leave_request_kind_status")
                    .table(LeaveRequest::Table)
                    .col(LeaveRequest::Kind)
                    .col(LeaveRequest::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Meeting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meeting::MeetingId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Meeting::MeetingDate).date().not_null())
                    .col(ColumnDef::new(Meeting::MeetingTime).time().not_null())
                    .col(
                        ColumnDef::new(Meeting::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(Meeting::Status)
                            .enumeration(
                                MeetingStatus::Table,
                                [
                                    MeetingStatus::Scheduled,
                                    MeetingStatus::Rescheduled,
                                    MeetingStatus::Completed,
                                    MeetingStatus::Cancelled,
                                ],
                            )
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Meeting::Agenda).text().not_null())
                    .col(ColumnDef::new(Meeting::Notes).text().not_null())
                    .col(
                        ColumnDef::new(Meeting::IsOnline)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Meeting::MeetingLink).string().null())
                    .col(ColumnDef::new(Meeting::CancellationReason).text().null())
                    .col(
                        ColumnDef::new(Meeting::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Meeting::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_meeting_date_status")
                    .table(Meeting::Table)
                    .col(Meeting::MeetingDate)
                    .col(Meeting::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meeting::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveRequest::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(MeetingStatus::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(LeaveKind::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LeaveRequest {
    Table,
    LeaveId,
    Kind,
    PrincipalId,
    StartDate,
    EndDate,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Meeting {
    Table,
    MeetingId,
    MeetingDate,
    MeetingTime,
    DurationMinutes,
    Status,
    Agenda,
    Notes,
    IsOnline,
    MeetingLink,
    CancellationReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Principal {
    Table,
    PrincipalId,
}

#[derive(DeriveIden)]
enum LeaveKind {
    Table,
    Student,
    Staff,
}

#[derive(DeriveIden)]
enum MeetingStatus {
    Table,
    Scheduled,
    Rescheduled,
    Completed,
    Cancelled,
}
