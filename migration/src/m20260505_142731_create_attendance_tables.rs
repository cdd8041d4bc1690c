use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttendanceSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceSession::SessionId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(AttendanceSession::RoutineId).uuid().not_null())
                    .col(ColumnDef::new(AttendanceSession::Date).date().not_null())
                    .col(ColumnDef::new(AttendanceSession::TeacherId).uuid().not_null())
                    .col(
                        ColumnDef::new(AttendanceSession::TeacherAttended)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AttendanceSession::ClassHeld)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AttendanceSession::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(AttendanceSession::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_session_routine")
                            .from_tbl(AttendanceSession::Table)
                            .from_col(AttendanceSession::RoutineId)
                            .to_tbl(Routine::Table)
                            .to_col(Routine::RoutineId)
                            // Routines with history must be deactivated, not
                            // deleted.
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_session_teacher")
                            .from_tbl(AttendanceSession::Table)
                            .from_col(AttendanceSession::TeacherId)
                            .to_tbl(StaffProfile::Table)
                            .to_col(StaffProfile::StaffId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Session upserts collapse on this key.
        manager
            .create_index(
                Index::create()
                    .name("uniq_attendance_session_routine_date")
                    .table(AttendanceSession::Table)
                    .col(AttendanceSession::RoutineId)
                    .col(AttendanceSession::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_session_teacher_date")
                    .table(AttendanceSession::Table)
                    .col(AttendanceSession::TeacherId)
                    .col(AttendanceSession::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecord::RecordId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(AttendanceRecord::SessionId).uuid().not_null())
                    .col(ColumnDef::new(AttendanceRecord::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecord::Present)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_record_session")
                            .from_tbl(AttendanceRecord::Table)
                            .from_col(AttendanceRecord::SessionId)
                            .to_tbl(AttendanceSession::Table)
                            .to_col(AttendanceSession::SessionId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_record_student")
                            .from_tbl(AttendanceRecord::Table)
                            .from_col(AttendanceRecord::StudentId)
                            .to_tbl(StudentProfile::Table)
                            .to_col(StudentProfile::StudentId)
                            // Students with attendance history cannot be
                            // deleted.
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_attendance_record_session_student")
                    .table(AttendanceRecord::Table)
                    .col(AttendanceRecord::SessionId)
                    .col(AttendanceRecord::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_record_student")
                    .table(AttendanceRecord::Table)
                    .col(AttendanceRecord::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceRecord::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceSession::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AttendanceSession {
    Table,
    SessionId,
    RoutineId,
    Date,
    TeacherId,
    TeacherAttended,
    ClassHeld,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecord {
    Table,
    RecordId,
    SessionId,
    StudentId,
    Present,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Routine {
    Table,
    RoutineId,
}

#[derive(DeriveIden)]
enum StaffProfile {
    Table,
    StaffId,
}

#[derive(DeriveIden)]
enum StudentProfile {
    Table,
    StudentId,
}
