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
                    .as_enum(ProgressStatus::Table)
                    .values([
                        ProgressStatus::InProgress,
                        ProgressStatus::Completed,
                        ProgressStatus::Dropped,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseTracking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTracking::TrackingId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(CourseTracking::StudentId).uuid().not_null())
                    .col(ColumnDef::new(CourseTracking::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseTracking::EnrollmentDate).date().not_null())
                    .col(ColumnDef::new(CourseTracking::StartDate).date().not_null())
                    .col(ColumnDef::new(CourseTracking::ExpectedEndDate).date().not_null())
                    .col(ColumnDef::new(CourseTracking::ActualEndDate).date().null())
                    .col(
                        ColumnDef::new(CourseTracking::CurrentPeriod)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(CourseTracking::PeriodStartDate).date().not_null())
                    .col(ColumnDef::new(CourseTracking::PeriodEndDate).date().not_null())
                    .col(
                        ColumnDef::new(CourseTracking::CompletionPercentage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseTracking::ProgressStatus)
                            .enumeration(
                                ProgressStatus::Table,
                                [
                                    ProgressStatus::InProgress,
                                    ProgressStatus::Completed,
                                    ProgressStatus::Dropped,
                                ],
                            )
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(ColumnDef::new(CourseTracking::Notes).text().null())
                    .col(
                        ColumnDef::new(CourseTracking::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(CourseTracking::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tracking_student")
                            .from_tbl(CourseTracking::Table)
                            .from_col(CourseTracking::StudentId)
                            .to_tbl(StudentProfile::Table)
                            .to_col(StudentProfile::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tracking_course")
                            .from_tbl(CourseTracking::Table)
                            .from_col(CourseTracking::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_course_tracking_student_course")
                    .table(CourseTracking::Table)
                    .col(CourseTracking::StudentId)
                    .col(CourseTracking::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_tracking_student_status")
                    .table(CourseTracking::Table)
                    .col(CourseTracking::StudentId)
                    .col(CourseTracking::ProgressStatus)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseTracking::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(ProgressStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseTracking {
    Table,
    TrackingId,
    StudentId,
    CourseId,
    EnrollmentDate,
    StartDate,
    ExpectedEndDate,
    ActualEndDate,
    CurrentPeriod,
    PeriodStartDate,
    PeriodEndDate,
    CompletionPercentage,
    ProgressStatus,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfile {
    Table,
    StudentId,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
}

#[derive(DeriveIden)]
enum ProgressStatus {
    Table,
    InProgress,
    Completed,
    Dropped,
}
