use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Routine::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Routine::RoutineId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Routine::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Routine::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Routine::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(Routine::StartTime).time().not_null())
                    .col(ColumnDef::new(Routine::EndTime).time().not_null())
                    .col(ColumnDef::new(Routine::PeriodIndex).integer().not_null())
                    .col(
                        ColumnDef::new(Routine::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Routine::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Routine::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routine_course")
                            .from_tbl(Routine::Table)
                            .from_col(Routine::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routine_subject")
                            .from_tbl(Routine::Table)
                            .from_col(Routine::SubjectId)
                            .to_tbl(Subject::Table)
                            .to_col(Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routine_teacher")
                            .from_tbl(Routine::Table)
                            .from_col(Routine::TeacherId)
                            .to_tbl(StaffProfile::Table)
                            .to_col(StaffProfile::StaffId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_routine_teacher")
                    .table(Routine::Table)
                    .col(Routine::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_routine_course_period")
                    .table(Routine::Table)
                    .col(Routine::CourseId)
                    .col(Routine::PeriodIndex)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_routine_course_period")
                    .table(Routine::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_routine_teacher")
                    .table(Routine::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Routine::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Routine {
    Table,
    RoutineId,
    CourseId,
    SubjectId,
    TeacherId,
    StartTime,
    EndTime,
    PeriodIndex,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
}

#[derive(DeriveIden)]
enum StaffProfile {
    Table,
    StaffId,
}
