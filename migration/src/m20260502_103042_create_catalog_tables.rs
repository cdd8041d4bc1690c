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
                    .as_enum(DurationUnit::Table)
                    .values([DurationUnit::Year, DurationUnit::Semester])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Institute::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Institute::InstituteId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Institute::Name).string().not_null())
                    .col(ColumnDef::new(Institute::Phone).string().null())
                    .col(ColumnDef::new(Institute::Email).string().null())
                    .col(ColumnDef::new(Institute::Address).string().null())
                    .col(ColumnDef::new(Institute::PanNo).string().null())
                    .col(ColumnDef::new(Institute::RegNo).string().null())
                    .col(ColumnDef::new(Institute::Description).text().null())
                    .col(
                        ColumnDef::new(Institute::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Batch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batch::BatchId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Batch::Name).string().not_null())
                    .col(ColumnDef::new(Batch::Year).date().null())
                    .col(
                        ColumnDef::new(Batch::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Batch::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::CourseId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Course::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Course::Code).string().null())
                    .col(ColumnDef::new(Course::Duration).integer().not_null())
                    .col(
                        ColumnDef::new(Course::DurationUnit)
                            .enumeration(
                                DurationUnit::Table,
                                [DurationUnit::Year, DurationUnit::Semester],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Course::Description).text().null())
                    .col(
                        ColumnDef::new(Course::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Course::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::SubjectId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Subject::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Subject::Name).string().not_null())
                    .col(ColumnDef::new(Subject::Code).string().null())
                    .col(ColumnDef::new(Subject::PeriodIndex).integer().not_null())
                    .col(ColumnDef::new(Subject::SyllabusPath).string().null())
                    .col(
                        ColumnDef::new(Subject::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Subject::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_course")
                            .from_tbl(Subject::Table)
                            .from_col(Subject::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One subject name per (course, period).
        manager
            .create_index(
                Index::create()
                    .name("uniq_subject_course_name_period")
                    .table(Subject::Table)
                    .col(Subject::CourseId)
                    .col(Subject::Name)
                    .col(Subject::PeriodIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_subject_course_name_period")
                    .table(Subject::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Batch::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Institute::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(DurationUnit::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Institute {
    Table,
    InstituteId,
    Name,
    Phone,
    Email,
    Address,
    PanNo,
    RegNo,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Batch {
    Table,
    BatchId,
    Name,
    Year,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
    Name,
    Code,
    Duration,
    DurationUnit,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
    CourseId,
    Name,
    Code,
    PeriodIndex,
    SyllabusPath,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DurationUnit {
    Table,
    Year,
    Semester,
}
