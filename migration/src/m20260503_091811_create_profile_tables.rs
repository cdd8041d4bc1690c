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
                    .as_enum(StudentStatus::Table)
                    .values([
                        StudentStatus::Active,
                        StudentStatus::Leave,
                        StudentStatus::Completed,
                        StudentStatus::Dropped,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfile::StudentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentProfile::CourseId).uuid().null())
                    .col(
                        ColumnDef::new(StudentProfile::CurrentPeriod)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(StudentProfile::Status)
                            .enumeration(
                                StudentStatus::Table,
                                [
                                    StudentStatus::Active,
                                    StudentStatus::Leave,
                                    StudentStatus::Completed,
                                    StudentStatus::Dropped,
                                ],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(StudentProfile::JoiningDate).date().null())
                    .col(ColumnDef::new(StudentProfile::Gender).string().null())
                    .col(ColumnDef::new(StudentProfile::BirthDate).date().null())
                    .col(ColumnDef::new(StudentProfile::TemporaryAddress).string().null())
                    .col(ColumnDef::new(StudentProfile::PermanentAddress).string().null())
                    .col(ColumnDef::new(StudentProfile::ParentName).string().null())
                    .col(ColumnDef::new(StudentProfile::ParentPhone).string().null())
                    .col(ColumnDef::new(StudentProfile::ImagePath).string().null())
                    .col(
                        ColumnDef::new(StudentProfile::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(StudentProfile::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profile_principal")
                            .from_tbl(StudentProfile::Table)
                            .from_col(StudentProfile::StudentId)
                            .to_tbl(Principal::Table)
                            .to_col(Principal::PrincipalId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profile_course")
                            .from_tbl(StudentProfile::Table)
                            .from_col(StudentProfile::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The eligibility query filters on (course, period, status).
        manager
            .create_index(
                Index::create()
                    .name("idx_student_profile_course_period_status")
                    .table(StudentProfile::Table)
                    .col(StudentProfile::CourseId)
                    .col(StudentProfile::CurrentPeriod)
                    .col(StudentProfile::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffProfile::StaffId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffProfile::Designation).string().null())
                    .col(ColumnDef::new(StaffProfile::JoiningDate).date().null())
                    .col(ColumnDef::new(StaffProfile::HodCourseId).uuid().null())
                    .col(ColumnDef::new(StaffProfile::Gender).string().null())
                    .col(ColumnDef::new(StaffProfile::BirthDate).date().null())
                    .col(ColumnDef::new(StaffProfile::TemporaryAddress).string().null())
                    .col(ColumnDef::new(StaffProfile::PermanentAddress).string().null())
                    .col(ColumnDef::new(StaffProfile::ImagePath).string().null())
                    .col(
                        ColumnDef::new(StaffProfile::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(StaffProfile::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_profile_principal")
                            .from_tbl(StaffProfile::Table)
                            .from_col(StaffProfile::StaffId)
                            .to_tbl(Principal::Table)
                            .to_col(Principal::PrincipalId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_profile_hod_course")
                            .from_tbl(StaffProfile::Table)
                            .from_col(StaffProfile::HodCourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParentProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentProfile::ParentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParentProfile::Address).string().null())
                    .col(ColumnDef::new(ParentProfile::ImagePath).string().null())
                    .col(
                        ColumnDef::new(ParentProfile::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(ParentProfile::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_profile_principal")
                            .from_tbl(ParentProfile::Table)
                            .from_col(ParentProfile::ParentId)
                            .to_tbl(Principal::Table)
                            .to_col(Principal::PrincipalId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParentStudent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentStudent::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(ParentStudent::ParentId).uuid().not_null())
                    .col(ColumnDef::new(ParentStudent::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(ParentStudent::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_student_parent")
                            .from_tbl(ParentStudent::Table)
                            .from_col(ParentStudent::ParentId)
                            .to_tbl(ParentProfile::Table)
                            .to_col(ParentProfile::ParentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_student_student")
                            .from_tbl(ParentStudent::Table)
                            .from_col(ParentStudent::StudentId)
                            .to_tbl(StudentProfile::Table)
                            .to_col(StudentProfile::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_parent_student")
                    .table(ParentStudent::Table)
                    .col(ParentStudent::ParentId)
                    .col(ParentStudent::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentBatch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentBatch::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(StudentBatch::StudentId).uuid().not_null())
                    .col(ColumnDef::new(StudentBatch::BatchId).uuid().not_null())
                    .col(
                        ColumnDef::new(StudentBatch::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_batch_student")
                            .from_tbl(StudentBatch::Table)
                            .from_col(StudentBatch::StudentId)
                            .to_tbl(StudentProfile::Table)
                            .to_col(StudentProfile::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_batch_batch")
                            .from_tbl(StudentBatch::Table)
                            .from_col(StudentBatch::BatchId)
                            .to_tbl(Batch::Table)
                            .to_col(Batch::BatchId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_student_batch")
                    .table(StudentBatch::Table)
                    .col(StudentBatch::StudentId)
                    .col(StudentBatch::BatchId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentBatch::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParentStudent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParentProfile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffProfile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfile::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(StudentStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Principal {
    Table,
    PrincipalId,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
}

#[derive(DeriveIden)]
enum Batch {
    Table,
    BatchId,
}

#[derive(DeriveIden)]
enum StudentProfile {
    Table,
    StudentId,
    CourseId,
    CurrentPeriod,
    Status,
    JoiningDate,
    Gender,
    BirthDate,
    TemporaryAddress,
    PermanentAddress,
    ParentName,
    ParentPhone,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StaffProfile {
    Table,
    StaffId,
    Designation,
    JoiningDate,
    HodCourseId,
    Gender,
    BirthDate,
    TemporaryAddress,
    PermanentAddress,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ParentProfile {
    Table,
    ParentId,
    Address,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ParentStudent {
    Table,
    Id,
    ParentId,
    StudentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentBatch {
    Table,
    Id,
    StudentId,
    BatchId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentStatus {
    Table,
    Active,
    Leave,
    Completed,
    Dropped,
}
