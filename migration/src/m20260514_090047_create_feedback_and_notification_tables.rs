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
                    .as_enum(FeedbackTarget::Table)
                    .values([FeedbackTarget::Teacher, FeedbackTarget::Institute])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(FeedbackType::Table)
                    .values([
                        FeedbackType::General,
                        FeedbackType::Facilities,
                        FeedbackType::Teaching,
                        FeedbackType::Infrastructure,
                        FeedbackType::Administration,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(DeviceUserType::Table)
                    .values([
                        DeviceUserType::Student,
                        DeviceUserType::Parent,
                        DeviceUserType::Teacher,
                        DeviceUserType::Admin,
                        DeviceUserType::Unknown,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::FeedbackId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Feedback::ActorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Feedback::TargetKind)
                            .enumeration(
                                FeedbackTarget::Table,
                                [FeedbackTarget::Teacher, FeedbackTarget::Institute],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Feedback::TeacherId).uuid().null())
                    .col(ColumnDef::new(Feedback::InstituteId).uuid().null())
                    .col(ColumnDef::new(Feedback::StudentId).uuid().null())
                    .col(
                        ColumnDef::new(Feedback::FeedbackType)
                            .enumeration(
                                FeedbackType::Table,
                                [
                                    FeedbackType::General,
                                    FeedbackType::Facilities,
                                    FeedbackType::Teaching,
                                    FeedbackType::Infrastructure,
                                    FeedbackType::Administration,
                                ],
                            )
                            .not_null()
                            .default("general"),
                    )
                    // Half-star steps: 1..=10.
                    .col(ColumnDef::new(Feedback::RatingHalfSteps).integer().not_null())
                    .col(ColumnDef::new(Feedback::FeedbackText).text().not_null())
                    .col(
                        ColumnDef::new(Feedback::IsAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Feedback::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_actor")
                            .from_tbl(Feedback::Table)
                            .from_col(Feedback::ActorId)
                            .to_tbl(Principal::Table)
                            .to_col(Principal::PrincipalId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per upsert key; NULLs must compare equal for the key to
        // hold across the three feedback shapes.
        manager
            .create_index(
                Index::create()
                    .name("uniq_feedback_upsert_key")
                    .table(Feedback::Table)
                    .col(Feedback::ActorId)
                    .col(Feedback::TargetKind)
                    .col(Feedback::TeacherId)
                    .col(Feedback::InstituteId)
                    .col(Feedback::StudentId)
                    .col(Feedback::FeedbackType)
                    .unique()
                    .nulls_not_distinct()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notice::NoticeId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Notice::Title).string().not_null())
                    .col(ColumnDef::new(Notice::Message).text().null())
                    .col(ColumnDef::new(Notice::ImagePath).string().null())
                    .col(ColumnDef::new(Notice::AttachmentPath).string().null())
                    .col(
                        ColumnDef::new(Notice::CreatedAt)
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
                    .table(OtpSecret::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtpSecret::OtpId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(OtpSecret::Identifier).string().not_null())
                    .col(ColumnDef::new(OtpSecret::Secret).string().not_null())
                    .col(
                        ColumnDef::new(OtpSecret::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(ColumnDef::new(OtpSecret::ExpiresAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_otp_secret_identifier")
                    .table(OtpSecret::Table)
                    .col(OtpSecret::Identifier)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_otp_secret_expires_at")
                    .table(OtpSecret::Table)
                    .col(OtpSecret::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ResetToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResetToken::TokenId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(
                        ColumnDef::new(ResetToken::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ResetToken::Identifier).string().not_null())
                    .col(
                        ColumnDef::new(ResetToken::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(ColumnDef::new(ResetToken::ExpiresAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reset_token_expires_at")
                    .table(ResetToken::Table)
                    .col(ResetToken::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeviceToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceToken::DeviceId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(DeviceToken::Token).text().not_null().unique_key())
                    .col(ColumnDef::new(DeviceToken::PrincipalId).uuid().null())
                    .col(
                        ColumnDef::new(DeviceToken::UserType)
                            .enumeration(
                                DeviceUserType::Table,
                                [
                                    DeviceUserType::Student,
                                    DeviceUserType::Parent,
                                    DeviceUserType::Teacher,
                                    DeviceUserType::Admin,
                                    DeviceUserType::Unknown,
                                ],
                            )
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(DeviceToken::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DeviceToken::IsFallback)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DeviceToken::LastActive)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(DeviceToken::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_token_principal")
                            .from_tbl(DeviceToken::Table)
                            .from_col(DeviceToken::PrincipalId)
                            .to_tbl(Principal::Table)
                            .to_col(Principal::PrincipalId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_device_token_active_type")
                    .table(DeviceToken::Table)
                    .col(DeviceToken::IsActive)
                    .col(DeviceToken::UserType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeviceToken::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResetToken::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OtpSecret::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notice::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(DeviceUserType::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(FeedbackType::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(FeedbackTarget::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    FeedbackId,
    ActorId,
    TargetKind,
    TeacherId,
    InstituteId,
    StudentId,
    FeedbackType,
    RatingHalfSteps,
    FeedbackText,
    IsAnonymous,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notice {
    Table,
    NoticeId,
    Title,
    Message,
    ImagePath,
    AttachmentPath,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OtpSecret {
    Table,
    OtpId,
    Identifier,
    Secret,
    CreatedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum ResetToken {
    Table,
    TokenId,
    Token,
    Identifier,
    CreatedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum DeviceToken {
    Table,
    DeviceId,
    Token,
    PrincipalId,
    UserType,
    IsActive,
    IsFallback,
    LastActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Principal {
    Table,
    PrincipalId,
}

#[derive(DeriveIden)]
enum FeedbackTarget {
    Table,
    Teacher,
    Institute,
}

#[derive(DeriveIden)]
enum FeedbackType {
    Table,
    General,
    Facilities,
    Teaching,
    Infrastructure,
    Administration,
}

#[derive(DeriveIden)]
enum DeviceUserType {
    Table,
    Student,
    Parent,
    Teacher,
    Admin,
    Unknown,
}
