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
                    .as_enum(RoleEnum::Table)
                    .values([
                        RoleEnum::Student,
                        RoleEnum::Parent,
                        RoleEnum::Teacher,
                        RoleEnum::Hod,
                        RoleEnum::AdmissionOfficer,
                        RoleEnum::Admin,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Principal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Principal::PrincipalId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(
                        ColumnDef::new(Principal::Role)
                            .enumeration(
                                RoleEnum::Table,
                                [
                                    RoleEnum::Student,
                                    RoleEnum::Parent,
                                    RoleEnum::Teacher,
                                    RoleEnum::Hod,
                                    RoleEnum::AdmissionOfficer,
                                    RoleEnum::Admin,
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Principal::Name).string().not_null())
                    .col(
                        ColumnDef::new(Principal::Phone)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Principal::Email).string().null())
                    .col(ColumnDef::new(Principal::Password).string().null())
                    .col(
                        ColumnDef::new(Principal::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Principal::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Principal::UpdatedAt)
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
                    .name("idx_principal_role")
                    .table(Principal::Table)
                    .col(Principal::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_principal_role")
                    .table(Principal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Principal::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RoleEnum::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Principal {
    Table,
    PrincipalId,
    Role,
    Name,
    Phone,
    Email,
    Password,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoleEnum {
    Table,
    Student,
    Parent,
    Teacher,
    Hod,
    AdmissionOfficer,
    Admin,
}
