//! Create `project` table with FKs to `user`.
//!
//! `created_by` is the owning client, immutable after creation;
//! `assigned_to` stays null until a bid is accepted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(uuid(Project::Id).primary_key())
                    .col(string_len(Project::Title, 100).not_null())
                    .col(string_len(Project::Description, 1000).not_null())
                    .col(json_binary(Project::TechStack).not_null())
                    .col(double(Project::EstimatedBudget).not_null())
                    .col(string_len(Project::Status, 32).not_null())
                    .col(uuid(Project::CreatedBy).not_null())
                    .col(
                        ColumnDef::new(Project::AssignedTo)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Project::Deadline)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Project::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Project::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_created_by")
                            .from(Project::Table, Project::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_assigned_to")
                            .from(Project::Table, Project::AssignedTo)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Project::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
    Title,
    Description,
    TechStack,
    EstimatedBudget,
    Status,
    CreatedBy,
    AssignedTo,
    Deadline,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
