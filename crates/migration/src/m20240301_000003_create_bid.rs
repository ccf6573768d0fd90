//! Create `bid` table with FKs to `project` and `user`.
//!
//! The composite unique index on (project_id, developer_id) enforces
//! one bid per developer per project at the store level, so concurrent
//! check-then-create cannot slip a duplicate through.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bid::Table)
                    .if_not_exists()
                    .col(uuid(Bid::Id).primary_key())
                    .col(uuid(Bid::ProjectId).not_null())
                    .col(uuid(Bid::DeveloperId).not_null())
                    .col(double(Bid::BidAmount).not_null())
                    .col(string_len(Bid::Message, 500).not_null())
                    .col(string_len(Bid::Status, 32).not_null())
                    .col(
                        ColumnDef::new(Bid::EstimatedDelivery)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Bid::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Bid::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bid_project")
                            .from(Bid::Table, Bid::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bid_developer")
                            .from(Bid::Table, Bid::DeveloperId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bid_project_developer")
                    .table(Bid::Table)
                    .col(Bid::ProjectId)
                    .col(Bid::DeveloperId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bid::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bid {
    Table,
    Id,
    ProjectId,
    DeveloperId,
    BidAmount,
    Message,
    Status,
    EstimatedDelivery,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Project { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
