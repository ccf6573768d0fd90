//! Secondary indexes for the listing queries.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Project directory filters on status
        manager
            .create_index(
                Index::create()
                    .name("idx_project_status")
                    .table(Project::Table)
                    .col(Project::Status)
                    .to_owned(),
            )
            .await?;

        // Owner's own projects
        manager
            .create_index(
                Index::create()
                    .name("idx_project_created_by")
                    .table(Project::Table)
                    .col(Project::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // "My bids" listing and the sibling cascade both hit these
        manager
            .create_index(
                Index::create()
                    .name("idx_bid_developer")
                    .table(Bid::Table)
                    .col(Bid::DeveloperId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_bid_project_status")
                    .table(Bid::Table)
                    .col(Bid::ProjectId)
                    .col(Bid::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_project_status").table(Project::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_project_created_by").table(Project::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_bid_developer").table(Bid::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_bid_project_status").table(Bid::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Project { Table, Status, CreatedBy }

#[derive(DeriveIden)]
enum Bid { Table, DeveloperId, ProjectId, Status }
