use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};
use tracing::{info, instrument};
use uuid::Uuid;

use models::bid::{self, BidStatus};
use models::project;

use crate::errors::ServiceError;
use crate::pagination::ListPage;

/// Place a pending bid on an open project.
///
/// The one-bid-per-developer-per-project rule is enforced by the store's
/// composite unique index, not by a check-then-create read, so two
/// concurrent placements cannot both succeed.
#[instrument(skip(db, message), fields(project_id = %project_id, developer_id = %developer_id))]
pub async fn place_bid(
    db: &DatabaseConnection,
    project_id: Uuid,
    developer_id: Uuid,
    bid_amount: f64,
    message: &str,
    estimated_delivery: Option<DateTime<FixedOffset>>,
) -> Result<bid::Model, ServiceError> {
    bid::validate_amount(bid_amount)?;
    bid::validate_message(message)?;

    let proj = project::Entity::find_by_id(project_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("project"))?;
    if !proj.is_open() {
        return Err(ServiceError::InvalidState(format!(
            "project is not open for bids (status: {})",
            proj.status
        )));
    }

    match bid::create(db, project_id, developer_id, bid_amount, message, estimated_delivery).await {
        Ok(created) => {
            info!(bid_id = %created.id, amount = created.bid_amount, "bid_placed");
            Ok(created)
        }
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(ServiceError::Conflict(
                "developer already has a bid on this project".into(),
            )),
            _ => Err(ServiceError::Db(e.to_string())),
        },
    }
}

/// A developer's own bids, optionally narrowed by status. Newest first.
pub async fn list_developer_bids(
    db: &DatabaseConnection,
    developer_id: Uuid,
    status: Option<BidStatus>,
    page: ListPage,
) -> Result<Vec<bid::Model>, ServiceError> {
    let mut q = bid::Entity::find().filter(bid::Column::DeveloperId.eq(developer_id));
    if let Some(status) = status {
        q = q.filter(bid::Column::Status.eq(status.as_str()));
    }
    q.order_by_desc(bid::Column::CreatedAt)
        .paginate(db, page.page_size())
        .fetch_page(page.page_index())
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
