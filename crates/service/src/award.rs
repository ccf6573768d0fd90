//! Award workflow: move exactly one bid to a terminal status while keeping
//! project and sibling bids consistent.
//!
//! Acceptance spans three records (the bid, its project, every pending
//! sibling) and runs inside a single transaction. The project update carries
//! a `status = 'open'` guard and the bid transition a `status = 'pending'`
//! guard; the losing side of any concurrent decision sees zero rows affected
//! and surfaces `Conflict` instead of corrupting the assignment.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::bid::{self, BidStatus};
use models::project::{self, ProjectStatus};
use models::user;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::errors::ServiceError;

/// The two literal decisions a project owner can make on a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidDecision {
    Accept,
    Reject,
}

impl BidDecision {
    /// Parses the wire value (the target bid status).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(BidDecision::Accept),
            "rejected" => Some(BidDecision::Reject),
            _ => None,
        }
    }

    pub fn target_status(&self) -> BidStatus {
        match self {
            BidDecision::Accept => BidStatus::Accepted,
            BidDecision::Reject => BidStatus::Rejected,
        }
    }
}

/// Updated bid plus the developer identity for display.
#[derive(Debug, Clone, Serialize)]
pub struct DecidedBid {
    #[serde(flatten)]
    pub bid: bid::Model,
    pub developer_name: String,
    pub developer_email: String,
}

/// Accept or reject a bid on behalf of `requester_id`.
///
/// Only the owner of the bid's parent project may decide, and only a
/// pending bid can be decided; re-deciding an already-terminal bid is
/// refused with `Conflict` rather than silently re-applied.
#[instrument(skip(db), fields(bid_id = %bid_id, requester_id = %requester_id))]
pub async fn decide_bid(
    db: &DatabaseConnection,
    bid_id: Uuid,
    requester_id: Uuid,
    decision: BidDecision,
) -> Result<DecidedBid, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let bid_row = bid::Entity::find_by_id(bid_id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("bid"))?;

    let proj = project::Entity::find_by_id(bid_row.project_id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("project"))?;

    // Ownership predicate before any mutation
    if proj.created_by != requester_id {
        return Err(ServiceError::Forbidden(
            "only the project owner may decide bids on it".into(),
        ));
    }

    if !bid_row.is_pending() {
        return Err(ServiceError::Conflict(format!(
            "bid already decided (status: {})",
            bid_row.status
        )));
    }

    let now: DateTimeWithTimeZone = Utc::now().into();

    if decision == BidDecision::Accept {
        // Conditional update: succeeds only while the project is still open.
        // A concurrent acceptance that committed first leaves this with zero
        // rows affected.
        let guard = project::Entity::update_many()
            .col_expr(project::Column::Status, Expr::value(ProjectStatus::InProgress.as_str()))
            .col_expr(project::Column::AssignedTo, Expr::value(bid_row.developer_id))
            .col_expr(project::Column::UpdatedAt, Expr::value(now))
            .filter(project::Column::Id.eq(proj.id))
            .filter(project::Column::Status.eq(ProjectStatus::Open.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if guard.rows_affected == 0 {
            txn.rollback().await.map_err(|e| ServiceError::Db(e.to_string()))?;
            warn!(project_id = %proj.id, "lost acceptance race, project no longer open");
            return Err(ServiceError::Conflict("project is no longer open".into()));
        }
    }

    // Same guard shape as the project update above: the transition only
    // lands while the bid is still pending. A concurrent decision that
    // committed first leaves zero rows affected.
    let transition = bid::Entity::update_many()
        .col_expr(bid::Column::Status, Expr::value(decision.target_status().as_str()))
        .col_expr(bid::Column::UpdatedAt, Expr::value(now))
        .filter(bid::Column::Id.eq(bid_row.id))
        .filter(bid::Column::Status.eq(BidStatus::Pending.as_str()))
        .exec(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if transition.rows_affected == 0 {
        txn.rollback().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        warn!(bid_id = %bid_row.id, "lost decision race, bid no longer pending");
        return Err(ServiceError::Conflict("bid already decided".into()));
    }

    let updated = bid::Entity::find_by_id(bid_row.id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("bid"))?;

    if decision == BidDecision::Accept {
        // Cascade: every sibling still pending becomes rejected. Bids that
        // already reached a terminal state stay untouched.
        let cascade = bid::Entity::update_many()
            .col_expr(bid::Column::Status, Expr::value(BidStatus::Rejected.as_str()))
            .col_expr(bid::Column::UpdatedAt, Expr::value(now))
            .filter(bid::Column::ProjectId.eq(proj.id))
            .filter(bid::Column::Id.ne(bid_row.id))
            .filter(bid::Column::Status.eq(BidStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        info!(
            project_id = %proj.id,
            bid_id = %updated.id,
            developer_id = %updated.developer_id,
            rejected_siblings = cascade.rows_affected,
            "bid_accepted"
        );
    } else {
        info!(project_id = %proj.id, bid_id = %updated.id, "bid_rejected");
    }

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let developer = user::Entity::find_by_id(updated.developer_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("developer"))?;

    Ok(DecidedBid {
        bid: updated,
        developer_name: developer.name,
        developer_email: developer.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_only_terminal_literals() {
        assert_eq!(BidDecision::parse("accepted"), Some(BidDecision::Accept));
        assert_eq!(BidDecision::parse("rejected"), Some(BidDecision::Reject));
        assert!(BidDecision::parse("pending").is_none());
        assert!(BidDecision::parse("approve").is_none());
        assert!(BidDecision::parse("").is_none());
    }

    #[test]
    fn decision_targets_match() {
        assert_eq!(BidDecision::Accept.target_status(), BidStatus::Accepted);
        assert_eq!(BidDecision::Reject.target_status(), BidStatus::Rejected);
    }
}
