use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors, project, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bid")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub developer_id: Uuid,
    pub bid_amount: f64,
    pub message: String,
    pub status: String,
    pub estimated_delivery: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    Developer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::Id)
                .into(),
            Relation::Developer => Entity::belongs_to(user::Entity)
                .from(Column::DeveloperId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Bid lifecycle. Pending bids move exactly once to a terminal state
/// through the award workflow; there is no reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BidStatus::Pending),
            "accepted" => Some(BidStatus::Accepted),
            "rejected" => Some(BidStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BidStatus::Accepted | BidStatus::Rejected)
    }
}

impl Model {
    pub fn status(&self) -> Option<BidStatus> {
        BidStatus::parse(&self.status)
    }

    pub fn is_pending(&self) -> bool {
        self.status == BidStatus::Pending.as_str()
    }
}

pub fn validate_message(message: &str) -> Result<(), errors::ModelError> {
    let len = message.trim().chars().count();
    if !(10..=500).contains(&len) {
        return Err(errors::ModelError::Validation("message must be 10-500 characters".into()));
    }
    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<(), errors::ModelError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(errors::ModelError::Validation("bid_amount must be >= 0".into()));
    }
    Ok(())
}

/// Insert a new pending bid. Duplicate (project, developer) pairs are
/// refused by the unique index; the caller maps that DbErr to a conflict.
pub async fn create(
    db: &DatabaseConnection,
    project_id: Uuid,
    developer_id: Uuid,
    bid_amount: f64,
    message: &str,
    estimated_delivery: Option<DateTimeWithTimeZone>,
) -> Result<Model, sea_orm::DbErr> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        developer_id: Set(developer_id),
        bid_amount: Set(bid_amount),
        message: Set(message.trim().to_string()),
        status: Set(BidStatus::Pending.as_str().to_string()),
        estimated_delivery: Set(estimated_delivery),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn message_bounds() {
        assert!(validate_message("short").is_err());
        assert!(validate_message("I can build this in two weeks").is_ok());
        assert!(validate_message(&"m".repeat(501)).is_err());
    }

    #[test]
    fn amount_must_be_non_negative() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(-0.5).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!BidStatus::Pending.is_terminal());
        assert!(BidStatus::Accepted.is_terminal());
        assert!(BidStatus::Rejected.is_terminal());
        assert!(BidStatus::parse("withdrawn").is_none());
    }
}
