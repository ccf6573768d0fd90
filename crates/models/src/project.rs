use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tech_stack: Json,
    pub estimated_budget: f64,
    pub status: String,
    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,
    pub deadline: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Assignee,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::CreatedBy)
                .to(user::Column::Id)
                .into(),
            Relation::Assignee => Entity::belongs_to(user::Entity)
                .from(Column::AssignedTo)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Project lifecycle. Advances open -> in_progress when a bid is accepted;
/// completion has no transition here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Open,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ProjectStatus::Open),
            "in_progress" => Some(ProjectStatus::InProgress),
            "completed" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

impl Model {
    pub fn status(&self) -> Option<ProjectStatus> {
        ProjectStatus::parse(&self.status)
    }

    pub fn is_open(&self) -> bool {
        self.status == ProjectStatus::Open.as_str()
    }

    /// Stored as a JSON array of strings.
    pub fn tech_stack_items(&self) -> Vec<String> {
        self.tech_stack
            .as_array()
            .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    let len = title.trim().chars().count();
    if !(3..=100).contains(&len) {
        return Err(errors::ModelError::Validation("title must be 3-100 characters".into()));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), errors::ModelError> {
    let len = description.trim().chars().count();
    if !(10..=1000).contains(&len) {
        return Err(errors::ModelError::Validation("description must be 10-1000 characters".into()));
    }
    Ok(())
}

pub fn validate_tech_stack(stack: &[String]) -> Result<(), errors::ModelError> {
    if stack.is_empty() || stack.iter().all(|s| s.trim().is_empty()) {
        return Err(errors::ModelError::Validation("tech_stack must contain at least one entry".into()));
    }
    Ok(())
}

pub fn validate_budget(budget: f64) -> Result<(), errors::ModelError> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(errors::ModelError::Validation("estimated_budget must be >= 0".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
    tech_stack: &[String],
    estimated_budget: f64,
    created_by: Uuid,
    deadline: Option<DateTimeWithTimeZone>,
) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    validate_description(description)?;
    validate_tech_stack(tech_stack)?;
    validate_budget(estimated_budget)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.trim().to_string()),
        description: Set(description.trim().to_string()),
        tech_stack: Set(serde_json::json!(tech_stack)),
        estimated_budget: Set(estimated_budget),
        status: Set(ProjectStatus::Open.as_str().to_string()),
        created_by: Set(created_by),
        assigned_to: Set(None),
        deadline: Set(deadline),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("ab").is_err());
        assert!(validate_title("abc").is_ok());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn description_bounds() {
        assert!(validate_description("too short").is_err());
        assert!(validate_description("long enough description").is_ok());
        assert!(validate_description(&"d".repeat(1001)).is_err());
    }

    #[test]
    fn tech_stack_must_not_be_empty() {
        assert!(validate_tech_stack(&[]).is_err());
        assert!(validate_tech_stack(&["  ".to_string()]).is_err());
        assert!(validate_tech_stack(&["rust".to_string()]).is_ok());
    }

    #[test]
    fn budget_must_be_non_negative() {
        assert!(validate_budget(0.0).is_ok());
        assert!(validate_budget(1500.0).is_ok());
        assert!(validate_budget(-1.0).is_err());
        assert!(validate_budget(f64::NAN).is_err());
    }

    #[test]
    fn status_round_trips() {
        assert_eq!(ProjectStatus::parse("open"), Some(ProjectStatus::Open));
        assert_eq!(ProjectStatus::parse("in_progress"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::InProgress.as_str(), "in_progress");
        assert!(ProjectStatus::parse("archived").is_none());
    }
}
