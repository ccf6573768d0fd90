use chrono::{DateTime, FixedOffset};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::{info, instrument};
use uuid::Uuid;

use models::project::{self, ProjectStatus};

use crate::errors::ServiceError;
use crate::pagination::ListPage;

/// Directory filters for the project listing.
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    /// Tech stack membership, e.g. "rust" matches any project whose
    /// stack contains it.
    pub tech: Option<String>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
}

#[instrument(skip(db), fields(created_by = %created_by))]
pub async fn create_project(
    db: &DatabaseConnection,
    created_by: Uuid,
    title: &str,
    description: &str,
    tech_stack: &[String],
    estimated_budget: f64,
    deadline: Option<DateTime<FixedOffset>>,
) -> Result<project::Model, ServiceError> {
    let created = project::create(db, title, description, tech_stack, estimated_budget, created_by, deadline).await?;
    info!(project_id = %created.id, title = %created.title, "project_created");
    Ok(created)
}

pub async fn get_project(db: &DatabaseConnection, id: Uuid) -> Result<Option<project::Model>, ServiceError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Filtered, paginated directory read. Newest projects first.
pub async fn list_projects(
    db: &DatabaseConnection,
    filter: ProjectFilter,
    page: ListPage,
) -> Result<Vec<project::Model>, ServiceError> {
    let mut q = project::Entity::find();
    if let Some(status) = filter.status {
        q = q.filter(project::Column::Status.eq(status.as_str()));
    }
    if let Some(tech) = &filter.tech {
        // JSONB containment keeps the membership test in the store
        let needle = serde_json::json!([tech]).to_string();
        q = q.filter(Expr::cust_with_values("tech_stack @> ?::jsonb", [needle]));
    }
    if let Some(min) = filter.min_budget {
        q = q.filter(project::Column::EstimatedBudget.gte(min));
    }
    if let Some(max) = filter.max_budget {
        q = q.filter(project::Column::EstimatedBudget.lte(max));
    }
    q.order_by_desc(project::Column::CreatedAt)
        .paginate(db, page.page_size())
        .fetch_page(page.page_index())
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
