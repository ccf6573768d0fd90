use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::project::ProjectStatus;
use models::user::Role;
use service::pagination::ListPage;
use service::project_service::{self, ProjectFilter};

use crate::errors::JsonApiError;
use crate::routes::auth::{require_role, AuthPrincipal, ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateProjectInput {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub estimated_budget: f64,
    #[serde(default)]
    pub deadline: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ProjectListQuery {
    pub status: Option<String>,
    pub tech: Option<String>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(post, path = "/projects", tag = "projects",
    request_body = CreateProjectInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<AuthPrincipal>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<models::project::Model>), JsonApiError> {
    require_role(&principal, Role::Client)?;

    let created = project_service::create_project(
        &state.db,
        principal.id,
        &input.title,
        &input.description,
        &input.tech_stack,
        input.estimated_budget,
        input.deadline,
    )
    .await?;
    info!(project_id = %created.id, owner = %principal.id, "created project");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/projects", tag = "projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Invalid Filter")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ProjectListQuery>,
) -> Result<Json<Vec<models::project::Model>>, JsonApiError> {
    let status = match q.status.as_deref() {
        None => None,
        Some(s) => Some(ProjectStatus::parse(s).ok_or_else(|| {
            JsonApiError::new(
                StatusCode::BAD_REQUEST,
                "Invalid Filter",
                Some(format!("unknown project status '{}'", s)),
            )
        })?),
    };
    let filter = ProjectFilter {
        status,
        tech: q.tech,
        min_budget: q.min_budget,
        max_budget: q.max_budget,
    };
    let page = ListPage::new(q.page, q.per_page);
    let list = project_service::list_projects(&state.db, filter, page).await?;
    info!(count = list.len(), "list projects");
    Ok(Json(list))
}

#[utoipa::path(get, path = "/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::project::Model>, JsonApiError> {
    match project_service::get_project(&state.db, id).await? {
        Some(m) => Ok(Json(m)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("project not found".into()))),
    }
}
