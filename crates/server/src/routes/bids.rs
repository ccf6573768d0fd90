use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::bid::BidStatus;
use models::user::Role;
use service::award::{self, BidDecision};
use service::bid_service;
use service::pagination::ListPage;

use crate::errors::JsonApiError;
use crate::routes::auth::{require_role, AuthPrincipal, ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaceBidInput {
    pub project_id: Uuid,
    pub bid_amount: f64,
    pub message: String,
    #[serde(default)]
    pub estimated_delivery: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DecideBidInput {
    /// Target status: "accepted" or "rejected"
    pub status: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct MyBidsQuery {
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[utoipa::path(post, path = "/bids/place", tag = "bids",
    request_body = PlaceBidInput,
    responses(
        (status = 201, description = "Placed"),
        (status = 400, description = "Validation Error or Project Not Open"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project Not Found"),
        (status = 409, description = "Duplicate Bid")
    )
)]
pub async fn place(
    State(state): State<ServerState>,
    Extension(principal): Extension<AuthPrincipal>,
    Json(input): Json<PlaceBidInput>,
) -> Result<(StatusCode, Json<models::bid::Model>), JsonApiError> {
    require_role(&principal, Role::Developer)?;

    let created = bid_service::place_bid(
        &state.db,
        input.project_id,
        principal.id,
        input.bid_amount,
        &input.message,
        input.estimated_delivery,
    )
    .await?;
    info!(bid_id = %created.id, project_id = %created.project_id, "placed bid");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/bids/mine", tag = "bids",
    params(MyBidsQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Invalid Filter"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn mine(
    State(state): State<ServerState>,
    Extension(principal): Extension<AuthPrincipal>,
    Query(q): Query<MyBidsQuery>,
) -> Result<Json<Vec<models::bid::Model>>, JsonApiError> {
    require_role(&principal, Role::Developer)?;

    let status = match q.status.as_deref() {
        None => None,
        Some(s) => Some(BidStatus::parse(s).ok_or_else(|| {
            JsonApiError::new(
                StatusCode::BAD_REQUEST,
                "Invalid Filter",
                Some(format!("unknown bid status '{}'", s)),
            )
        })?),
    };
    let page = ListPage::new(q.page, q.per_page);
    let list = bid_service::list_developer_bids(&state.db, principal.id, status, page).await?;
    Ok(Json(list))
}

#[utoipa::path(put, path = "/bids/{id}/status", tag = "bids",
    params(("id" = Uuid, Path, description = "Bid ID")),
    request_body = DecideBidInput,
    responses(
        (status = 200, description = "Decided"),
        (status = 400, description = "Invalid Status Value"),
        (status = 403, description = "Not The Project Owner"),
        (status = 404, description = "Bid Not Found"),
        (status = 409, description = "Already Decided or Lost Race")
    )
)]
pub async fn decide(
    State(state): State<ServerState>,
    Extension(principal): Extension<AuthPrincipal>,
    Path(id): Path<Uuid>,
    Json(input): Json<DecideBidInput>,
) -> Result<Json<award::DecidedBid>, JsonApiError> {
    require_role(&principal, Role::Client)?;

    let decision = BidDecision::parse(&input.status).ok_or_else(|| {
        JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(format!("status must be 'accepted' or 'rejected', got '{}'", input.status)),
        )
    })?;

    let decided = award::decide_bid(&state.db, id, principal.id, decision).await?;
    info!(bid_id = %id, status = %decided.bid.status, "decided bid");
    Ok(Json(decided))
}
