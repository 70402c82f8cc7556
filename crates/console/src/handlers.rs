//! Axum REST handlers for the console API.

use crate::listing::CampaignQuery;
use crate::models::*;
use crate::store::ConsoleStore;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pledgeboard_core::error::PledgeBoardError;
use pledgeboard_core::types::{Organization, Pledge};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Shared console state.
#[derive(Clone)]
pub struct ConsoleState {
    pub store: Arc<ConsoleStore>,
    pub node_id: String,
    pub start_time: Instant,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: PledgeBoardError) -> ApiError {
    let (status, code) = match &err {
        PledgeBoardError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed"),
        PledgeBoardError::OrganizationNotFound(_) | PledgeBoardError::CampaignNotFound(_) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        PledgeBoardError::CampaignNotAccepting { .. } => {
            (StatusCode::CONFLICT, "campaign_not_accepting")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

// ─── Organizations ─────────────────────────────────────────────────────────

pub async fn list_organizations(State(state): State<ConsoleState>) -> Json<Vec<Organization>> {
    Json(state.store.list_organizations())
}

pub async fn create_organization(
    State(state): State<ConsoleState>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<Organization>), ApiError> {
    let org = state
        .store
        .create_organization(req, "admin")
        .map_err(api_error)?;
    metrics::counter!("console.organizations.created").increment(1);
    Ok((StatusCode::CREATED, Json(org)))
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

/// GET /organizations/{id}/campaigns?search=&sort= — the campaigns view.
pub async fn list_campaigns(
    State(state): State<ConsoleState>,
    Path(organization_id): Path<Uuid>,
    Query(params): Query<CampaignListParams>,
) -> Result<Json<Vec<CampaignListRow>>, ApiError> {
    let sort = match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse().map_err(|msg: String| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid_sort".to_string(),
                    message: msg,
                }),
            )
        })?,
        None => CampaignSortKey::default(),
    };

    let mut query = CampaignQuery::new(organization_id).with_sort(sort);
    query.search = params.search;

    state
        .store
        .list_campaigns(&query)
        .map(Json)
        .map_err(api_error)
}

pub async fn create_campaign(
    State(state): State<ConsoleState>,
    Path(organization_id): Path<Uuid>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<pledgeboard_core::types::Campaign>), ApiError> {
    let campaign = state
        .store
        .create_campaign(organization_id, req, "admin")
        .map_err(api_error)?;
    metrics::counter!("console.campaigns.created").increment(1);
    Ok((StatusCode::CREATED, Json(campaign)))
}

pub async fn get_campaign(
    State(state): State<ConsoleState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignListRow>, StatusCode> {
    let now = Utc::now();
    state
        .store
        .get_campaign(id)
        .map(|campaign| {
            let status = campaign.status_at(now);
            let accepting_pledges = campaign.is_accepting_pledges(now);
            Json(CampaignListRow {
                campaign,
                status,
                accepting_pledges,
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

// ─── Pledges ───────────────────────────────────────────────────────────────

pub async fn list_pledges(
    State(state): State<ConsoleState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<Pledge>>, ApiError> {
    state
        .store
        .list_pledges(campaign_id)
        .map(Json)
        .map_err(api_error)
}

pub async fn create_pledge(
    State(state): State<ConsoleState>,
    Path(campaign_id): Path<Uuid>,
    Json(req): Json<CreatePledgeRequest>,
) -> Result<(StatusCode, Json<Pledge>), ApiError> {
    let pledge = state
        .store
        .create_pledge(campaign_id, req, "admin")
        .map_err(api_error)?;
    metrics::counter!("console.pledges.created").increment(1);
    Ok((StatusCode::CREATED, Json(pledge)))
}

// ─── Audit log ─────────────────────────────────────────────────────────────

pub async fn audit_log(State(state): State<ConsoleState>) -> Json<Vec<AuditLogEntry>> {
    Json(state.store.get_audit_log())
}

// ─── Operational endpoints ─────────────────────────────────────────────────

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<ConsoleState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe for Kubernetes.
pub async fn readiness(State(state): State<ConsoleState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe for Kubernetes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
