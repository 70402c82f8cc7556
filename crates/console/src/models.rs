//! Console API types — campaign list rows, request payloads, audit log.

use chrono::{DateTime, Utc};
use pledgeboard_core::types::{Campaign, CampaignStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Campaign listing ──────────────────────────────────────────────────────

/// One row of the campaign list view: the campaign plus its derived status
/// and whether the pledge action should be offered for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignListRow {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub status: CampaignStatus,
    pub accepting_pledges: bool,
}

/// Sort keys the campaign list view offers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignSortKey {
    #[default]
    Newest,
    Name,
    EndingSoon,
    MostPledged,
    GoalAmount,
}

impl std::str::FromStr for CampaignSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(CampaignSortKey::Newest),
            "name" => Ok(CampaignSortKey::Name),
            "ending_soon" => Ok(CampaignSortKey::EndingSoon),
            "most_pledged" => Ok(CampaignSortKey::MostPledged),
            "goal_amount" => Ok(CampaignSortKey::GoalAmount),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

// ─── API Request/Response types ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub goal_amount: f64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePledgeRequest {
    pub pledger_name: String,
    pub pledger_email: String,
    pub amount: f64,
}

/// Query string accepted by the campaign list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CampaignListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

// ─── Audit Log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub actor: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}
