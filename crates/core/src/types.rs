//! Core domain types — organizations, fundraising campaigns, and pledges.

use crate::error::{PledgeBoardError, PledgeBoardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Organization ──────────────────────────────────────────────────────────

/// The owning entity that groups campaigns together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        let slug = slugify(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lowercase the name and map every non-alphanumeric character to `-`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

// ─── Campaign ──────────────────────────────────────────────────────────────

/// The time window during which a campaign accepts pledges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CampaignWindow {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl CampaignWindow {
    /// Build a window, rejecting `starts_at >= ends_at`.
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> PledgeBoardResult<Self> {
        if starts_at >= ends_at {
            return Err(PledgeBoardError::Validation(format!(
                "campaign window is inverted: starts_at {starts_at} >= ends_at {ends_at}"
            )));
        }
        Ok(Self { starts_at, ends_at })
    }

    /// Derive the status at the given instant. The boundary rules are
    /// inclusive at the start and exclusive at the end: a campaign is active
    /// the moment it starts and stops accepting the moment it ends.
    pub fn status_at(&self, now: DateTime<Utc>) -> CampaignStatus {
        if now < self.starts_at {
            CampaignStatus::Upcoming
        } else if now < self.ends_at {
            CampaignStatus::Active
        } else {
            CampaignStatus::Ended
        }
    }
}

/// Derived campaign status. Never stored — always computed from the
/// campaign window relative to a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Upcoming,
    Active,
    Ended,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CampaignStatus::Upcoming => "upcoming",
            CampaignStatus::Active => "active",
            CampaignStatus::Ended => "ended",
        };
        f.write_str(s)
    }
}

/// A time-bounded fundraising effort belonging to one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: String,
    pub goal_amount: f64,
    pub pledged_total: f64,
    pub pledge_count: u64,
    pub window: CampaignWindow,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    pub fn status_at(&self, now: DateTime<Utc>) -> CampaignStatus {
        self.window.status_at(now)
    }

    pub fn is_accepting_pledges(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == CampaignStatus::Active
    }
}

// ─── Pledge ────────────────────────────────────────────────────────────────

/// A monetary commitment made by a user toward a specific campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pledge {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub pledger_name: String,
    pub pledger_email: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}
