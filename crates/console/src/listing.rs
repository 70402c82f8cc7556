//! Campaign listing engine — the filter and sort behind the campaigns view.
//!
//! Pure transformation over an in-memory collection: restrict to one
//! organization, narrow by a free-text search term, order by the selected
//! sort key. Sorting is stable so equal keys keep their prior relative order.

use crate::models::{CampaignListRow, CampaignSortKey};
use chrono::{DateTime, Utc};
use pledgeboard_core::types::Campaign;
use uuid::Uuid;

/// Parameters for one evaluation of the campaign list view.
#[derive(Debug, Clone)]
pub struct CampaignQuery {
    pub organization_id: Uuid,
    pub search: Option<String>,
    pub sort: CampaignSortKey,
    /// Instant at which campaign status is derived.
    pub now: DateTime<Utc>,
}

impl CampaignQuery {
    pub fn new(organization_id: Uuid) -> Self {
        Self {
            organization_id,
            search: None,
            sort: CampaignSortKey::default(),
            now: Utc::now(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: CampaignSortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Evaluate the query against a snapshot of campaigns.
pub fn run(campaigns: &[Campaign], query: &CampaignQuery) -> Vec<CampaignListRow> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<&Campaign> = campaigns
        .iter()
        .filter(|c| c.organization_id == query.organization_id)
        .filter(|c| match &needle {
            Some(n) => matches_search(c, n),
            None => true,
        })
        .collect();

    sort_campaigns(&mut matched, query.sort);

    matched
        .into_iter()
        .map(|c| {
            let status = c.status_at(query.now);
            CampaignListRow {
                campaign: c.clone(),
                status,
                accepting_pledges: c.is_accepting_pledges(query.now),
            }
        })
        .collect()
}

/// Case-insensitive substring match against name and description.
/// `needle` must already be lowercased.
fn matches_search(campaign: &Campaign, needle: &str) -> bool {
    campaign.name.to_lowercase().contains(needle)
        || campaign.description.to_lowercase().contains(needle)
}

fn sort_campaigns(campaigns: &mut [&Campaign], sort: CampaignSortKey) {
    match sort {
        CampaignSortKey::Newest => {
            campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        CampaignSortKey::Name => {
            campaigns.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        CampaignSortKey::EndingSoon => {
            campaigns.sort_by(|a, b| a.window.ends_at.cmp(&b.window.ends_at));
        }
        CampaignSortKey::MostPledged => {
            campaigns.sort_by(|a, b| b.pledged_total.total_cmp(&a.pledged_total));
        }
        CampaignSortKey::GoalAmount => {
            campaigns.sort_by(|a, b| b.goal_amount.total_cmp(&a.goal_amount));
        }
    }
}
