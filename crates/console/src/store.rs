//! In-memory console store backed by DashMap.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store.
//! This provides the same API surface for development and testing.

use crate::listing::{self, CampaignQuery};
use crate::models::*;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use pledgeboard_core::config::PledgeConfig;
use pledgeboard_core::error::{PledgeBoardError, PledgeBoardResult};
use pledgeboard_core::types::{Campaign, CampaignWindow, Organization, Pledge};
use tracing::info;
use uuid::Uuid;

/// Thread-safe in-memory store for organizations, campaigns, pledges,
/// and the audit log.
pub struct ConsoleStore {
    organizations: DashMap<Uuid, Organization>,
    campaigns: DashMap<Uuid, Campaign>,
    pledges: DashMap<Uuid, Pledge>,
    audit_log: DashMap<Uuid, AuditLogEntry>,
    pledge_config: PledgeConfig,
}

impl ConsoleStore {
    pub fn new(pledge_config: PledgeConfig) -> Self {
        info!("Console store initialized (in-memory, development mode)");
        Self {
            organizations: DashMap::new(),
            campaigns: DashMap::new(),
            pledges: DashMap::new(),
            audit_log: DashMap::new(),
            pledge_config,
        }
    }

    // ─── Organizations ─────────────────────────────────────────────────────

    pub fn list_organizations(&self) -> Vec<Organization> {
        let mut orgs: Vec<Organization> =
            self.organizations.iter().map(|r| r.value().clone()).collect();
        orgs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        orgs
    }

    pub fn get_organization(&self, id: Uuid) -> Option<Organization> {
        self.organizations.get(&id).map(|r| r.value().clone())
    }

    pub fn create_organization(
        &self,
        req: CreateOrganizationRequest,
        actor: &str,
    ) -> PledgeBoardResult<Organization> {
        if req.name.trim().is_empty() {
            return Err(PledgeBoardError::Validation(
                "organization name must not be blank".into(),
            ));
        }
        let org = Organization::new(req.name);
        self.organizations.insert(org.id, org.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "organization",
            &org.id.to_string(),
            serde_json::json!({"name": &org.name}),
        );
        info!(organization_id = %org.id, name = %org.name, "Organization created");
        Ok(org)
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    /// The campaigns view: filter by organization and search term, order by
    /// the requested sort key, and derive per-row status at `now`.
    pub fn list_campaigns(&self, query: &CampaignQuery) -> PledgeBoardResult<Vec<CampaignListRow>> {
        if self.get_organization(query.organization_id).is_none() {
            return Err(PledgeBoardError::OrganizationNotFound(query.organization_id));
        }
        let snapshot: Vec<Campaign> = self.campaigns.iter().map(|r| r.value().clone()).collect();
        Ok(listing::run(&snapshot, query))
    }

    pub fn get_campaign(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|r| r.value().clone())
    }

    /// Admin/seed facility. Campaign creation is not part of the list view;
    /// records reach it as read-only data.
    pub fn create_campaign(
        &self,
        organization_id: Uuid,
        req: CreateCampaignRequest,
        actor: &str,
    ) -> PledgeBoardResult<Campaign> {
        if self.get_organization(organization_id).is_none() {
            return Err(PledgeBoardError::OrganizationNotFound(organization_id));
        }
        if req.name.trim().is_empty() {
            return Err(PledgeBoardError::Validation(
                "campaign name must not be blank".into(),
            ));
        }
        if req.goal_amount <= 0.0 {
            return Err(PledgeBoardError::Validation(format!(
                "goal amount must be positive, got {}",
                req.goal_amount
            )));
        }
        let window = CampaignWindow::new(req.starts_at, req.ends_at)?;

        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            organization_id,
            name: req.name,
            description: req.description,
            goal_amount: req.goal_amount,
            pledged_total: 0.0,
            pledge_count: 0,
            window,
            created_at: now,
            updated_at: now,
        };
        self.campaigns.insert(campaign.id, campaign.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "campaign",
            &campaign.id.to_string(),
            serde_json::json!({"name": &campaign.name}),
        );
        info!(campaign_id = %campaign.id, name = %campaign.name, "Campaign created");
        Ok(campaign)
    }

    // ─── Pledges ───────────────────────────────────────────────────────────

    pub fn list_pledges(&self, campaign_id: Uuid) -> PledgeBoardResult<Vec<Pledge>> {
        if self.get_campaign(campaign_id).is_none() {
            return Err(PledgeBoardError::CampaignNotFound(campaign_id));
        }
        let mut pledges: Vec<Pledge> = self
            .pledges
            .iter()
            .filter(|r| r.value().campaign_id == campaign_id)
            .map(|r| r.value().clone())
            .collect();
        pledges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pledges)
    }

    /// Create a pledge against a campaign, enforcing the active-window rule
    /// server-side. The same rule is surfaced to clients as
    /// `accepting_pledges` on list rows so the action can be disabled up
    /// front, but the store is the authority.
    pub fn create_pledge(
        &self,
        campaign_id: Uuid,
        req: CreatePledgeRequest,
        actor: &str,
    ) -> PledgeBoardResult<Pledge> {
        self.create_pledge_at(campaign_id, req, actor, Utc::now())
    }

    /// Same as [`create_pledge`](Self::create_pledge) with an explicit
    /// evaluation instant for the eligibility check.
    pub fn create_pledge_at(
        &self,
        campaign_id: Uuid,
        req: CreatePledgeRequest,
        actor: &str,
        now: DateTime<Utc>,
    ) -> PledgeBoardResult<Pledge> {
        if req.pledger_name.trim().is_empty() {
            return Err(PledgeBoardError::Validation(
                "pledger name must not be blank".into(),
            ));
        }
        if req.amount < self.pledge_config.min_amount {
            return Err(PledgeBoardError::Validation(format!(
                "pledge amount {} is below the minimum of {}",
                req.amount, self.pledge_config.min_amount
            )));
        }

        // The entry lock is held across the eligibility check and the
        // roll-up update.
        let mut entry = self
            .campaigns
            .get_mut(&campaign_id)
            .ok_or(PledgeBoardError::CampaignNotFound(campaign_id))?;
        let campaign = entry.value_mut();

        let status = campaign.status_at(now);
        if !campaign.is_accepting_pledges(now) {
            metrics::counter!("console.pledges.rejected").increment(1);
            return Err(PledgeBoardError::CampaignNotAccepting {
                id: campaign_id,
                status: status.to_string(),
            });
        }

        let pledge = Pledge {
            id: Uuid::new_v4(),
            campaign_id,
            pledger_name: req.pledger_name,
            pledger_email: req.pledger_email,
            amount: req.amount,
            created_at: now,
        };
        campaign.pledged_total += pledge.amount;
        campaign.pledge_count += 1;
        campaign.updated_at = now;
        drop(entry);

        self.pledges.insert(pledge.id, pledge.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "pledge",
            &pledge.id.to_string(),
            serde_json::json!({"campaign_id": campaign_id, "amount": pledge.amount}),
        );
        info!(pledge_id = %pledge.id, campaign_id = %campaign_id, amount = pledge.amount, "Pledge created");
        Ok(pledge)
    }

    // ─── Audit Log ─────────────────────────────────────────────────────────

    pub fn get_audit_log(&self) -> Vec<AuditLogEntry> {
        let mut entries: Vec<AuditLogEntry> =
            self.audit_log.iter().map(|r| r.value().clone()).collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    fn log_audit(
        &self,
        actor: &str,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        details: serde_json::Value,
    ) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            details,
            timestamp: Utc::now(),
        };
        self.audit_log.insert(entry.id, entry);
    }

    // ─── Demo Data ─────────────────────────────────────────────────────────

    /// Seed demo organizations and campaigns spanning all derived statuses.
    pub fn seed_demo_data(&self) -> PledgeBoardResult<()> {
        use chrono::Duration;
        use rand::Rng;

        let now = Utc::now();
        let mut rng = rand::thread_rng();

        let orgs = vec![
            ("Ocean Trust", vec![
                ("Save the Reef", "Coral restoration along the northern shelf", 50_000.0, -20, 40),
                ("Clean Rivers", "Watershed cleanup and monitoring stations", 20_000.0, -10, 20),
                ("Winter Gala Fund", "Annual gala, doors open in spring", 35_000.0, 30, 60),
                ("Harbor Cleanup 2025", "Completed harbor dredge sponsorship", 15_000.0, -90, -30),
            ]),
            ("City Arts Collective", vec![
                ("Mural Project", "Ten murals across the warehouse district", 12_000.0, -5, 25),
                ("Youth Orchestra Tour", "Instruments and travel for the spring tour", 28_000.0, -15, 45),
            ]),
        ];

        for (org_name, campaigns) in orgs {
            let org = self.create_organization(
                CreateOrganizationRequest {
                    name: org_name.to_string(),
                },
                "seed",
            )?;

            for (name, desc, goal, start_days, end_days) in campaigns {
                let campaign = self.create_campaign(
                    org.id,
                    CreateCampaignRequest {
                        name: name.to_string(),
                        description: desc.to_string(),
                        goal_amount: goal,
                        starts_at: now + Duration::days(start_days),
                        ends_at: now + Duration::days(end_days),
                    },
                    "seed",
                )?;

                // A handful of pledges for campaigns that are currently open.
                if campaign.is_accepting_pledges(now) {
                    for i in 0..rng.gen_range(3..8) {
                        let amount = rng.gen_range(10..500) as f64;
                        self.create_pledge(
                            campaign.id,
                            CreatePledgeRequest {
                                pledger_name: format!("Demo Pledger {}", i + 1),
                                pledger_email: format!("pledger{}@example.com", i + 1),
                                amount,
                            },
                            "seed",
                        )?;
                    }
                }
            }
        }

        info!("Demo data seeded");
        Ok(())
    }
}

impl Default for ConsoleStore {
    fn default() -> Self {
        Self::new(PledgeConfig::default())
    }
}
