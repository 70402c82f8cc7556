//! Integration tests for the console: store-level campaign/pledge flow and
//! the HTTP surface of the campaigns view.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use pledgeboard_console::listing::CampaignQuery;
use pledgeboard_console::models::{
    CampaignSortKey, CreateCampaignRequest, CreateOrganizationRequest, CreatePledgeRequest,
};
use pledgeboard_console::{ConsoleServer, ConsoleStore};
use pledgeboard_core::config::AppConfig;
use pledgeboard_core::types::CampaignStatus;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Store with one organization and three campaigns: one upcoming, one
/// active, one ended. Returns (store, org id, active id, ended id).
fn seeded_store() -> (Arc<ConsoleStore>, Uuid, Uuid, Uuid) {
    let store = Arc::new(ConsoleStore::default());
    let now = Utc::now();

    let org = store
        .create_organization(
            CreateOrganizationRequest {
                name: "Ocean Trust".into(),
            },
            "test",
        )
        .unwrap();

    let create = |name: &str, desc: &str, start: i64, end: i64| {
        store
            .create_campaign(
                org.id,
                CreateCampaignRequest {
                    name: name.into(),
                    description: desc.into(),
                    goal_amount: 10_000.0,
                    starts_at: now + Duration::days(start),
                    ends_at: now + Duration::days(end),
                },
                "test",
            )
            .unwrap()
    };

    let _upcoming = create("Winter Gala", "annual fundraising gala", 10, 20);
    let active = create("Save the Reef", "coral restoration fund", -5, 15);
    let ended = create("Harbor Cleanup", "finished dredge sponsorship", -30, -10);

    (store, org.id, active.id, ended.id)
}

#[test]
fn full_campaign_and_pledge_flow() {
    let (store, org_id, active_id, ended_id) = seeded_store();

    // All three campaigns listed, each with its derived status.
    let rows = store.list_campaigns(&CampaignQuery::new(org_id)).unwrap();
    assert_eq!(rows.len(), 3);
    let by_name = |n: &str| rows.iter().find(|r| r.campaign.name == n).unwrap();
    assert_eq!(by_name("Winter Gala").status, CampaignStatus::Upcoming);
    assert_eq!(by_name("Save the Reef").status, CampaignStatus::Active);
    assert_eq!(by_name("Harbor Cleanup").status, CampaignStatus::Ended);
    assert!(by_name("Save the Reef").accepting_pledges);
    assert!(!by_name("Harbor Cleanup").accepting_pledges);

    // Search narrows to a matching subset.
    let reef = store
        .list_campaigns(&CampaignQuery::new(org_id).with_search("reef"))
        .unwrap();
    assert_eq!(reef.len(), 1);
    assert_eq!(reef[0].campaign.id, active_id);

    // Sort by name is deterministic and case-insensitive.
    let named = store
        .list_campaigns(&CampaignQuery::new(org_id).with_sort(CampaignSortKey::Name))
        .unwrap();
    let names: Vec<&str> = named.iter().map(|r| r.campaign.name.as_str()).collect();
    assert_eq!(names, vec!["Harbor Cleanup", "Save the Reef", "Winter Gala"]);

    // Pledging the active campaign succeeds and rolls up.
    let pledge = store
        .create_pledge(
            active_id,
            CreatePledgeRequest {
                pledger_name: "Robin".into(),
                pledger_email: "robin@example.com".into(),
                amount: 120.0,
            },
            "test",
        )
        .unwrap();
    assert_eq!(pledge.amount, 120.0);
    assert_eq!(store.get_campaign(active_id).unwrap().pledged_total, 120.0);

    // Pledging the ended campaign is rejected and leaves it untouched.
    assert!(store
        .create_pledge(
            ended_id,
            CreatePledgeRequest {
                pledger_name: "Robin".into(),
                pledger_email: "robin@example.com".into(),
                amount: 120.0,
            },
            "test",
        )
        .is_err());
    assert_eq!(store.get_campaign(ended_id).unwrap().pledge_count, 0);
}

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn http_campaign_listing_and_pledge() {
    let (store, org_id, active_id, ended_id) = seeded_store();
    let server = ConsoleServer::new(AppConfig::default(), store);

    // Health endpoint is up.
    let (status, body) = send(
        server.app(),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    // The campaigns view: search + sort via query string.
    let uri = format!("/api/v1/console/organizations/{org_id}/campaigns?search=reef&sort=name");
    let (status, body) = send(server.app(), Request::get(uri.as_str()).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Save the Reef");
    assert_eq!(body[0]["status"], "active");
    assert_eq!(body[0]["accepting_pledges"], true);

    // Unknown sort key is a 400.
    let uri = format!("/api/v1/console/organizations/{org_id}/campaigns?sort=bogus");
    let (status, body) = send(server.app(), Request::get(uri.as_str()).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_sort");

    // Pledge against the active campaign: 201.
    let uri = format!("/api/v1/console/campaigns/{active_id}/pledges");
    let payload = serde_json::json!({
        "pledger_name": "Robin",
        "pledger_email": "robin@example.com",
        "amount": 75.0,
    });
    let (status, body) = send(
        server.app(),
        Request::post(uri.as_str())
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], 75.0);

    // Pledge against the ended campaign: 409.
    let uri = format!("/api/v1/console/campaigns/{ended_id}/pledges");
    let (status, body) = send(
        server.app(),
        Request::post(uri.as_str())
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "campaign_not_accepting");

    // Unknown campaign: 404.
    let uri = format!("/api/v1/console/campaigns/{}/pledges", Uuid::new_v4());
    let (status, _) = send(
        server.app(),
        Request::post(uri.as_str())
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
