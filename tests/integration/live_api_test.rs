// @critical: Live conformance run against a real Food API
//
// To run: FOODY_API__BASE_URL=... FOODY_AUTH__STATIC_TOKEN=... cargo test --test integration -- --ignored

use super::test_utils::{live_config, live_status, should_run_live};
use foody_suite::logging;
use foody_suite::scenario::{self, Scenario};
use foody_suite::services::FoodyClient;

async fn live_client() -> Option<FoodyClient> {
    if !should_run_live() {
        eprintln!("⏭️  Skipping live Food API test: {}", live_status());
        return None;
    }
    let config = live_config();
    logging::init(&config.log);
    Some(
        FoodyClient::connect(&config)
            .await
            .expect("live authentication failed"),
    )
}

#[tokio::test]
#[ignore] // Requires a reachable Food API - run with --ignored
async fn live_food_lifecycle_scenario() {
    let Some(client) = live_client().await else {
        return;
    };

    let report = Scenario::new(&client).run().await;
    println!("{report}");
    assert!(report.is_success(), "live scenario failed:\n{report}");
}

#[tokio::test]
#[ignore]
async fn live_create_without_required_fields() {
    let Some(client) = live_client().await else {
        return;
    };
    scenario::create_food_without_required_fields(&client)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn live_edit_missing_food() {
    let Some(client) = live_client().await else {
        return;
    };
    scenario::edit_missing_food(&client).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn live_delete_missing_food() {
    let Some(client) = live_client().await else {
        return;
    };
    scenario::delete_missing_food(&client).await.unwrap();
}
