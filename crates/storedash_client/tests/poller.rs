use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use storedash_client::{Dashboard, Poller, Transport, TransportConfig, DEFAULT_POLL_INTERVAL};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard_for(server: &MockServer) -> Dashboard {
    let transport = Transport::new(TransportConfig::new(server.uri())).expect("transport");
    Dashboard::new(transport)
}

async fn listings(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|request| request.method.as_str() == "GET" && request.url.path() == "/stores")
        .count()
}

#[tokio::test]
async fn attach_reconciles_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "s-1", "status": "Ready"}])),
        )
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    // A long interval isolates the immediate first tick.
    let poller = Poller::start(dashboard.clone(), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(listings(&server).await, 1);
    assert_eq!(dashboard.view().stores.len(), 1);
    poller.stop();
}

#[tokio::test]
async fn polls_keep_coming_until_stop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    let poller = Poller::start(dashboard.clone(), Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(180)).await;

    let while_attached = listings(&server).await;
    assert!(while_attached >= 2, "one immediate poll plus periodic ones, saw {while_attached}");

    poller.stop();
    tokio::time::sleep(Duration::from_millis(200)).await;
    let after_stop = listings(&server).await;
    // stop() halts scheduling at once; at most one already-started poll
    // may still land.
    assert!(after_stop <= while_attached + 1, "polls continued after stop: {after_stop}");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(listings(&server).await, after_stop);
}

#[tokio::test]
async fn stopped_poller_keeps_the_last_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "s-1", "status": "Provisioning"}])),
        )
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    let poller = Poller::start(dashboard.clone(), Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(120)).await;
    poller.stop();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let view = dashboard.view();
    assert_eq!(view.stores.len(), 1);
    assert_eq!(view.stores[0].status, "Provisioning");
    assert!(!view.busy);
}

#[tokio::test]
async fn dropping_the_handle_detaches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server);
    {
        let _poller = Poller::start(dashboard.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(80)).await;
    }
    tokio::time::sleep(Duration::from_millis(150)).await;
    let after_drop = listings(&server).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(listings(&server).await, after_drop);
}

#[test]
fn default_interval_matches_the_service_cadence() {
    assert_eq!(DEFAULT_POLL_INTERVAL, Duration::from_secs(4));
}
