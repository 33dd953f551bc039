//! Health endpoint tests.

mod common;

use std::sync::Arc;

use app_bridge::child::ChildSupervisor;
use serde_json::Value;

fn idle_supervisor(config: &app_bridge::config::BridgeConfig) -> Arc<ChildSupervisor> {
    Arc::new(ChildSupervisor::new(config.child.clone()))
}

#[tokio::test]
async fn test_healthy_when_child_answers_200() {
    let child_addr = common::start_mock_child(r#"{"prompts":0}"#).await;
    let config = common::bridge_config(child_addr.port());
    let supervisor = idle_supervisor(&config);
    let (addr, shutdown) = common::spawn_bridge(config, supervisor).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("Bridge unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["child"], "running");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unhealthy_when_child_errors() {
    let child_addr =
        common::start_programmable_child(|| async { (500, "oops".to_string()) }).await;
    let config = common::bridge_config(child_addr.port());
    let supervisor = idle_supervisor(&config);
    let (addr, shutdown) = common::spawn_bridge(config, supervisor).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("Bridge unreachable");

    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "unhealthy");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unhealthy_when_child_down() {
    let config = common::bridge_config(common::unused_port().await);
    let supervisor = idle_supervisor(&config);
    let (addr, shutdown) = common::spawn_bridge(config, supervisor).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("Bridge unreachable");

    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "unhealthy");

    shutdown.trigger();
}

#[cfg(unix)]
#[tokio::test]
async fn test_starting_while_startup_delay_runs() {
    let mut config = common::bridge_config(common::unused_port().await);
    config.child.command = "/bin/sh".to_string();
    config.child.args = vec!["-c".to_string(), "sleep 30".to_string()];
    config.child.startup_delay_secs = 60;
    config.child.shutdown_grace_secs = 2;

    let supervisor = Arc::new(ChildSupervisor::new(config.child.clone()));
    supervisor.start().await.unwrap();
    let (addr, shutdown) = common::spawn_bridge(config, supervisor.clone()).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("Bridge unreachable");

    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "starting");

    shutdown.trigger();
    supervisor.stop().await;
}

#[tokio::test]
async fn test_health_is_not_forwarded_to_child() {
    let child_addr = common::start_mock_child("child-owned").await;
    let config = common::bridge_config(child_addr.port());
    let supervisor = idle_supervisor(&config);
    let (addr, shutdown) = common::spawn_bridge(config, supervisor).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // /health is the bridge's own endpoint.
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("Bridge unreachable");
    let body: Value = res.json().await.unwrap();
    assert!(body.get("status").is_some());

    // Anything else still passes through.
    let res = client
        .get(format!("http://{}/healthz", addr))
        .send()
        .await
        .expect("Bridge unreachable");
    assert_eq!(res.text().await.unwrap(), "child-owned");

    shutdown.trigger();
}
