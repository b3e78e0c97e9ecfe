//! 存活聚合端到端测试
//!
//! 覆盖探测轮次、快照发布与HTTP上报端点的整体行为

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gateway_vitals::error::ProbeError;
use gateway_vitals::health::{ComponentKind, CycleRunner, DependencyProbe, SnapshotStore};
use gateway_vitals::web::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// 结果固定的探测桩
struct StaticProbe {
    name: &'static str,
    kind: ComponentKind,
    healthy: bool,
}

impl StaticProbe {
    fn passing(name: &'static str, kind: ComponentKind) -> Arc<dyn DependencyProbe> {
        Arc::new(Self {
            name,
            kind,
            healthy: true,
        })
    }

    fn failing(name: &'static str, kind: ComponentKind) -> Arc<dyn DependencyProbe> {
        Arc::new(Self {
            name,
            kind,
            healthy: false,
        })
    }
}

#[async_trait]
impl DependencyProbe for StaticProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    fn component_kind(&self) -> ComponentKind {
        self.kind
    }

    async fn probe(&self) -> Result<(), ProbeError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ProbeError::RpcConnect)
        }
    }
}

fn runner_for(
    probes: Vec<Arc<dyn DependencyProbe>>,
    store: &Arc<SnapshotStore>,
) -> CycleRunner {
    CycleRunner::new(probes, Arc::clone(store), Duration::from_secs(5))
}

fn get_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/hello")
        .body(Body::empty())
        .unwrap()
}

async fn response_json(store: &Arc<SnapshotStore>) -> (StatusCode, Value) {
    let app = build_router(AppState::new(Arc::clone(store)));
    let response = app.oneshot(get_request()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_store_failure_alone_aggregates_to_fail() {
    let store = Arc::new(SnapshotStore::new());
    let runner = runner_for(
        vec![StaticProbe::failing("redis", ComponentKind::Datastore)],
        &store,
    );

    runner.run_cycle().await;
    let (status, json) = response_json(&store).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "fail");
    let details = json["details"].as_object().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details["redis"]["status"], "fail");
    assert_eq!(details["redis"]["output"], "Could not connect to RPC");
}

#[tokio::test]
async fn test_partial_failure_aggregates_to_warn() {
    let store = Arc::new(SnapshotStore::new());
    let runner = runner_for(
        vec![
            StaticProbe::passing("redis", ComponentKind::Datastore),
            StaticProbe::failing("dashboard", ComponentKind::System),
        ],
        &store,
    );

    runner.run_cycle().await;
    let (_, json) = response_json(&store).await;

    assert_eq!(json["status"], "warn");
    assert_eq!(json["details"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_all_members_passing_aggregates_to_pass() {
    let store = Arc::new(SnapshotStore::new());
    let runner = runner_for(
        vec![
            StaticProbe::passing("redis", ComponentKind::Datastore),
            StaticProbe::passing("dashboard", ComponentKind::System),
            StaticProbe::passing("rpc", ComponentKind::System),
        ],
        &store,
    );

    runner.run_cycle().await;
    let (_, json) = response_json(&store).await;

    assert_eq!(json["status"], "pass");
    let details = json["details"].as_object().unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details["redis"]["componentType"], "datastore");
    assert_eq!(details["dashboard"]["componentType"], "system");
    assert_eq!(details["rpc"]["componentType"], "system");
}

#[tokio::test]
async fn test_disabling_member_removes_it_from_next_snapshot() {
    let store = Arc::new(SnapshotStore::new());

    let with_dashboard = runner_for(
        vec![
            StaticProbe::passing("redis", ComponentKind::Datastore),
            StaticProbe::failing("dashboard", ComponentKind::System),
        ],
        &store,
    );
    with_dashboard.run_cycle().await;

    let (_, json) = response_json(&store).await;
    assert!(json["details"].get("dashboard").is_some());

    // 控制平面依赖被禁用后，下一轮快照中它整体消失，而不是标记为pass或fail
    let without_dashboard = runner_for(
        vec![StaticProbe::passing("redis", ComponentKind::Datastore)],
        &store,
    );
    without_dashboard.run_cycle().await;

    let (_, json) = response_json(&store).await;
    let details = json["details"].as_object().unwrap();
    assert_eq!(details.len(), 1);
    assert!(details.get("dashboard").is_none());
    assert_eq!(json["status"], "pass");
}

#[tokio::test]
async fn test_report_before_any_cycle_is_healthy_and_bare() {
    let store = Arc::new(SnapshotStore::new());
    let (status, json) = response_json(&store).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "pass");
    assert_eq!(json["description"], "Tyk GW");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_non_get_does_not_disturb_published_snapshot() {
    let store = Arc::new(SnapshotStore::new());
    let runner = runner_for(
        vec![StaticProbe::passing("redis", ComponentKind::Datastore)],
        &store,
    );
    runner.run_cycle().await;

    let (_, before) = response_json(&store).await;

    let app = build_router(AppState::new(Arc::clone(&store)));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error_body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error_body["error"], "Method Not Allowed");

    let (_, after) = response_json(&store).await;
    assert_eq!(before["details"], after["details"]);
}
