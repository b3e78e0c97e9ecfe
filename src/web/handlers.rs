//! Web 路由处理函数
//!
//! 实现存活上报端点的路由处理逻辑

use super::{ApiError, AppState};
use crate::health::AggregateReport;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

/// 存活上报处理函数
///
/// 读取最近发布的快照并按需推导聚合报告。依赖异常属于数据而非
/// 传输错误，因此即使聚合状态为fail也返回200；调用方需检查
/// 响应体中的status字段。
pub async fn live_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.current().await;
    let report = AggregateReport::from_snapshot((*snapshot).clone(), state.version.clone());

    (StatusCode::OK, Json(report))
}

/// 非GET请求的拒绝处理函数
///
/// 不触碰快照，直接返回405与结构化错误体。
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiError::new("Method Not Allowed")),
    )
}
