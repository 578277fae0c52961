//! 工具调用指标快照。
//!
//! - GET /metrics

use api_contract::{MetricsSnapshotDto, ToolResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use outage_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ToolResponse::success(
            MetricsSnapshotDto {
                tool_calls: snapshot.tool_calls,
                tool_failures: snapshot.tool_failures,
                upstream_errors: snapshot.upstream_errors,
                skipped_records: snapshot.skipped_records,
                degraded_assessments: snapshot.degraded_assessments,
            },
            "操作成功",
        )),
    )
        .into_response()
}
