//! 工具响应构造。
//!
//! - 数据处理工具的信封一律以 HTTP 200 返回，业务结果看 `code`
//! - 参数不合法：HTTP 400 + code 400
//! - 后端数据服务失败：HTTP 502 + code 502

use api_contract::{CODE_INVALID_ARGUMENT, CODE_UPSTREAM_FAILURE, ToolResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use outage_data_client::DataServiceError;
use outage_telemetry::record_tool_failure;
use serde::Serialize;
use serde_json::Value;

/// 处理工具的信封响应。
pub fn envelope<T: Serialize>(response: ToolResponse<T>) -> Response {
    if !response.success {
        record_tool_failure();
    }
    (StatusCode::OK, Json(response.into_value())).into_response()
}

/// 原样返回后端数据。
pub fn passthrough(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

/// 参数错误响应。
pub fn invalid_argument(message: impl Into<String>) -> Response {
    record_tool_failure();
    (
        StatusCode::BAD_REQUEST,
        Json(ToolResponse::<Value>::failure(CODE_INVALID_ARGUMENT, message)),
    )
        .into_response()
}

/// 后端数据服务错误响应。
pub fn upstream_error(err: DataServiceError) -> Response {
    record_tool_failure();
    (
        StatusCode::BAD_GATEWAY,
        Json(ToolResponse::<Value>::failure(CODE_UPSTREAM_FAILURE, err.to_string())),
    )
        .into_response()
}
