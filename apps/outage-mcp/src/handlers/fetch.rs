//! 数据获取工具：转发到后端数据服务，后端响应原样返回。
//!
//! - POST /tools/get_event_data
//! - POST /tools/get_weather_data
//! - POST /tools/work_order_query_tool
//! - POST /tools/get_drone_analysis
//! - POST /tools/get_environment_raw_data（补充地貌与市政施工地址）
//! - POST /tools/get_message_data
//! - POST /tools/get_wave_data（GET 查询参数）
//! - POST /tools/get_device_info_data

use crate::AppState;
use crate::utils::{
    envelope, invalid_argument, normalize_required, passthrough, require_analysis_type, tool_args,
    upstream_error,
};
use api_contract::{
    AnalysisPayload, AnalysisRequest, DroneAnalysisPayload, DroneAnalysisRequest, OutagePayload,
    OutageRequest, ToolResponse,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, response::Response};
use outage_environment::{LANDFORM_UNKNOWN, normalize_landform, work_address_info};
use outage_telemetry::record_tool_call;
use serde::Serialize;
use serde_json::Value;

pub const EVENT_QUERY_PATH: &str = "/outage/event/query";
pub const WEATHER_PORTRAIT_PATH: &str = "/api/weather/data/portrait";
pub const APPEAL_LIST_PATH: &str = "/appeal/appealListByOutageNumber";
pub const DRONE_ANALYSIS_PATH: &str = "/api/drone/analysis";
/// 设备与环境原始数据共用同一接口。
pub const AGENT_DATA_PATH: &str = "/outage-data/test/agent";
pub const MESSAGE_QUERY_PATH: &str =
    "/outage-data/outage/event/realMeasCenter/event/commonQuery/query";
pub const WAVE_ANALYSE_PATH: &str = "/outage-data/outage/event/luboAnalyse";

/// 获取停电事件基本信息
pub async fn get_event_data(
    State(state): State<AppState>,
    args: Result<Json<OutageRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match outage_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    forward_post(&state, EVENT_QUERY_PATH, &payload).await
}

/// 获取沿线天气分析数据
pub async fn get_weather_data(
    State(state): State<AppState>,
    args: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match analysis_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    forward_post(&state, WEATHER_PORTRAIT_PATH, &payload).await
}

/// 沿线诉求工单查询
pub async fn work_order_query_tool(
    State(state): State<AppState>,
    args: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match analysis_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    forward_post(&state, APPEAL_LIST_PATH, &payload).await
}

/// 获取无人机图片分析结果
pub async fn get_drone_analysis(
    State(state): State<AppState>,
    args: Result<Json<DroneAnalysisRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let req = match tool_args(args) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let outage_number = match normalize_required(req.outage_number, "outage_number") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let payload = DroneAnalysisPayload {
        outage_number,
        tower_ids: req.tower_ids,
    };
    forward_post(&state, DRONE_ANALYSIS_PATH, &payload).await
}

/// 获取原始环境数据，并为每条记录补充 `landform` 与 `workAddress`
pub async fn get_environment_raw_data(
    State(state): State<AppState>,
    args: Result<Json<OutageRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match outage_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let body = match serde_json::to_value(&payload) {
        Ok(body) => body,
        Err(err) => return invalid_argument(err.to_string()),
    };
    let raw = match state.data_service.post(AGENT_DATA_PATH, body).await {
        Ok(raw) => raw,
        Err(err) => return upstream_error(err),
    };

    let mut infos = match raw {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    if let Value::Array(records) = &mut infos {
        for record in records.iter_mut() {
            enrich_environment_record(&state, record).await;
        }
        tracing::info!(records = records.len(), "环境原始数据补充完成");
    }

    envelope(ToolResponse::success(infos, "操作成功"))
}

async fn enrich_environment_record(state: &AppState, record: &mut Value) {
    if !record.is_object() {
        return;
    }
    let work_address = work_address_info(record);
    let geo_position = record
        .get("geoPosition")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|position| !position.is_empty())
        .map(str::to_string);
    let landform = match geo_position {
        Some(position) => normalize_landform(&state.landform.lookup(&position).await),
        None => LANDFORM_UNKNOWN.to_string(),
    };
    if let Value::Object(map) = record {
        map.insert("landform".to_string(), Value::String(landform));
        map.insert("workAddress".to_string(), Value::String(work_address));
    }
}

/// 获取保护报文数据
pub async fn get_message_data(
    State(state): State<AppState>,
    args: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match analysis_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    forward_post(&state, MESSAGE_QUERY_PATH, &payload).await
}

/// 获取录波数据（后端为 GET 接口，参数放在查询串中）
pub async fn get_wave_data(
    State(state): State<AppState>,
    args: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match analysis_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let params = match serde_json::to_value(&payload) {
        Ok(params) => params,
        Err(err) => return invalid_argument(err.to_string()),
    };
    match state.data_service.get(WAVE_ANALYSE_PATH, params).await {
        Ok(value) => passthrough(value),
        Err(err) => upstream_error(err),
    }
}

/// 获取设备信息数据
pub async fn get_device_info_data(
    State(state): State<AppState>,
    args: Result<Json<OutageRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    let payload = match outage_payload(args) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    forward_post(&state, AGENT_DATA_PATH, &payload).await
}

fn outage_payload(
    args: Result<Json<OutageRequest>, JsonRejection>,
) -> Result<OutagePayload, Response> {
    let req = tool_args(args)?;
    let outage_number = normalize_required(req.outage_number, "outage_number")?;
    Ok(OutagePayload { outage_number })
}

fn analysis_payload(
    args: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<AnalysisPayload, Response> {
    let req = tool_args(args)?;
    let analysis_type = require_analysis_type(req.analysis_type)?;
    let outage_number = normalize_required(req.outage_number, "outage_number")?;
    Ok(AnalysisPayload {
        outage_number,
        analysis_type,
    })
}

async fn forward_post(state: &AppState, path: &str, payload: &impl Serialize) -> Response {
    let body = match serde_json::to_value(payload) {
        Ok(body) => body,
        Err(err) => return invalid_argument(err.to_string()),
    };
    match state.data_service.post(path, body).await {
        Ok(value) => passthrough(value),
        Err(err) => upstream_error(err),
    }
}
