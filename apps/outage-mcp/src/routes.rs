//! 路由定义
//!
//! 每个工具对应一个 `POST /tools/{name}`，参数为 JSON 对象；
//! 另有 `/health`、`/tools`（工具目录）与 `/metrics`。

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_tool_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/tools", get(list_tools))
        .route("/tools/get_event_data", post(get_event_data))
        .route("/tools/get_weather_data", post(get_weather_data))
        .route("/tools/work_order_query_tool", post(work_order_query_tool))
        .route("/tools/weather_data_processing", post(weather_data_processing))
        .route(
            "/tools/environment_data_processing",
            post(environment_data_processing),
        )
        .route("/tools/get_drone_analysis", post(get_drone_analysis))
        .route("/tools/get_environment_raw_data", post(get_environment_raw_data))
        .route("/tools/get_message_data", post(get_message_data))
        .route("/tools/get_wave_data", post(get_wave_data))
        .route("/tools/message_data_processing", post(message_data_processing))
        .route("/tools/get_device_info_data", post(get_device_info_data))
        .route("/tools/process_device_info_data", post(process_device_info))
}
