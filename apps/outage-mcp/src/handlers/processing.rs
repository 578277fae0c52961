//! 数据处理工具：纯计算，结果以信封形式返回（HTTP 200）。
//!
//! - POST /tools/weather_data_processing
//! - POST /tools/environment_data_processing
//! - POST /tools/message_data_processing
//! - POST /tools/process_device_info_data

use crate::utils::{envelope, tool_args};
use api_contract::{
    DeviceDataRequest, EnvironmentDataRequest, MessageDataRequest, WeatherDataRequest,
};
use axum::{Json, extract::rejection::JsonRejection, response::Response};
use outage_device::process_device_info_data;
use outage_environment::process_environment_data;
use outage_message::process_message_data;
use outage_telemetry::record_tool_call;
use outage_weather::process_weather_data;

/// 处理并总结天气数据
pub async fn weather_data_processing(
    args: Result<Json<WeatherDataRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    match tool_args(args) {
        Ok(req) => envelope(process_weather_data(&req.weather_data)),
        Err(response) => response,
    }
}

/// 处理总结环境信息
pub async fn environment_data_processing(
    args: Result<Json<EnvironmentDataRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    match tool_args(args) {
        Ok(req) => envelope(process_environment_data(&req.environment, req.outage_date)),
        Err(response) => response,
    }
}

/// 处理报文与录波数据
pub async fn message_data_processing(
    args: Result<Json<MessageDataRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    match tool_args(args) {
        Ok(req) => envelope(process_message_data(&req.res, &req.wave_data_str)),
        Err(response) => response,
    }
}

/// 处理设备信息数据，生成大模型输入参数
pub async fn process_device_info(
    args: Result<Json<DeviceDataRequest>, JsonRejection>,
) -> Response {
    record_tool_call();
    match tool_args(args) {
        Ok(req) => envelope(process_device_info_data(&req.device_data)),
        Err(response) => response,
    }
}
