//! 健康检查与工具目录。
//!
//! - GET /health
//! - GET /tools

use api_contract::ToolDescriptor;
use axum::{Json, response::IntoResponse};

/// 工具目录，顺序即注册顺序。
pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "get_event_data",
        description: "获取停电事件基本信息。",
    },
    ToolDescriptor {
        name: "get_weather_data",
        description: "获取停电时间沿线天气分析数据，封装对天气数据服务的调用。",
    },
    ToolDescriptor {
        name: "work_order_query_tool",
        description: "沿线诉求工单查询工具，获取沿线历史及当前客户工单信息。",
    },
    ToolDescriptor {
        name: "weather_data_processing",
        description: "处理并总结天气数据，获取天气数据后调用此工具处理天气数据并生成汇总天气信息",
    },
    ToolDescriptor {
        name: "environment_data_processing",
        description: "处理总结环境信息",
    },
    ToolDescriptor {
        name: "get_drone_analysis",
        description: "获取无人机图片分析结果",
    },
    ToolDescriptor {
        name: "get_environment_raw_data",
        description: "获取原始环境数据",
    },
    ToolDescriptor {
        name: "get_message_data",
        description: "获取保护报文数据，封装对保护报文数据服务的调用",
    },
    ToolDescriptor {
        name: "get_wave_data",
        description: "获取录波数据，封装对录播数据服务的调用",
    },
    ToolDescriptor {
        name: "message_data_processing",
        description: "处理并总结报文、录波数据，生成报文智能体的输入数据",
    },
    ToolDescriptor {
        name: "get_device_info_data",
        description: "获取设备信息数据，封装对设备数据服务的调用。",
    },
    ToolDescriptor {
        name: "process_device_info_data",
        description: "处理设备信息数据，生成大模型输入参数。",
    },
];

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn list_tools() -> impl IntoResponse {
    Json(TOOLS)
}
