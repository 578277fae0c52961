//! 稳定的工具请求 DTO 与工具响应契约。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 处理成功。
pub const CODE_SUCCESS: i64 = 10000;
/// 数据校验失败（输入结构不合法、无有效数据）。
pub const CODE_VALIDATION_FAILURE: i64 = 9999;
/// 调用方传入的 JSON 文本解析或处理失败。
pub const CODE_PROCESSING_FAILURE: i64 = 500;
/// 工具参数不合法。
pub const CODE_INVALID_ARGUMENT: i64 = 400;
/// 后端数据服务调用失败。
pub const CODE_UPSTREAM_FAILURE: i64 = 502;

/// 标准工具响应封装：`{code, success, data, msg}`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse<T = Value> {
    pub code: i64,
    pub success: bool,
    pub data: Option<T>,
    pub msg: String,
}

impl<T> ToolResponse<T> {
    pub fn success(data: T, msg: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            success: true,
            data: Some(data),
            msg: msg.into(),
        }
    }

    pub fn failure(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            success: false,
            data: None,
            msg: msg.into(),
        }
    }

    /// 校验失败（code 9999）。
    pub fn validation_failure(msg: impl Into<String>) -> Self {
        Self::failure(CODE_VALIDATION_FAILURE, msg)
    }

    /// 处理失败（code 500）。
    pub fn processing_failure(msg: impl Into<String>) -> Self {
        Self::failure(CODE_PROCESSING_FAILURE, msg)
    }
}

impl<T: Serialize> ToolResponse<T> {
    /// 擦除 data 类型，便于统一输出。
    pub fn into_value(self) -> ToolResponse<Value> {
        ToolResponse {
            code: self.code,
            success: self.success,
            data: self
                .data
                .map(|data| serde_json::to_value(data).unwrap_or(Value::Null)),
            msg: self.msg,
        }
    }
}

/// 分析类型：1 事中分析，2 事后分析。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i64")]
pub enum AnalysisType {
    InProgress,
    PostEvent,
}

/// 非法 analysis_type。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAnalysisType(pub i64);

impl InvalidAnalysisType {
    pub const MESSAGE: &'static str = "analysis_type 仅支持 1（事中分析）或 2（事后分析）。";
}

impl TryFrom<i64> for AnalysisType {
    type Error = InvalidAnalysisType;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::InProgress),
            2 => Ok(Self::PostEvent),
            other => Err(InvalidAnalysisType(other)),
        }
    }
}

impl From<AnalysisType> for i64 {
    fn from(value: AnalysisType) -> Self {
        match value {
            AnalysisType::InProgress => 1,
            AnalysisType::PostEvent => 2,
        }
    }
}

/// 仅含停电编号的工具参数。
#[derive(Debug, Deserialize)]
pub struct OutageRequest {
    #[serde(alias = "outageNumber")]
    pub outage_number: String,
}

/// 停电编号 + 分析类型的工具参数（analysis_type 在 handler 中校验）。
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(alias = "outageNumber")]
    pub outage_number: String,
    #[serde(alias = "analysisType")]
    pub analysis_type: i64,
}

/// 后端请求体：`{outageNumber, analysisType}`。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub outage_number: String,
    pub analysis_type: AnalysisType,
}

/// 后端请求体：`{outageNumber}`。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutagePayload {
    pub outage_number: String,
}

/// 无人机分析查询参数。
#[derive(Debug, Deserialize)]
pub struct DroneAnalysisRequest {
    #[serde(alias = "outageNumber")]
    pub outage_number: String,
    #[serde(alias = "towerIds", default)]
    pub tower_ids: Vec<String>,
}

/// 无人机分析后端请求体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneAnalysisPayload {
    pub outage_number: String,
    pub tower_ids: Vec<String>,
}

/// 设备信息处理参数。
#[derive(Debug, Deserialize)]
pub struct DeviceDataRequest {
    pub device_data: Value,
}

/// 天气数据处理参数。
#[derive(Debug, Deserialize)]
pub struct WeatherDataRequest {
    pub weather_data: Value,
}

/// 环境信息处理参数。
#[derive(Debug, Deserialize)]
pub struct EnvironmentDataRequest {
    pub environment: Value,
    pub outage_date: NaiveDate,
}

/// 报文与录波处理参数（均为 JSON 文本）。
#[derive(Debug, Deserialize)]
pub struct MessageDataRequest {
    pub res: String,
    pub wave_data_str: String,
}

/// 工具目录项。
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

/// 工具调用指标快照。
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshotDto {
    pub tool_calls: u64,
    pub tool_failures: u64,
    pub upstream_errors: u64,
    pub skipped_records: u64,
    pub degraded_assessments: u64,
}
