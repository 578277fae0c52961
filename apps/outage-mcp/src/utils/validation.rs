//! 工具参数校验。

use crate::utils::response::invalid_argument;
use api_contract::{AnalysisType, InvalidAnalysisType};
use axum::{Json, extract::rejection::JsonRejection, response::Response};

/// 解析工具参数，格式错误时返回 400 信封而不是 axum 默认的纯文本。
pub fn tool_args<T>(args: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match args {
        Ok(Json(args)) => Ok(args),
        Err(rejection) => Err(invalid_argument(format!(
            "工具参数解析失败: {}",
            rejection.body_text()
        ))),
    }
}

/// 验证必填字段，去除空格并检查非空。
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid_argument(format!("{field} 不能为空")));
    }
    Ok(trimmed.to_string())
}

/// analysis_type 仅允许 1 或 2。
pub fn require_analysis_type(value: i64) -> Result<AnalysisType, Response> {
    AnalysisType::try_from(value).map_err(|InvalidAnalysisType(value)| {
        tracing::warn!(analysis_type = value, "analysis_type 不合法");
        invalid_argument(InvalidAnalysisType::MESSAGE)
    })
}
