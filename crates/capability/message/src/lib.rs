//! 报文与录波数据处理。
//!
//! 两份输入均为 JSON 文本：报文（SOE 序列）与录波分析结果。
//! 输出一段按固定模板拼接的故障描述文本。

use api_contract::ToolResponse;
use domain::lenient::{list_field, string_from_value};
use serde::Serialize;
use serde_json::Value;

pub const MSG_SUCCESS: &str = "处理成功";
/// SOE 序列最多保留的条数。
pub const MAX_SOE_RECORDS: usize = 50;

const NO_WAVE_DATA: &str = "无数据";
const UNKNOWN_LINE: &str = "未知线路";

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("处理失败: {0}")]
    Malformed(&'static str),
}

/// 录波故障类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum WaveFaultType {
    OpenConductor,
    GroundFault,
    ShortCircuit,
    ThreePhase,
    Unclassified,
}

impl WaveFaultType {
    pub fn code(self) -> u8 {
        match self {
            Self::OpenConductor => 1,
            Self::GroundFault => 2,
            Self::ShortCircuit => 3,
            Self::ThreePhase => 4,
            Self::Unclassified => 5,
        }
    }
}

impl From<WaveFaultType> for u8 {
    fn from(value: WaveFaultType) -> Self {
        value.code()
    }
}

/// 按“三相 → 接地 → 短路 → 断线”的优先级判定故障类型，均未命中时保持 `current`。
pub fn get_wave_fault_type(condition: &str, current: WaveFaultType) -> WaveFaultType {
    if condition.contains("三相") {
        WaveFaultType::ThreePhase
    } else if condition.contains("接地") {
        WaveFaultType::GroundFault
    } else if condition.contains("短路") {
        WaveFaultType::ShortCircuit
    } else if condition.contains("断线") {
        WaveFaultType::OpenConductor
    } else {
        current
    }
}

/// 去除 markdown 标记、代码块围栏与转义换行，段落之间直接拼接。
pub fn clean_result(result: &str) -> String {
    result
        .split("\n\n")
        .map(|part| {
            part.replace('#', "")
                .replace("\\n", "")
                .replace("```json", "")
                .replace("```", "")
                .trim()
                .to_string()
        })
        .filter(|part| !part.is_empty())
        .collect()
}

/// 故障描述及录波判定出的故障类型。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageNarrative {
    pub text: String,
    pub wave_fault_type: WaveFaultType,
}

/// 解析两份 JSON 文本并生成故障描述。
pub fn build_message_narrative(
    res: &str,
    wave_data_str: &str,
) -> Result<MessageNarrative, MessageError> {
    let res_data: Value = serde_json::from_str(res)?;
    let wave_data: Value = serde_json::from_str(wave_data_str)?;
    if !res_data.is_object() {
        return Err(MessageError::Malformed("报文数据不是 JSON 对象"));
    }
    if !wave_data.is_object() {
        return Err(MessageError::Malformed("录波数据不是 JSON 对象"));
    }

    let waves = list_field(&wave_data, "data");
    let mut wave_analysis = NO_WAVE_DATA.to_string();
    let mut wave_fault_type = WaveFaultType::Unclassified;
    if let Some(wave) = waves.first() {
        if !wave.is_object() {
            return Err(MessageError::Malformed("录波记录不是 JSON 对象"));
        }
        let condition = wave.get("condition").map(string_from_value).unwrap_or_default();
        let line_id = match wave.get("lineId") {
            Some(value) if !value.is_null() => string_from_value(value),
            _ => UNKNOWN_LINE.to_string(),
        };
        wave_analysis = format!("根据录波数据显示, 10kV{line_id}发生{condition}故障");
        wave_fault_type = get_wave_fault_type(&condition, wave_fault_type);
    }

    let soe = soe_sequence(list_field(&res_data, "data"));

    let mut text = String::from("[故障简述] : 无;");
    if !soe.is_empty() || !waves.is_empty() {
        text.push_str(&format!("[故障录波判定结果] : {wave_analysis}"));
        text.push_str("[故障前后一段时间稳态波形] : 无.");
        if soe.is_empty() {
            text.push_str("[SOE序列] : 无.");
        } else {
            text.push_str(&format!("[SOE序列]{soe};"));
        }
    }

    Ok(MessageNarrative {
        text: clean_result(&text),
        wave_fault_type,
    })
}

/// 取内容非空的前 [`MAX_SOE_RECORDS`] 条 SOE，以全角逗号连接 `"{startTime} {content}"`。
fn soe_sequence(records: &[Value]) -> String {
    records
        .iter()
        .filter(|record| record.is_object())
        .filter_map(|record| {
            let content = record.get("content").map(string_from_value)?;
            if content.trim().is_empty() {
                return None;
            }
            let start_time = record.get("startTime").map(string_from_value).unwrap_or_default();
            Some(format!("{start_time} {content}"))
        })
        .take(MAX_SOE_RECORDS)
        .collect::<Vec<_>>()
        .join("，")
}

/// 处理报文与录波数据，解析或处理失败时返回 code 500 的信封。
pub fn process_message_data(res: &str, wave_data_str: &str) -> ToolResponse<String> {
    tracing::debug!(res_len = res.len(), wave_len = wave_data_str.len(), "收到报文与录波数据");
    match build_message_narrative(res, wave_data_str) {
        Ok(narrative) => {
            tracing::info!(
                wave_fault_type = narrative.wave_fault_type.code(),
                "报文数据处理完成"
            );
            ToolResponse::success(narrative.text, MSG_SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "报文数据处理失败");
            ToolResponse::processing_failure(err.to_string())
        }
    }
}
