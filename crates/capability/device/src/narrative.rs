//! 风险设备描述生成。

use crate::record::DeviceRecord;
use serde::Serialize;
use std::collections::HashSet;

/// 风险描述条数上限。
pub const MAX_RISK_NARRATIVES: usize = 10;

/// 单条设备风险描述。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskNarrative {
    #[serde(rename = "设备名称")]
    pub device_name: String,
    #[serde(rename = "设备类型")]
    pub device_type: String,
    #[serde(rename = "风险描述")]
    pub description: String,
}

/// 拼接单个设备的风险描述：投运时间、近 90 天、历史同期、家族性缺陷，按条件依次追加。
pub fn describe_device_risk(device: &DeviceRecord) -> String {
    let mut clauses = Vec::new();

    if !device.run_time.is_empty() {
        clauses.push(format!("该设备于{}投运。", device.run_time));
    }

    let mut recent = Vec::new();
    if device.fault_count > 0 {
        recent.push("存在故障未处理");
    }
    if device.defect_count > 0 {
        recent.push("存在缺陷未进行消缺");
    }
    if device.hidden_count > 0 {
        recent.push("存在隐患还未完成治理并验收");
    }
    if !recent.is_empty() {
        clauses.push(format!(
            "近90天内最近一次的数据显示, 该设备{}。",
            recent.join(",")
        ));
    }

    let mut history = Vec::new();
    if device.fault_history_count() > 0 {
        history.push("存在故障的历史记录");
    }
    if device.defect_history_count() > 0 {
        history.push("存在缺陷的历史记录");
    }
    if device.hidden_history_count() > 0 {
        history.push("存在隐患的历史记录");
    }
    if !history.is_empty() {
        clauses.push(format!(
            "根据历史同期的数据显示, 该设备{}。",
            history.join(",")
        ));
    }

    if device.has_family_defect {
        clauses.push("存在家族性缺陷".to_string());
    }

    clauses.concat()
}

/// 为风险设备生成描述，按描述文本去重，最多保留 [`MAX_RISK_NARRATIVES`] 条。
pub fn build_risk_narratives(devices: &[DeviceRecord]) -> Vec<RiskNarrative> {
    let mut seen = HashSet::new();
    let mut narratives = Vec::new();

    for device in devices.iter().filter(|device| device.is_at_risk()) {
        if narratives.len() >= MAX_RISK_NARRATIVES {
            break;
        }
        let description = describe_device_risk(device);
        if !seen.insert(description.clone()) {
            continue;
        }
        narratives.push(RiskNarrative {
            device_name: device.device_name.clone(),
            device_type: device.device_type_name.to_string(),
            description,
        });
    }

    narratives
}
