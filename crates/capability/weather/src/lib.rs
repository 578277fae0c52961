//! 天气风险汇总。
//!
//! 输入后端天气画像数据，输出风险设备比例、风险可能性等级、
//! 按设备类型归并的风险描述以及天气关键字对应的故障风险。

use api_contract::ToolResponse;
use domain::lenient::{count_from_value, str_field};
use domain::PsrType;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const MSG_SUCCESS: &str = "操作成功";
pub const MSG_NO_DEVICE: &str = "无设备数据";
pub const MSG_FORMAT_ERROR: &str = "天气数据格式错误";

/// 风险可能性等级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskPossibility {
    #[serde(rename = "低")]
    Low,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "高")]
    High,
}

impl RiskPossibility {
    /// 比例 < 0.1 为低，< 0.3 为中，其余为高；边界值归入上一档。
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.1 {
            Self::Low
        } else if ratio < 0.3 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "低",
            Self::Medium => "中",
            Self::High => "高",
        }
    }
}

pub fn determine_risk_possibility_level(ratio: f64) -> RiskPossibility {
    RiskPossibility::from_ratio(ratio)
}

/// 同一设备类型下的风险描述。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskStatement {
    pub device_type: String,
    pub risk_descriptions: Vec<String>,
}

/// 天气汇总结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub weather_desc: Option<String>,
    pub temperature_range: Value,
    pub rainfall_range: Value,
    pub humidity_range: Value,
    pub wind_speed_range: Value,
    pub lightning_strike_count: usize,
    pub risk_device_percentage: f64,
    pub risk_possibility_level: RiskPossibility,
    pub risk_statements_by_type: Vec<RiskStatement>,
    pub weather_fault_risks: Vec<&'static str>,
}

/// 展平设备列表：顶层设备后紧跟其 `riskDeviceList` 子设备，只展开一层。
pub fn process_weather_device_list(device_list: Option<&Value>) -> Vec<&Value> {
    let Some(devices) = device_list.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut flattened = Vec::new();
    for device in devices.iter().filter(|device| device.is_object()) {
        flattened.push(device);
        if let Some(nested) = device.get("riskDeviceList").and_then(Value::as_array) {
            flattened.extend(nested.iter().filter(|child| child.is_object()));
        }
    }
    flattened
}

/// 按设备类型归并非空风险描述，类型与描述均按字典序排列并去重。
pub fn generate_risk_statements(risk_devices: &[&Value]) -> Vec<RiskStatement> {
    let mut aggregation: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for device in risk_devices {
        let description = str_field(device, "riskDesc").trim();
        if description.is_empty() {
            continue;
        }
        let device_type = PsrType::from_code(str_field(device, "psrType")).display_name();
        aggregation
            .entry(device_type)
            .or_default()
            .insert(description.to_string());
    }
    aggregation
        .into_iter()
        .map(|(device_type, descriptions)| RiskStatement {
            device_type: device_type.to_string(),
            risk_descriptions: descriptions.into_iter().collect(),
        })
        .collect()
}

/// 天气描述中出现的每个关键字按知识库顺序追加故障风险，去重后保留首次出现的顺序。
pub fn match_weather_fault_risks(weather_desc: &str) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    domain::WEATHER_FAULT_RISKS
        .iter()
        .filter(|(keyword, _)| weather_desc.contains(*keyword))
        .flat_map(|(_, risks)| risks.iter().copied())
        .filter(|risk| seen.insert(*risk))
        .collect()
}

/// 处理天气数据并生成汇总信息，`deviceNum` 为 0 时返回失败信封。
pub fn process_weather_data(weather_data: &Value) -> ToolResponse<WeatherSummary> {
    if !weather_data.is_object() {
        return ToolResponse::validation_failure(MSG_FORMAT_ERROR);
    }

    let total_devices = weather_data.get("deviceNum").map(count_from_value).unwrap_or(0);
    let risk_count = weather_data
        .get("riskDeviceNum")
        .map(count_from_value)
        .unwrap_or(0);
    if total_devices == 0 {
        tracing::warn!("天气数据中设备总数为 0");
        return ToolResponse::validation_failure(MSG_NO_DEVICE);
    }

    let mut risk_devices = process_weather_device_list(weather_data.get("towerDeviceList"));
    risk_devices.extend(process_weather_device_list(weather_data.get("stationDeviceList")));

    // 风险设备数可能大于设备总数，比例截断到 [0, 1]。
    let ratio = (risk_count as f64 / total_devices as f64).clamp(0.0, 1.0);
    let fact_range = weather_data.get("deviceFactRange");
    let range = |key: &str| {
        fact_range
            .and_then(|range| range.get(key))
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    };
    let weather_desc = weather_data
        .get("weather")
        .and_then(Value::as_str)
        .map(str::to_string);
    let lightning_strike_count = weather_data
        .get("lightningDetectionData")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let summary = WeatherSummary {
        temperature_range: range("temperatureRange"),
        rainfall_range: range("rainfallRange"),
        humidity_range: range("humidityRange"),
        wind_speed_range: range("windSpeedRange"),
        lightning_strike_count,
        risk_device_percentage: ratio,
        risk_possibility_level: RiskPossibility::from_ratio(ratio),
        risk_statements_by_type: generate_risk_statements(&risk_devices),
        weather_fault_risks: weather_desc
            .as_deref()
            .map(match_weather_fault_risks)
            .unwrap_or_default(),
        weather_desc,
    };

    tracing::info!(
        devices = total_devices,
        risk_devices = risk_count,
        level = summary.risk_possibility_level.as_str(),
        "天气数据处理完成"
    );

    ToolResponse::success(summary, MSG_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::weather_fault_risks;
    use serde_json::json;

    #[test]
    fn flatten_only_one_level() {
        let list = json!([
            { "psr_id": "T1", "riskDeviceList": [
                { "psr_id": "T1-1", "riskDeviceList": [{ "psr_id": "T1-1-1" }] },
                "junk"
            ] },
            42,
            { "psr_id": "T2", "riskDeviceList": null }
        ]);
        let ids: Vec<&str> = process_weather_device_list(Some(&list))
            .into_iter()
            .map(|device| str_field(device, "psr_id"))
            .collect();
        assert_eq!(ids, vec!["T1", "T1-1", "T2"]);
        assert!(process_weather_device_list(None).is_empty());
    }

    #[test]
    fn statements_are_grouped_and_sorted() {
        let devices = [
            json!({ "psrType": "0103", "riskDesc": " 风偏放电 " }),
            json!({ "psrType": "0103", "riskDesc": "倒杆" }),
            json!({ "psrType": "0103", "riskDesc": "倒杆" }),
            json!({ "psrType": "0305", "riskDesc": "" }),
            json!({ "psrType": "9999", "riskDesc": "进水" }),
        ];
        let refs: Vec<&Value> = devices.iter().collect();
        let statements = generate_risk_statements(&refs);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].device_type, "其他");
        assert_eq!(statements[1].device_type, "杆塔");
        assert_eq!(statements[1].risk_descriptions, vec!["倒杆", "风偏放电"]);
    }

    #[test]
    fn risk_levels_follow_buckets() {
        assert_eq!(determine_risk_possibility_level(0.05), RiskPossibility::Low);
        assert_eq!(determine_risk_possibility_level(0.1), RiskPossibility::Medium);
        assert_eq!(determine_risk_possibility_level(0.3), RiskPossibility::High);
        assert_eq!(determine_risk_possibility_level(0.95), RiskPossibility::High);
    }

    #[test]
    fn keyword_risks_keep_table_order() {
        let mut expected: Vec<&str> = Vec::new();
        for keyword in ["大风", "强降雨"] {
            for risk in weather_fault_risks(keyword).unwrap_or_default() {
                if !expected.contains(risk) {
                    expected.push(*risk);
                }
            }
        }
        assert_eq!(match_weather_fault_risks("大风强降雨"), expected);
        assert_eq!(match_weather_fault_risks("强降雨伴大风"), expected);
        assert!(match_weather_fault_risks("晴").is_empty());
    }
}
