//! 设备信息汇总：生成研判大模型的设备输入参数。
//!
//! 只有顶层结构不合法时才整体失败；单条设备记录有问题时跳过或取默认值。

use crate::narrative::{RiskNarrative, build_risk_narratives};
use crate::record::{DeviceRecord, RawDevice};
use crate::risk::{RiskLevel, calculate_device_risk_at};
use crate::topology::{DeviceForest, get_affiliated_psr_id};
use api_contract::ToolResponse;
use chrono::{Local, NaiveDateTime};
use domain::lenient::{flag_from_value, str_field, string_from_value};
use domain::{DeviceCategory, PsrType};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

pub const MSG_SUCCESS: &str = "设备数据处理成功";
pub const MSG_FETCH_FAILED: &str = "设备数据获取失败";
pub const MSG_FORMAT_ERROR: &str = "设备数据格式错误";
pub const MSG_NO_DEVICE: &str = "无有效设备数据";

const NO_SOURCE: &str = "无数据来源";
/// 档距超过该值（米）时提示档距过大。
const LARGE_SPAN_METERS: f64 = 100.0;

/// 按设备类别的统计。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    #[serde(rename = "设备类型")]
    pub category: String,
    #[serde(rename = "总数")]
    pub total: usize,
    #[serde(rename = "风险数")]
    pub risk: usize,
    #[serde(rename = "风险比例")]
    pub risk_ratio: f64,
    #[serde(rename = "近90天内故障数量")]
    pub recent_fault: i64,
    #[serde(rename = "近90天内缺陷数量")]
    pub recent_defect: i64,
    #[serde(rename = "近90天内隐患数量")]
    pub recent_hazard: i64,
    #[serde(rename = "历史故障数量")]
    pub history_fault: usize,
    #[serde(rename = "历史缺陷数量")]
    pub history_defect: usize,
    #[serde(rename = "历史隐患数量")]
    pub history_hazard: usize,
    #[serde(rename = "家族性缺陷数量")]
    pub family_defect: i64,
    #[serde(rename = "家族性隐患数量")]
    pub family_hazard: i64,
    #[serde(rename = "家族性故障数量")]
    pub family_fault: i64,
}

impl CategoryStat {
    fn new(category: DeviceCategory) -> Self {
        Self {
            category: category.label().to_string(),
            total: 0,
            risk: 0,
            risk_ratio: 0.0,
            recent_fault: 0,
            recent_defect: 0,
            recent_hazard: 0,
            history_fault: 0,
            history_defect: 0,
            history_hazard: 0,
            family_defect: 0,
            family_hazard: 0,
            family_fault: 0,
        }
    }

    fn add(&mut self, device: &DeviceRecord) {
        // 后端计数不可信，累加一律饱和。
        self.total = self.total.saturating_add(1);
        if device.assessment.risk_level == RiskLevel::Yes {
            self.risk = self.risk.saturating_add(1);
        }
        self.recent_fault = self.recent_fault.saturating_add(device.fault_count);
        self.recent_defect = self.recent_defect.saturating_add(device.defect_count);
        self.recent_hazard = self.recent_hazard.saturating_add(device.hidden_count);
        self.history_fault = self.history_fault.saturating_add(device.fault_history_count());
        self.history_defect = self
            .history_defect
            .saturating_add(device.defect_history_count());
        self.history_hazard = self
            .history_hazard
            .saturating_add(device.hidden_history_count());
        self.family_defect = self.family_defect.saturating_add(device.family_defect_count);
        self.family_hazard = self.family_hazard.saturating_add(device.family_hazard_count);
        self.family_fault = self.family_fault.saturating_add(device.family_fault_count);
        self.risk_ratio = if self.total > 0 {
            self.risk as f64 / self.total as f64
        } else {
            0.0
        };
    }
}

/// 判定依据。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeBasis {
    #[serde(rename = "线路导线类型")]
    pub line_wire: String,
    #[serde(rename = "风险设备数描述")]
    pub risk_devices: String,
    #[serde(rename = "重过载")]
    pub overload: String,
}

/// 设备研判输入参数。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceAnalysis {
    #[serde(rename = "设备类型统计")]
    pub category_stats: Vec<CategoryStat>,
    #[serde(rename = "线路导线类型")]
    pub line_wire: String,
    #[serde(rename = "风险设备数描述")]
    pub risk_devices: String,
    #[serde(rename = "重过载")]
    pub overload: String,
    #[serde(rename = "设备风险描述")]
    pub risk_narratives: Vec<RiskNarrative>,
    #[serde(rename = "判定依据")]
    pub judge_basis: JudgeBasis,
    #[serde(rename = "存在风险的设备数")]
    pub risk_device_count: usize,
    pub outage_number: String,
}

/// 线路级描述信息，一次遍历全部设备得到。
#[derive(Debug, Clone, PartialEq)]
pub struct LineProfile {
    pub max_span: f64,
    pub line_name: String,
    pub line_type: String,
    pub wire_type: String,
    pub rated_state: String,
}

impl LineProfile {
    pub fn from_devices(devices: &[DeviceRecord]) -> Self {
        let mut profile = Self {
            max_span: 0.0,
            line_name: String::new(),
            line_type: NO_SOURCE.to_string(),
            wire_type: NO_SOURCE.to_string(),
            rated_state: String::new(),
        };
        let mut wire_found = false;

        for device in devices {
            if device.span > profile.max_span {
                profile.max_span = device.span;
            }
            if profile.line_name.is_empty() && !device.line_name.is_empty() {
                profile.line_name = device.line_name.clone();
            }
            if !wire_found && !device.line_type.is_empty() && !device.wire_type.is_empty() {
                profile.line_type = device.line_type.clone();
                profile.wire_type = device.wire_type.clone();
                wire_found = true;
            }
            if profile.rated_state.is_empty() && !device.rated_state.is_empty() {
                profile.rated_state = device.rated_state.clone();
            }
        }

        profile
    }

    /// 线路与导线类型描述，档距过大时追加提示。
    pub fn line_wire_description(&self) -> String {
        let span_note = if self.max_span > LARGE_SPAN_METERS {
            format!(",且线路上杆塔存在档距过大(最大档距为 {} 米)", self.max_span)
        } else {
            String::new()
        };
        if self.wire_type == "其他" {
            format!("{}为{}线路{}.", self.line_name, self.line_type, span_note)
        } else {
            format!(
                "{}为{}线路, 导线类型为{}{}.",
                self.line_name, self.line_type, self.wire_type, span_note
            )
        }
    }

    /// 重过载描述，仅在额定状态包含“过载”或“重载”时生成。
    pub fn overload_description(&self) -> String {
        if self.rated_state.contains("过载") || self.rated_state.contains("重载") {
            format!("该线路在停电事件发生前处于{}运行状态", self.rated_state)
        } else {
            String::new()
        }
    }
}

/// 设备精简信息。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub name: String,
    pub psr_id: String,
    #[serde(rename = "psrType")]
    pub psr_type: String,
}

/// 将原始设备列表精简为 `{name, psr_id, psrType}`，非数组输入返回空列表。
pub fn process_device_list(device_list: &Value) -> Vec<DeviceSummary> {
    let Some(items) = device_list.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| DeviceSummary {
            name: str_field(item, "name").to_string(),
            psr_id: str_field(item, "psr_id").to_string(),
            psr_type: str_field(item, "psrType").to_string(),
        })
        .collect()
}

/// 按 `psr_id` 去重：保留首次出现的记录，跳过非对象与空 ID。
pub fn dedup_by_psr_id(items: &[Value]) -> Vec<&Value> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| item.is_object())
        .filter(|item| {
            let psr_id = item.get("psr_id").map(string_from_value).unwrap_or_default();
            !psr_id.is_empty() && seen.insert(psr_id)
        })
        .collect()
}

/// 按设备类别统计，类别按首次出现的顺序输出。
pub fn category_statistics(devices: &[DeviceRecord]) -> Vec<CategoryStat> {
    let mut positions: HashMap<DeviceCategory, usize> = HashMap::new();
    let mut stats: Vec<CategoryStat> = Vec::new();
    for device in devices {
        let category = device.psr_type.category();
        let position = *positions.entry(category).or_insert_with(|| {
            stats.push(CategoryStat::new(category));
            stats.len() - 1
        });
        stats[position].add(device);
    }
    stats
}

/// 处理设备信息数据并生成研判大模型输入参数。
pub fn process_device_info_data(device_data: &Value) -> ToolResponse<DeviceAnalysis> {
    process_device_info_data_at(device_data, Local::now().naive_local())
}

/// 以给定时间为“现在”处理设备信息数据。
pub fn process_device_info_data_at(
    device_data: &Value,
    now: NaiveDateTime,
) -> ToolResponse<DeviceAnalysis> {
    if !device_data.is_object() {
        return ToolResponse::validation_failure(MSG_FORMAT_ERROR);
    }

    if !device_data.get("success").is_some_and(flag_from_value) {
        let msg = match device_data.get("msg") {
            Some(Value::String(msg)) => msg.clone(),
            _ => MSG_FETCH_FAILED.to_string(),
        };
        return ToolResponse::validation_failure(msg);
    }

    let Some(items) = device_data.get("data").and_then(Value::as_array) else {
        return ToolResponse::validation_failure(MSG_FORMAT_ERROR);
    };

    let unique = dedup_by_psr_id(items);
    if unique.is_empty() {
        return ToolResponse::validation_failure(MSG_NO_DEVICE);
    }

    let raw_devices = read_raw_devices(&unique);
    let mut devices = build_device_records(&raw_devices);

    for device in devices.iter_mut() {
        device.assessment = calculate_device_risk_at(device, now);
    }
    let risk_device_count = devices.iter().filter(|device| device.is_at_risk()).count();

    let forest = DeviceForest::build(&devices);
    tracing::debug!(
        roots = forest.roots.len(),
        attached = forest.attached_count(),
        orphans = forest.orphans.len(),
        "设备树构建完成"
    );

    let category_stats = category_statistics(&devices);
    let profile = LineProfile::from_devices(&devices);
    let risk_narratives = build_risk_narratives(&devices);

    let line_wire = profile.line_wire_description();
    let risk_devices = format!(
        "根据设备近期及历史同期的隐患、缺陷、故障、巡视记录、设备家族性缺陷推断该线路上目前有{risk_device_count}个设备存在风险；"
    );
    let overload = profile.overload_description();

    tracing::info!(
        devices = devices.len(),
        risk_devices = risk_device_count,
        categories = category_stats.len(),
        "设备数据处理完成"
    );

    ToolResponse::success(
        DeviceAnalysis {
            category_stats,
            line_wire: line_wire.clone(),
            risk_devices: risk_devices.clone(),
            overload: overload.clone(),
            risk_narratives,
            judge_basis: JudgeBasis {
                line_wire,
                risk_devices,
                overload,
            },
            risk_device_count,
            outage_number: str_field(device_data, "outageNumber").to_string(),
        },
        MSG_SUCCESS,
    )
}

fn read_raw_devices(unique: &[&Value]) -> Vec<RawDevice> {
    let mut skipped = 0u64;
    let raw_devices = unique
        .iter()
        .filter_map(|item| match serde_json::from_value::<RawDevice>((*item).clone()) {
            Ok(raw) => Some(raw),
            Err(err) => {
                skipped += 1;
                tracing::warn!(
                    psr_id = %str_field(item, "psr_id"),
                    error = %err,
                    "跳过无法解析的设备记录"
                );
                None
            }
        })
        .collect();
    if skipped > 0 {
        outage_telemetry::record_skipped_records(skipped);
    }
    raw_devices
}

/// 构建设备记录并补充所属设备的缺陷，虚拟电缆设备暂不处理。
fn build_device_records(raw_devices: &[RawDevice]) -> Vec<DeviceRecord> {
    let mut devices: Vec<DeviceRecord> = raw_devices
        .iter()
        .filter(|raw| raw.device_type() != PsrType::VirtualCable)
        .map(|raw| DeviceRecord::from_raw(raw, get_affiliated_psr_id(raw_devices, raw)))
        .collect();

    let index: HashMap<&str, usize> = devices
        .iter()
        .enumerate()
        .map(|(position, device)| (device.psr_id.as_str(), position))
        .collect();
    let inherited: Vec<Option<usize>> = devices
        .iter()
        .enumerate()
        .map(|(position, device)| {
            index
                .get(device.affiliated_psr_id.as_str())
                .copied()
                .filter(|&parent| parent != position)
        })
        .collect();

    for (position, parent) in inherited.into_iter().enumerate() {
        if let Some(parent) = parent {
            devices[position].parent_defect_list = devices[parent].defect_list.clone();
        }
    }

    devices
}
