//! 设备原始记录与研判用设备记录。

use crate::risk::RiskAssessment;
use domain::PsrType;
use domain::lenient;
use serde::Deserialize;
use serde_json::{Map, Value};

/// 缺陷记录。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DefectRecord {
    /// 消缺状态，"0" 表示未消除。
    #[serde(rename = "eliminatedState", default, deserialize_with = "lenient::string")]
    pub eliminated_state: String,
    /// 缺陷部件类型，如 "杆塔-本体"。
    #[serde(rename = "componentTypeName", default, deserialize_with = "lenient::string")]
    pub component_type_name: String,
}

impl DefectRecord {
    pub fn is_unresolved(&self) -> bool {
        self.eliminated_state == "0"
    }

    pub fn concerns(&self, component: &str) -> bool {
        self.component_type_name.contains(component)
    }
}

/// 故障记录。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaultRecord {
    #[serde(rename = "faultStatus", default, deserialize_with = "lenient::string")]
    pub fault_status: String,
}

impl FaultRecord {
    /// 01 未处理，02 处理中。
    pub fn is_open(&self) -> bool {
        matches!(self.fault_status.as_str(), "01" | "02")
    }
}

/// 隐患记录。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HazardRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: String,
}

impl HazardRecord {
    /// 16 未整改，09 整改中。
    pub fn is_open(&self) -> bool {
        matches!(self.state.as_str(), "16" | "09")
    }
}

/// 后端下发的单条设备数据。
///
/// 字段名与后端保持一致（包括 `geo_positon` 的拼写）；
/// 未声明的字段保留在 `extra` 中，供所属设备字段查表读取。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDevice {
    #[serde(default, deserialize_with = "lenient::string")]
    pub psr_id: String,
    #[serde(rename = "psrType", default, deserialize_with = "lenient::string")]
    pub psr_type: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub line_and_name: String,
    #[serde(rename = "geo_positon", default, deserialize_with = "lenient::string")]
    pub geo_position: String,

    #[serde(default, deserialize_with = "lenient::count")]
    pub fault: i64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub defect: i64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub hazard: i64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub patrol: i64,

    #[serde(rename = "faultList", default, deserialize_with = "lenient::records")]
    pub fault_list: Vec<FaultRecord>,
    #[serde(rename = "defectList", default, deserialize_with = "lenient::records")]
    pub defect_list: Vec<DefectRecord>,
    #[serde(rename = "hazardList", default, deserialize_with = "lenient::records")]
    pub hazard_list: Vec<HazardRecord>,
    #[serde(rename = "patrolList", default, deserialize_with = "lenient::list")]
    pub patrol_list: Vec<Value>,

    #[serde(rename = "faultHistoryList", default, deserialize_with = "lenient::list")]
    pub fault_history_list: Vec<Value>,
    #[serde(rename = "defectHistoryList", default, deserialize_with = "lenient::list")]
    pub defect_history_list: Vec<Value>,
    #[serde(rename = "hazardHistoryList", default, deserialize_with = "lenient::list")]
    pub hazard_history_list: Vec<Value>,
    #[serde(rename = "patrolHistoryList", default, deserialize_with = "lenient::list")]
    pub patrol_history_list: Vec<Value>,

    #[serde(rename = "hasFamilyDefect", default, deserialize_with = "lenient::flag")]
    pub has_family_defect: bool,
    #[serde(rename = "hasFamilyHazard", default, deserialize_with = "lenient::flag")]
    pub has_family_hazard: bool,
    #[serde(rename = "hasFamilyFault", default, deserialize_with = "lenient::flag")]
    pub has_family_fault: bool,
    #[serde(rename = "familyDefectCount", default, deserialize_with = "lenient::count")]
    pub family_defect_count: i64,
    #[serde(rename = "familyHazardCount", default, deserialize_with = "lenient::count")]
    pub family_hazard_count: i64,
    #[serde(rename = "familyFaultCount", default, deserialize_with = "lenient::count")]
    pub family_fault_count: i64,

    #[serde(rename = "ratedState", default, deserialize_with = "lenient::string")]
    pub rated_state: String,
    #[serde(rename = "lineType", default, deserialize_with = "lenient::string")]
    pub line_type: String,
    #[serde(rename = "wireType", default, deserialize_with = "lenient::string")]
    pub wire_type: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub span: f64,

    #[serde(default, deserialize_with = "lenient::string")]
    pub start_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub operate_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_position: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_position: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawDevice {
    pub fn device_type(&self) -> PsrType {
        PsrType::from_code(&self.psr_type)
    }

    /// 读取任意字段的字符串值（声明字段之外的字段）。
    pub fn field(&self, key: &str) -> String {
        self.extra
            .get(key)
            .map(lenient::string_from_value)
            .unwrap_or_default()
    }
}

/// 研判用设备记录：由一条原始数据构建，在单次研判调用内逐步补充派生字段。
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub psr_id: String,
    pub psr_type: PsrType,
    pub device_name: String,
    pub device_type_name: &'static str,
    pub line_name: String,
    pub geo_position: String,

    /// 近 90 天计数
    pub fault_count: i64,
    pub defect_count: i64,
    pub hidden_count: i64,
    pub inspection_count: i64,

    pub fault_list: Vec<FaultRecord>,
    pub defect_list: Vec<DefectRecord>,
    pub hidden_list: Vec<HazardRecord>,
    pub inspection_list: Vec<Value>,

    pub fault_history_list: Vec<Value>,
    pub defect_history_list: Vec<Value>,
    pub hidden_history_list: Vec<Value>,
    pub inspection_history_list: Vec<Value>,

    pub has_family_defect: bool,
    pub family_defect_count: i64,
    pub family_hazard_count: i64,
    pub family_fault_count: i64,

    pub rated_state: String,
    pub line_type: String,
    pub wire_type: String,
    pub span: f64,
    /// 投运时间（按设备类型取 `start_time` 或 `operate_date`）。
    pub run_time: String,

    pub affiliated_psr_id: String,
    pub affiliated_psr_type: Option<PsrType>,
    /// 所属设备的缺陷。
    pub parent_defect_list: Vec<DefectRecord>,
    /// 按设备类型过滤后的缺陷。
    pub processed_defect_list: Vec<DefectRecord>,
    pub assessment: RiskAssessment,
}

impl DeviceRecord {
    pub fn from_raw(raw: &RawDevice, affiliated_psr_id: String) -> Self {
        let psr_type = raw.device_type();
        let run_time = if psr_type.uses_operate_date() {
            raw.operate_date.clone()
        } else {
            raw.start_time.clone()
        };
        Self {
            psr_id: raw.psr_id.clone(),
            device_name: raw.name.clone().unwrap_or_else(|| "未知设备".to_string()),
            device_type_name: psr_type.display_name(),
            line_name: raw.line_and_name.clone(),
            geo_position: raw.geo_position.clone(),
            fault_count: raw.fault,
            defect_count: raw.defect,
            hidden_count: raw.hazard,
            inspection_count: raw.patrol,
            fault_list: raw.fault_list.clone(),
            defect_list: raw.defect_list.clone(),
            hidden_list: raw.hazard_list.clone(),
            inspection_list: raw.patrol_list.clone(),
            fault_history_list: raw.fault_history_list.clone(),
            defect_history_list: raw.defect_history_list.clone(),
            hidden_history_list: raw.hazard_history_list.clone(),
            inspection_history_list: raw.patrol_history_list.clone(),
            has_family_defect: raw.has_family_hazard
                || raw.has_family_defect
                || raw.has_family_fault,
            family_defect_count: raw.family_defect_count,
            family_hazard_count: raw.family_hazard_count,
            family_fault_count: raw.family_fault_count,
            rated_state: raw.rated_state.clone(),
            line_type: raw.line_type.clone(),
            wire_type: raw.wire_type.clone(),
            span: raw.span,
            run_time,
            affiliated_psr_id,
            affiliated_psr_type: psr_type.affiliated_type(),
            parent_defect_list: Vec::new(),
            processed_defect_list: Vec::new(),
            assessment: RiskAssessment::unknown(),
            psr_type,
        }
    }

    pub fn fault_history_count(&self) -> usize {
        self.fault_history_list.len()
    }

    pub fn defect_history_count(&self) -> usize {
        self.defect_history_list.len()
    }

    pub fn hidden_history_count(&self) -> usize {
        self.hidden_history_list.len()
    }

    pub fn inspection_history_count(&self) -> usize {
        self.inspection_history_list.len()
    }

    pub fn is_at_risk(&self) -> bool {
        self.assessment.risk_level == crate::risk::RiskLevel::Yes
    }
}
