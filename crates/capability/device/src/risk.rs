//! 单设备风险计算。
//!
//! 输入一条已补充所属设备信息的 [`DeviceRecord`]，输出风险结论、运行年限、
//! 长年限标记与设备得分。投运时间缺失或无法解析时结论为“未知”，
//! 计算过程从不向调用方返回错误。

use crate::record::{DefectRecord, DeviceRecord};
use chrono::{Local, NaiveDateTime};
use domain::PsrType;
use serde::Serialize;

/// 投运时间格式。
pub const RUN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FAULT_WEIGHT: i64 = 35;
const DEFECT_WEIGHT: i64 = 30;
const HAZARD_WEIGHT: i64 = 25;
const PATROL_WEIGHT: i64 = 10;

/// 风险结论。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "是")]
    Yes,
    #[serde(rename = "否")]
    No,
    #[serde(rename = "未知")]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "是",
            Self::No => "否",
            Self::Unknown => "未知",
        }
    }
}

/// 长年限运行标记。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LongYears {
    #[serde(rename = "否")]
    No,
    #[serde(rename = "未知")]
    Unknown,
}

/// 单设备风险计算结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// 运行年限，保留一位小数。
    pub run_time_years: f64,
    /// 目前恒为“否”，尚未按运行年限判定。
    pub long_years: LongYears,
    pub score: u32,
}

impl RiskAssessment {
    /// 数据不足时的结论。
    pub fn unknown() -> Self {
        Self {
            risk_level: RiskLevel::Unknown,
            run_time_years: 0.0,
            long_years: LongYears::Unknown,
            score: 0,
        }
    }
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self::unknown()
    }
}

/// 缺陷过滤范围，每类设备一种规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefectScope {
    /// 杆塔：所属设备与自身缺陷中只保留杆塔或通道相关的未消除缺陷。
    Tower,
    /// 导线：所属设备上的导线缺陷 + 自身全部缺陷。
    Conductor,
    /// 绝缘子/金具/拉线：所属设备上对应部件的缺陷 + 自身全部缺陷。
    Fitting(&'static str),
    /// 杆塔上的开关：所属杆塔上的开关缺陷 + 自身全部缺陷。
    SwitchOnTower,
    /// 其他设备：自身缺陷。
    Own,
}

impl DefectScope {
    fn of(device: &DeviceRecord) -> Self {
        match &device.psr_type {
            PsrType::Tower => Self::Tower,
            PsrType::Conductor | PsrType::ConductorSegment => Self::Conductor,
            PsrType::Insulator => Self::Fitting("绝缘子"),
            PsrType::Hardware => Self::Fitting("金具"),
            PsrType::GuyWire => Self::Fitting("拉线"),
            psr_type
                if psr_type.is_switch()
                    && device.affiliated_psr_type.as_ref() == Some(&PsrType::Tower) =>
            {
                Self::SwitchOnTower
            }
            _ => Self::Own,
        }
    }

    fn select(self, parent: &[DefectRecord], own: &[DefectRecord]) -> Vec<DefectRecord> {
        match self {
            Self::Tower => parent
                .iter()
                .chain(own)
                .filter(|defect| {
                    defect.is_unresolved() && (defect.concerns("杆塔") || defect.concerns("通道"))
                })
                .cloned()
                .collect(),
            Self::Conductor => inherited(parent, "导线").chain(own.iter().cloned()).collect(),
            Self::Fitting(component) => inherited(parent, component)
                .chain(own.iter().cloned())
                .collect(),
            Self::SwitchOnTower => inherited(parent, "开关").chain(own.iter().cloned()).collect(),
            Self::Own => own.to_vec(),
        }
    }
}

/// 所属设备上指定部件的未消除缺陷。
fn inherited<'a>(
    parent: &'a [DefectRecord],
    component: &'static str,
) -> impl Iterator<Item = DefectRecord> + 'a {
    parent
        .iter()
        .filter(move |defect| defect.is_unresolved() && defect.concerns(component))
        .cloned()
}

/// 设备得分：故障 35、缺陷 30、隐患 25 按次数扣分（不低于 0），巡视固定 10 分。
pub fn device_score(fault_count: i64, defect_count: i64, hazard_count: i64) -> u32 {
    let term = |weight: i64, per_event: i64, count: i64| {
        weight
            .saturating_sub(per_event.saturating_mul(count.max(0)))
            .max(0)
    };
    let total = term(FAULT_WEIGHT, 5, fault_count)
        + term(DEFECT_WEIGHT, 3, defect_count)
        + term(HAZARD_WEIGHT, 2, hazard_count)
        + PATROL_WEIGHT;
    total as u32
}

/// 按当前本地时间计算设备风险。
pub fn calculate_device_risk(device: &mut DeviceRecord) -> RiskAssessment {
    calculate_device_risk_at(device, Local::now().naive_local())
}

/// 以给定时间为“现在”计算设备风险，同时写入 `processed_defect_list`。
pub fn calculate_device_risk_at(device: &mut DeviceRecord, now: NaiveDateTime) -> RiskAssessment {
    if device.run_time.is_empty() {
        return RiskAssessment::unknown();
    }

    let started = match NaiveDateTime::parse_from_str(&device.run_time, RUN_TIME_FORMAT) {
        Ok(started) => started,
        Err(err) => {
            tracing::warn!(
                psr_id = %device.psr_id,
                run_time = %device.run_time,
                error = %err,
                "解析设备运行时间失败"
            );
            outage_telemetry::record_degraded_assessment();
            return RiskAssessment::unknown();
        }
    };

    let run_time_days = (now - started).num_days();
    let run_time_years = round_one_decimal(run_time_days as f64 / 365.0);

    let scope = DefectScope::of(device);
    device.processed_defect_list = scope.select(&device.parent_defect_list, &device.defect_list);

    let has_risk = has_open_fault(device)
        || has_unresolved_defect(device, scope)
        || has_open_hazard(device)
        || has_history(device)
        || device.has_family_defect;

    RiskAssessment {
        risk_level: if has_risk { RiskLevel::Yes } else { RiskLevel::No },
        run_time_years,
        long_years: LongYears::No,
        score: device_score(device.fault_count, device.defect_count, device.hidden_count),
    }
}

fn has_open_fault(device: &DeviceRecord) -> bool {
    device.fault_list.iter().any(|fault| fault.is_open())
}

fn has_unresolved_defect(device: &DeviceRecord, scope: DefectScope) -> bool {
    device.processed_defect_list.iter().any(|defect| {
        defect.is_unresolved() && (scope != DefectScope::Tower || defect.concerns("杆塔"))
    })
}

fn has_open_hazard(device: &DeviceRecord) -> bool {
    device.hidden_list.iter().any(|hazard| hazard.is_open())
}

fn has_history(device: &DeviceRecord) -> bool {
    [
        &device.defect_history_list,
        &device.hidden_history_list,
        &device.fault_history_list,
    ]
    .iter()
    .any(|history| !history.is_empty())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
