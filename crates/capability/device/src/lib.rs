//! 设备风险研判。
//!
//! 处理流程：按 `psr_id` 去重 → 构建设备记录 → 逐设备计算风险 →
//! 构建设备树 → 按类别统计 → 线路描述 → 风险描述，最终生成研判大模型的输入参数。

pub mod aggregate;
pub mod narrative;
pub mod record;
pub mod risk;
pub mod topology;

pub use aggregate::{
    CategoryStat, DeviceAnalysis, DeviceSummary, JudgeBasis, LineProfile, category_statistics,
    dedup_by_psr_id, process_device_info_data, process_device_info_data_at, process_device_list,
};
pub use narrative::{MAX_RISK_NARRATIVES, RiskNarrative, build_risk_narratives};
pub use record::{DefectRecord, DeviceRecord, FaultRecord, HazardRecord, RawDevice};
pub use risk::{
    LongYears, RiskAssessment, RiskLevel, calculate_device_risk, calculate_device_risk_at,
    device_score,
};
pub use topology::{DeviceForest, get_affiliated_psr_id};
