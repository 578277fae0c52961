//! PSR 设备类型目录。
//!
//! 后端以 PSR 类型编码标识设备种类。这里把编码收敛为封闭的 [`PsrType`]，
//! 并提供编码 → 名称、编码 → 设备类别、编码 → 所属设备字段等查表能力。

use std::fmt;

/// 电缆类虚拟设备编码，暂不参与设备研判。
pub const EXCLUDED_CABLE_CODE: &str = "xndl";

/// 标准化 PSR 类型编码：去除首尾空格并转小写。
pub fn normalize_psr_type(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 已知 PSR 设备类型。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PsrType {
    /// 0101 架空导线
    Conductor,
    /// 0102 导线段
    ConductorSegment,
    /// 0103 杆塔
    Tower,
    /// 0103001 绝缘子
    Insulator,
    /// 0103002 金具
    Hardware,
    /// 0103005 拉线
    GuyWire,
    /// 0201 电缆段
    CableSegment,
    /// 0202 电缆终端
    CableTerminal,
    /// 0203 电缆接头
    CableJoint,
    /// 0302 柱上变压器
    PoleTransformer,
    /// 0305 柱上断路器
    PoleBreaker,
    /// 0306 柱上负荷开关
    PoleLoadSwitch,
    /// 0307 柱上隔离开关
    PoleDisconnector,
    /// 0308 避雷器
    Arrester,
    /// 0311 站内开关
    StationSwitch,
    /// 0337 配电室
    DistributionRoom,
    /// 0338 站房
    Station,
    /// xndl 虚拟电缆
    VirtualCable,
    /// 未登记的编码
    Other(String),
}

/// 所属设备的查找方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affiliation {
    /// 从设备原始记录的指定字段读取所属设备 ID。
    Field(&'static str),
    /// 在电缆段中查找起点或终点位置为本设备的记录。
    CableSegmentEndpoint,
    /// 无所属设备。
    None,
}

impl PsrType {
    /// 从（未标准化的）编码解析。
    pub fn from_code(code: &str) -> Self {
        match normalize_psr_type(code).as_str() {
            "0101" => Self::Conductor,
            "0102" => Self::ConductorSegment,
            "0103" => Self::Tower,
            "0103001" => Self::Insulator,
            "0103002" => Self::Hardware,
            "0103005" => Self::GuyWire,
            "0201" => Self::CableSegment,
            "0202" => Self::CableTerminal,
            "0203" => Self::CableJoint,
            "0302" => Self::PoleTransformer,
            "0305" => Self::PoleBreaker,
            "0306" => Self::PoleLoadSwitch,
            "0307" => Self::PoleDisconnector,
            "0308" => Self::Arrester,
            "0311" => Self::StationSwitch,
            "0337" => Self::DistributionRoom,
            "0338" => Self::Station,
            EXCLUDED_CABLE_CODE => Self::VirtualCable,
            other => Self::Other(other.to_string()),
        }
    }

    /// 标准化后的编码。
    pub fn code(&self) -> &str {
        match self {
            Self::Conductor => "0101",
            Self::ConductorSegment => "0102",
            Self::Tower => "0103",
            Self::Insulator => "0103001",
            Self::Hardware => "0103002",
            Self::GuyWire => "0103005",
            Self::CableSegment => "0201",
            Self::CableTerminal => "0202",
            Self::CableJoint => "0203",
            Self::PoleTransformer => "0302",
            Self::PoleBreaker => "0305",
            Self::PoleLoadSwitch => "0306",
            Self::PoleDisconnector => "0307",
            Self::Arrester => "0308",
            Self::StationSwitch => "0311",
            Self::DistributionRoom => "0337",
            Self::Station => "0338",
            Self::VirtualCable => EXCLUDED_CABLE_CODE,
            Self::Other(code) => code,
        }
    }

    /// 设备类型名称，未登记编码返回 "其他"。
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Conductor => "架空导线",
            Self::ConductorSegment => "导线段",
            Self::Tower => "杆塔",
            Self::Insulator => "绝缘子",
            Self::Hardware => "金具",
            Self::GuyWire => "拉线",
            Self::CableSegment => "电缆段",
            Self::CableTerminal => "电缆终端",
            Self::CableJoint => "电缆接头",
            Self::PoleTransformer => "柱上变压器",
            Self::PoleBreaker => "柱上断路器",
            Self::PoleLoadSwitch => "柱上负荷开关",
            Self::PoleDisconnector => "柱上隔离开关",
            Self::Arrester => "避雷器",
            Self::StationSwitch => "站内开关",
            Self::DistributionRoom => "配电室",
            Self::Station => "站房",
            Self::VirtualCable => "虚拟电缆",
            Self::Other(_) => "其他",
        }
    }

    /// 设备类别（用于分类统计）。
    pub fn category(&self) -> DeviceCategory {
        match self {
            Self::Conductor | Self::ConductorSegment => DeviceCategory::Conductor,
            Self::CableSegment | Self::CableTerminal | Self::CableJoint => DeviceCategory::Cable,
            Self::Tower => DeviceCategory::Tower,
            Self::Insulator | Self::Hardware | Self::GuyWire => DeviceCategory::Hardware,
            Self::PoleBreaker
            | Self::PoleLoadSwitch
            | Self::PoleDisconnector
            | Self::StationSwitch => DeviceCategory::Switch,
            Self::PoleTransformer => DeviceCategory::Transformer,
            Self::Arrester => DeviceCategory::Arrester,
            Self::DistributionRoom | Self::Station => DeviceCategory::Station,
            Self::VirtualCable | Self::Other(_) => DeviceCategory::Other,
        }
    }

    /// 所属设备的查找方式。
    pub fn affiliation(&self) -> Affiliation {
        match self {
            Self::CableTerminal | Self::CableJoint => Affiliation::CableSegmentEndpoint,
            Self::Insulator
            | Self::Hardware
            | Self::GuyWire
            | Self::PoleTransformer
            | Self::PoleBreaker
            | Self::PoleLoadSwitch
            | Self::PoleDisconnector
            | Self::Arrester => Affiliation::Field("pole_id"),
            Self::Conductor | Self::ConductorSegment => Affiliation::Field("start_pole_id"),
            Self::StationSwitch => Affiliation::Field("station_id"),
            _ => Affiliation::None,
        }
    }

    /// 所属设备的类型。
    pub fn affiliated_type(&self) -> Option<PsrType> {
        match self {
            Self::CableTerminal | Self::CableJoint => Some(Self::CableSegment),
            Self::StationSwitch => Some(Self::Station),
            _ => match self.affiliation() {
                Affiliation::Field(_) => Some(Self::Tower),
                _ => None,
            },
        }
    }

    /// 结构锚点（杆塔、站房、电缆段）：在设备树中总是根节点。
    pub fn is_structural_anchor(&self) -> bool {
        matches!(
            self,
            Self::Tower | Self::Station | Self::DistributionRoom | Self::CableSegment
        )
    }

    /// 投运时间是否取 `operate_date` 字段（其余类型取 `start_time`）。
    pub fn uses_operate_date(&self) -> bool {
        matches!(self, Self::Insulator | Self::Hardware | Self::PoleLoadSwitch)
    }

    pub fn is_conductor(&self) -> bool {
        matches!(self, Self::Conductor | Self::ConductorSegment)
    }

    pub fn is_switch(&self) -> bool {
        self.category() == DeviceCategory::Switch
    }
}

impl fmt::Display for PsrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 设备类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceCategory {
    Conductor,
    Cable,
    Tower,
    Hardware,
    Switch,
    Transformer,
    Arrester,
    Station,
    Other,
}

impl DeviceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conductor => "导线",
            Self::Cable => "电缆",
            Self::Tower => "杆塔",
            Self::Hardware => "金具",
            Self::Switch => "开关",
            Self::Transformer => "配变",
            Self::Arrester => "避雷器",
            Self::Station => "站房",
            Self::Other => "其他",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
