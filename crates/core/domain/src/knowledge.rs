//! 天气关键字 → 故障风险知识库。
//!
//! 表的顺序即匹配输出顺序。

/// 天气关键字与可能引发的故障风险。
pub const WEATHER_FAULT_RISKS: &[(&str, &[&str])] = &[
    (
        "大风",
        &[
            "异物搭挂导线引发短路",
            "导线舞动引发相间短路",
            "树木倒伏压断导线",
            "杆塔倾斜或倒杆",
        ],
    ),
    (
        "强降雨",
        &[
            "杆塔基础冲刷引发倒杆",
            "电缆沟道积水引发绝缘击穿",
            "设备进水绝缘降低",
        ],
    ),
    (
        "暴雨",
        &[
            "杆塔基础冲刷引发倒杆",
            "电缆沟道积水引发绝缘击穿",
            "山体滑坡损坏线路",
        ],
    ),
    (
        "雷",
        &["雷击引发绝缘子闪络", "雷击造成避雷器击穿", "雷击断线"],
    ),
    (
        "冰雹",
        &["冰雹击伤绝缘子", "冰雹损坏设备外绝缘"],
    ),
    (
        "覆冰",
        &["导线覆冰引发舞动", "覆冰过载导致断线或倒杆"],
    ),
    (
        "雪",
        &["覆冰过载导致断线或倒杆", "积雪融化引发设备受潮"],
    ),
    (
        "高温",
        &["负荷过载引发设备过热", "导线弧垂增大引发对地放电"],
    ),
    (
        "大雾",
        &["污秽闪络"],
    ),
];

/// 查询关键字对应的故障风险列表。
pub fn weather_fault_risks(keyword: &str) -> Option<&'static [&'static str]> {
    WEATHER_FAULT_RISKS
        .iter()
        .find(|(entry, _)| *entry == keyword)
        .map(|(_, risks)| *risks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        let risks = weather_fault_risks("大风").expect("大风");
        assert_eq!(risks.first(), Some(&"异物搭挂导线引发短路"));
        assert!(weather_fault_risks("晴").is_none());
    }

    #[test]
    fn strong_wind_precedes_heavy_rain() {
        let position = |keyword: &str| {
            WEATHER_FAULT_RISKS
                .iter()
                .position(|(entry, _)| *entry == keyword)
                .expect("keyword")
        };
        assert!(position("大风") < position("强降雨"));
    }
}
