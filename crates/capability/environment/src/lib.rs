//! 环境信息汇总。
//!
//! 地貌查询本身由数据客户端完成，这里只负责经纬度拆分、
//! 地貌服务响应解析以及环境记录的汇总。

use api_contract::ToolResponse;
use chrono::{Datelike, NaiveDate};
use domain::lenient::{list_field, str_field};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

pub const MSG_SUCCESS: &str = "操作成功";
pub const MSG_FORMAT_ERROR: &str = "环境数据格式错误";

pub const LANDFORM_UNKNOWN: &str = "未知";
pub const LANDFORM_BAD_POSITION: &str = "经纬度格式错误";
pub const LANDFORM_EMPTY: &str = "查询结果为空";
pub const LANDFORM_NO_VALID_CLASS: &str = "无有效水域类型";
pub const LANDFORM_BAD_FORMAT: &str = "数据格式错误";

const DRONE_RESULT_MISSING: &str = "缺少数据";

/// 施工项目范围，按优先级排列。
const PROJECT_RANGES: [&str; 3] = ["threeKmProjects", "twoKmProjects", "oneKmProjects"];

/// 是否处于农业收割季（9 月 15 日至 10 月 31 日，含首尾）。
pub fn is_in_harvest_season(date: NaiveDate) -> bool {
    within(date, (9, 15), (10, 31))
}

/// 是否处于春夏季（4 月 1 日至 8 月 31 日，含首尾）。
pub fn is_in_spring_and_summer_range(date: NaiveDate) -> bool {
    within(date, (4, 1), (8, 31))
}

fn within(date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> bool {
    let day = (date.month(), date.day());
    start <= day && day <= end
}

/// 汇总设备周边的市政施工地址：按 3 公里、2 公里、1 公里范围依次收集，
/// 同名项目只取第一次出现的地址。
pub fn work_address_info(record: &Value) -> String {
    let Some(projects) = record.get("constructionProject") else {
        return String::new();
    };
    let mut seen = HashSet::new();
    let mut addresses = Vec::new();
    for range in PROJECT_RANGES {
        for project in list_field(projects, range) {
            let name = str_field(project, "constructionName");
            if name.is_empty() || !seen.insert(name) {
                continue;
            }
            let address = str_field(project, "address");
            if !address.is_empty() {
                addresses.push(address);
            }
        }
    }
    addresses.join(",")
}

/// 地貌名称归一："不透水表面" 改写为 "建筑/城市道路"。
pub fn normalize_landform(landform: &str) -> String {
    if landform == "不透水表面" {
        "建筑/城市道路".to_string()
    } else {
        landform.to_string()
    }
}

/// 拆分 "经度,纬度"，不足两段时返回 `None`。
pub fn split_geo_position(geo_position: &str) -> Option<(&str, &str)> {
    let mut parts = geo_position.split(',');
    let lon = parts.next()?.trim();
    let lat = parts.next()?.trim();
    Some((lon, lat))
}

/// 从地貌服务响应中读取 `data.stats.classes` 的类别名。
pub fn landform_from_response(response: &Value) -> String {
    let classes = response
        .get("data")
        .and_then(|data| data.get("stats"))
        .and_then(|stats| stats.get("classes"));
    match classes {
        None => LANDFORM_EMPTY.to_string(),
        Some(value) if is_empty_value(value) => LANDFORM_EMPTY.to_string(),
        Some(Value::Object(classes)) => {
            let keys: Vec<&str> = classes
                .keys()
                .map(String::as_str)
                .filter(|key| !key.is_empty())
                .collect();
            if keys.is_empty() {
                LANDFORM_NO_VALID_CLASS.to_string()
            } else {
                keys.join(",")
            }
        }
        Some(_) => LANDFORM_BAD_FORMAT.to_string(),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// 环境汇总结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSummary {
    #[serde(rename = "是否处于农业收割季")]
    pub harvest_season: &'static str,
    #[serde(rename = "是否处于春夏季")]
    pub spring_summer: &'static str,
    #[serde(rename = "地貌")]
    pub landform: String,
    #[serde(rename = "市政地址")]
    pub work_address: String,
    #[serde(rename = "无人机分析结果")]
    pub drone_result: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "是" } else { "否" }
}

/// 汇总环境信息：地貌去重并排除“未知”，市政地址去重，均以 ", " 连接。
pub fn process_environment_data(
    environment: &Value,
    outage_date: NaiveDate,
) -> ToolResponse<EnvironmentSummary> {
    if !environment.is_object() {
        return ToolResponse::validation_failure(MSG_FORMAT_ERROR);
    }

    let mut landforms: Vec<&str> = Vec::new();
    let mut addresses: Vec<&str> = Vec::new();
    for info in list_field(environment, "data") {
        let landform = str_field(info, "landform");
        if !landform.trim().is_empty()
            && !landform.contains(LANDFORM_UNKNOWN)
            && !landforms.contains(&landform)
        {
            landforms.push(landform);
        }
        let address = str_field(info, "workAddress");
        if !address.is_empty() && !addresses.contains(&address) {
            addresses.push(address);
        }
    }

    tracing::info!(
        landforms = landforms.len(),
        addresses = addresses.len(),
        %outage_date,
        "环境数据处理完成"
    );

    ToolResponse::success(
        EnvironmentSummary {
            harvest_season: yes_no(is_in_harvest_season(outage_date)),
            spring_summer: yes_no(is_in_spring_and_summer_range(outage_date)),
            landform: landforms.join(", "),
            work_address: addresses.join(", "),
            drone_result: DRONE_RESULT_MISSING,
        },
        MSG_SUCCESS,
    )
}
