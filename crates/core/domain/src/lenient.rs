//! 后端数据的宽松读取。
//!
//! 后端字段类型并不稳定（数字可能以字符串下发、列表可能为 null）。
//! 这里的函数既可直接读取 `serde_json::Value`，也可作为
//! `#[serde(deserialize_with = "...")]` 使用；读取失败一律退化为默认值，
//! 不让单条记录的脏字段中断整批处理。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 读取整数计数：整数、整值浮点、数字字符串、布尔；其余为 0。
pub fn count_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|v| v.is_finite() && v.fract() == 0.0)
                    .map(|v| v as i64)
            })
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<i64>().unwrap_or(0),
        Value::Bool(flag) => i64::from(*flag),
        _ => 0,
    }
}

/// 读取浮点数：数字或数字字符串；其余为 0.0。
pub fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 读取字符串：字符串原样，数字/布尔转文本，其余为空串。
pub fn string_from_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

/// 读取布尔标记。
pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|v| v != 0.0),
        Value::String(text) => {
            let text = text.trim();
            !text.is_empty() && !matches!(text.to_ascii_lowercase().as_str(), "false" | "0")
        }
        _ => false,
    }
}

/// 读取对象字段中的字符串，缺失或非字符串时为空串。
pub fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// 读取对象字段中的数组，缺失或非数组时为空切片。
pub fn list_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| count_from_value(&value))
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| number_from_value(&value))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| string_from_value(&value))
}

/// 可空字符串：null 或非标量读取为 `None`。
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        other => Some(string_from_value(&other)),
    })
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| flag_from_value(&value))
}

/// 任意元素的列表；非数组读取为空列表。
pub fn list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// 类型化记录列表：只保留能读成 `T` 的对象元素。
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = list(deserializer)?;
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_accept_numbers_and_numeric_strings() {
        assert_eq!(count_from_value(&json!(3)), 3);
        assert_eq!(count_from_value(&json!("4")), 4);
        assert_eq!(count_from_value(&json!(2.0)), 2);
        assert_eq!(count_from_value(&json!(2.5)), 0);
        assert_eq!(count_from_value(&json!("abc")), 0);
        assert_eq!(count_from_value(&Value::Null), 0);
        assert_eq!(count_from_value(&json!(true)), 1);
    }

    #[test]
    fn flags_follow_truthiness() {
        assert!(flag_from_value(&json!(true)));
        assert!(flag_from_value(&json!(1)));
        assert!(flag_from_value(&json!("Y")));
        assert!(!flag_from_value(&json!("false")));
        assert!(!flag_from_value(&json!("")));
        assert!(!flag_from_value(&Value::Null));
    }

    #[test]
    fn field_helpers_default_when_missing() {
        let value = json!({ "name": "A", "items": [1, 2], "count": 5 });
        assert_eq!(str_field(&value, "name"), "A");
        assert_eq!(str_field(&value, "count"), "");
        assert_eq!(list_field(&value, "items").len(), 2);
        assert!(list_field(&value, "missing").is_empty());
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "count")]
        fault: i64,
        #[serde(default, deserialize_with = "records")]
        entries: Vec<Entry>,
    }

    #[derive(Debug, Deserialize)]
    struct Entry {
        state: String,
    }

    #[test]
    fn deserialize_with_helpers_skip_bad_entries() {
        let sample: Sample = serde_json::from_value(json!({
            "fault": "7",
            "entries": [{ "state": "16" }, "junk", { "other": 1 }, null]
        }))
        .expect("parse");
        assert_eq!(sample.fault, 7);
        assert_eq!(sample.entries.len(), 1);
        assert_eq!(sample.entries[0].state, "16");
    }
}
