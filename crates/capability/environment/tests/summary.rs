use chrono::NaiveDate;
use outage_environment::{process_environment_data, work_address_info};
use serde_json::json;

#[test]
fn work_addresses_follow_range_priority() {
    let record = json!({
        "constructionProject": {
            "oneKmProjects": [
                { "constructionName": "地铁5号线", "address": "一公里处" },
                { "constructionName": "管网改造", "address": "中山路" }
            ],
            "threeKmProjects": [
                { "constructionName": "地铁5号线", "address": "三公里处" },
                { "constructionName": "无地址项目" }
            ],
            "twoKmProjects": null
        }
    });
    assert_eq!(work_address_info(&record), "三公里处,中山路");
    assert_eq!(work_address_info(&json!({ "constructionProject": null })), "");
    assert_eq!(work_address_info(&json!({})), "");
}

#[test]
fn environment_is_summarized() {
    let environment = json!({
        "data": [
            { "landform": "耕地", "workAddress": "中山路" },
            { "landform": "耕地", "workAddress": "" },
            { "landform": "未知", "workAddress": "中山路" },
            { "landform": "  ", "workAddress": "建设路" },
            { "landform": "建筑/城市道路" },
            "junk"
        ]
    });
    let outage_date = NaiveDate::from_ymd_opt(2025, 9, 20).expect("date");
    let response = process_environment_data(&environment, outage_date);
    assert_eq!(response.code, 10000);
    assert_eq!(response.msg, "操作成功");

    let value = serde_json::to_value(response.data.expect("data")).expect("json");
    assert_eq!(
        value,
        json!({
            "是否处于农业收割季": "是",
            "是否处于春夏季": "否",
            "地貌": "耕地, 建筑/城市道路",
            "市政地址": "中山路, 建设路",
            "无人机分析结果": "缺少数据"
        })
    );
}

#[test]
fn non_object_environment_is_rejected() {
    let outage_date = NaiveDate::from_ymd_opt(2025, 5, 1).expect("date");
    let response = process_environment_data(&json!([]), outage_date);
    assert_eq!(response.code, 9999);
    assert!(response.data.is_none());
}
