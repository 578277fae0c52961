use crate::{AppState, build_app};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use outage_data_client::{FixedLandform, HttpMethod, InMemoryDataService};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn state(data_service: Arc<InMemoryDataService>) -> AppState {
    AppState {
        data_service,
        landform: Arc::new(
            FixedLandform::new()
                .with("118.1,32.1", "不透水表面")
                .with("118.2,32.2", "耕地"),
        ),
    }
}

async fn call(state: AppState, tool: &str, args: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/tools/{tool}"))
        .header("content-type", "application/json")
        .body(Body::from(args.to_string()))
        .expect("request");
    let response = build_app(state).oneshot(request).await.expect("response");
    let status = response.status();
    assert!(response.headers().contains_key("x-request-id"));
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, serde_json::from_slice(&bytes).expect("json"))
}

#[tokio::test]
async fn event_data_is_forwarded_verbatim() {
    let backend = Arc::new(
        InMemoryDataService::new()
            .with_response("/outage/event/query", json!({ "success": true, "data": { "id": 7 } })),
    );
    let (status, body) = call(
        state(backend.clone()),
        "get_event_data",
        json!({ "outage_number": " TD-1 " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": { "id": 7 } }));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].payload, Some(json!({ "outageNumber": "TD-1" })));
}

#[tokio::test]
async fn invalid_analysis_type_is_rejected_without_calling_backend() {
    let backend = Arc::new(InMemoryDataService::new());
    let (status, body) = call(
        state(backend.clone()),
        "get_weather_data",
        json!({ "outage_number": "TD-1", "analysis_type": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "code": 400,
            "success": false,
            "data": null,
            "msg": "analysis_type 仅支持 1（事中分析）或 2（事后分析）。"
        })
    );
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn wave_data_uses_query_params() {
    let backend = Arc::new(InMemoryDataService::new().with_response(
        "/outage-data/outage/event/luboAnalyse",
        json!({ "data": [] }),
    ));
    let (status, _) = call(
        state(backend.clone()),
        "get_wave_data",
        json!({ "outageNumber": "TD-1", "analysisType": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let requests = backend.requests();
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(
        requests[0].params,
        Some(json!({ "outageNumber": "TD-1", "analysisType": 2 }))
    );
}

#[tokio::test]
async fn upstream_timeout_maps_to_bad_gateway() {
    let backend = Arc::new(InMemoryDataService::new().with_timeout("/api/weather/data/portrait"));
    let (status, body) = call(
        state(backend),
        "get_weather_data",
        json!({ "outage_number": "TD-1", "analysis_type": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);
    assert!(body["msg"].as_str().unwrap_or_default().contains("超时"));
}

#[tokio::test]
async fn environment_records_are_enriched() {
    let backend = Arc::new(InMemoryDataService::new().with_response(
        "/outage-data/test/agent",
        json!({
            "success": true,
            "data": [
                {
                    "geoPosition": " 118.1,32.1 ",
                    "constructionProject": {
                        "oneKmProjects": [{ "constructionName": "A", "address": "中山路" }]
                    }
                },
                { "geoPosition": "118.2,32.2" },
                { "geoPosition": "" }
            ]
        }),
    ));
    let (status, body) = call(
        state(backend),
        "get_environment_raw_data",
        json!({ "outage_number": "TD-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 10000);
    let records = body["data"].as_array().expect("records");
    assert_eq!(records[0]["landform"], "建筑/城市道路");
    assert_eq!(records[0]["workAddress"], "中山路");
    assert_eq!(records[1]["landform"], "耕地");
    assert_eq!(records[1]["workAddress"], "");
    assert_eq!(records[2]["landform"], "未知");
}

#[tokio::test]
async fn processing_failures_keep_http_ok() {
    let backend = Arc::new(InMemoryDataService::new());
    let (status, body) = call(
        state(backend),
        "process_device_info_data",
        json!({ "device_data": { "success": false, "msg": "x" } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "code": 9999, "success": false, "data": null, "msg": "x" }));
}

#[tokio::test]
async fn message_processing_reports_bad_json() {
    let backend = Arc::new(InMemoryDataService::new());
    let (status, body) = call(
        state(backend),
        "message_data_processing",
        json!({ "res": "{", "wave_data_str": "{}" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 500);
    assert!(body["msg"].as_str().unwrap_or_default().starts_with("JSON解析失败"));
}

#[tokio::test]
async fn environment_processing_reads_outage_date() {
    let backend = Arc::new(InMemoryDataService::new());
    let (status, body) = call(
        state(backend),
        "environment_data_processing",
        json!({ "environment": { "data": [] }, "outage_date": "2025-05-20" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["是否处于春夏季"], "是");
    assert_eq!(body["data"]["是否处于农业收割季"], "否");
}

#[tokio::test]
async fn malformed_arguments_are_bad_requests() {
    let backend = Arc::new(InMemoryDataService::new());
    let (status, body) = call(state(backend), "weather_data_processing", json!("text")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn tool_catalogue_lists_every_tool() {
    let request = Request::builder()
        .uri("/tools")
        .body(Body::empty())
        .expect("request");
    let response = build_app(state(Arc::new(InMemoryDataService::new())))
        .oneshot(request)
        .await
        .expect("response");
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let tools: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(tools.as_array().map(Vec::len), Some(12));
    assert_eq!(tools[0]["name"], "get_event_data");
}
