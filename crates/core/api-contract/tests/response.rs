use api_contract::{
    AnalysisPayload, AnalysisRequest, AnalysisType, CODE_PROCESSING_FAILURE, CODE_SUCCESS,
    CODE_VALIDATION_FAILURE, InvalidAnalysisType, MessageDataRequest, ToolResponse,
};
use serde_json::{Value, json};

#[test]
fn tool_response_success() {
    let response = ToolResponse::success("ok", "操作成功");
    assert_eq!(response.code, CODE_SUCCESS);
    assert!(response.success);
    assert!(response.data.is_some());
    assert_eq!(response.msg, "操作成功");
}

#[test]
fn validation_failure_serializes_null_data() {
    let response = ToolResponse::<Value>::validation_failure("x");
    let value = serde_json::to_value(response).expect("serialize");
    assert_eq!(
        value,
        json!({ "code": 9999, "success": false, "data": null, "msg": "x" })
    );
}

#[test]
fn processing_failure_uses_code_500() {
    let response = ToolResponse::<Value>::processing_failure("JSON解析失败");
    assert_eq!(response.code, CODE_PROCESSING_FAILURE);
    assert_ne!(response.code, CODE_VALIDATION_FAILURE);
}

#[test]
fn into_value_keeps_envelope_fields() {
    let response = ToolResponse::success(vec![1, 2], "ok").into_value();
    assert_eq!(response.data, Some(json!([1, 2])));
    assert_eq!(response.code, CODE_SUCCESS);
}

#[test]
fn analysis_type_accepts_only_one_and_two() {
    assert_eq!(AnalysisType::try_from(1), Ok(AnalysisType::InProgress));
    assert_eq!(AnalysisType::try_from(2), Ok(AnalysisType::PostEvent));
    assert_eq!(AnalysisType::try_from(3), Err(InvalidAnalysisType(3)));
    assert_eq!(AnalysisType::try_from(0), Err(InvalidAnalysisType(0)));
}

#[test]
fn analysis_payload_is_camel_case() {
    let payload = AnalysisPayload {
        outage_number: "TD-1".to_string(),
        analysis_type: AnalysisType::PostEvent,
    };
    let value = serde_json::to_value(payload).expect("serialize");
    assert_eq!(value, json!({ "outageNumber": "TD-1", "analysisType": 2 }));
}

#[test]
fn analysis_request_accepts_both_casings() {
    let snake: AnalysisRequest =
        serde_json::from_value(json!({ "outage_number": "A", "analysis_type": 1 }))
            .expect("snake");
    let camel: AnalysisRequest =
        serde_json::from_value(json!({ "outageNumber": "B", "analysisType": 2 }))
            .expect("camel");
    assert_eq!(snake.outage_number, "A");
    assert_eq!(camel.analysis_type, 2);
}

#[test]
fn message_request_keeps_raw_strings() {
    let req: MessageDataRequest = serde_json::from_value(json!({
        "res": "{\"data\": []}",
        "wave_data_str": "not json"
    }))
    .expect("parse");
    assert_eq!(req.wave_data_str, "not json");
}
