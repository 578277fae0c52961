//! 内存实现：按路径预置响应并记录请求，用于测试。

use crate::error::DataServiceError;
use crate::traits::{DataFetcher, HttpMethod, LandformLookup};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// 一次被记录的请求。
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub payload: Option<Value>,
    pub params: Option<Value>,
}

#[derive(Debug, Clone)]
enum Canned {
    Json(Value),
    Timeout,
}

/// 未预置的路径按超时处理。
#[derive(Debug, Default)]
pub struct InMemoryDataService {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl InMemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, path: &str, response: Value) -> Self {
        self.responses.insert(path.to_string(), Canned::Json(response));
        self
    }

    pub fn with_timeout(mut self, path: &str) -> Self {
        self.responses.insert(path.to_string(), Canned::Timeout);
        self
    }

    /// 已收到的请求（按到达顺序）。
    pub fn requests(&self) -> Vec<RecordedRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl DataFetcher for InMemoryDataService {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
        params: Option<Value>,
    ) -> Result<Value, DataServiceError> {
        let recorded = RecordedRequest {
            method,
            path: path.to_string(),
            payload,
            params,
        };
        match self.requests.lock() {
            Ok(mut requests) => requests.push(recorded),
            Err(poisoned) => poisoned.into_inner().push(recorded),
        }

        match self.responses.get(path) {
            Some(Canned::Json(response)) => Ok(response.clone()),
            Some(Canned::Timeout) | None => Err(DataServiceError::Timeout {
                method: method.as_str(),
                url: format!("memory://{}", path.trim_start_matches('/')),
                secs: 0,
            }),
        }
    }
}

/// 按经纬度返回固定地貌，未登记的位置返回 "未知"。
#[derive(Debug, Default, Clone)]
pub struct FixedLandform {
    landforms: HashMap<String, String>,
}

impl FixedLandform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, geo_position: &str, landform: &str) -> Self {
        self.landforms
            .insert(geo_position.to_string(), landform.to_string());
        self
    }
}

#[async_trait]
impl LandformLookup for FixedLandform {
    async fn lookup(&self, geo_position: &str) -> String {
        self.landforms
            .get(geo_position)
            .cloned()
            .unwrap_or_else(|| outage_environment::LANDFORM_UNKNOWN.to_string())
    }
}
