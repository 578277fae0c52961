//! 数据访问 Trait 定义，使用 async_trait 支持动态分发。

use crate::error::DataServiceError;
use async_trait::async_trait;
use serde_json::Value;

/// 数据服务支持的 HTTP 方法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// 按名称解析（忽略大小写）。
    pub fn parse(method: &str) -> Result<Self, DataServiceError> {
        match method.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(DataServiceError::UnsupportedMethod(method.to_string())),
        }
    }
}

/// 数据服务接口。
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// POST 携带 JSON 请求体，GET 携带查询参数；返回解析后的 JSON。
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
        params: Option<Value>,
    ) -> Result<Value, DataServiceError>;

    async fn post(&self, path: &str, payload: Value) -> Result<Value, DataServiceError> {
        self.request(HttpMethod::Post, path, Some(payload), None).await
    }

    async fn get(&self, path: &str, params: Value) -> Result<Value, DataServiceError> {
        self.request(HttpMethod::Get, path, None, Some(params)).await
    }
}

/// 地貌查询接口：总是返回一段可直接展示的文本（失败时为降级值）。
#[async_trait]
pub trait LandformLookup: Send + Sync {
    async fn lookup(&self, geo_position: &str) -> String;
}
