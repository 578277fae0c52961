//! 数据服务 HTTP 客户端。

use crate::error::DataServiceError;
use crate::traits::{DataFetcher, HttpMethod};
use async_trait::async_trait;
use outage_config::{AppConfig, normalize_base_url};
use serde_json::Value;
use std::time::Duration;

/// 鉴权请求头名称。
pub const AUTH_HEADER: &str = "AuthToken";

#[derive(Debug, Clone)]
pub struct DataServiceClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: String,
    timeout_seconds: u64,
}

impl DataServiceClient {
    pub fn new(
        base_url: &str,
        auth_token: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, DataServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(DataServiceError::Build)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            auth_token: auth_token.into(),
            timeout_seconds,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DataServiceError> {
        Self::new(
            &config.data_base_url,
            config.auth_token.clone(),
            config.timeout_seconds,
        )
    }

    /// `<base>/<path>`，`path` 开头的 `/` 会被去掉。
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn transport_error(&self, method: HttpMethod, url: String, err: reqwest::Error) -> DataServiceError {
        outage_telemetry::record_upstream_error();
        if err.is_timeout() {
            tracing::error!(method = method.as_str(), %url, secs = self.timeout_seconds, "请求数据服务超时");
            DataServiceError::Timeout {
                method: method.as_str(),
                url,
                secs: self.timeout_seconds,
            }
        } else {
            tracing::error!(method = method.as_str(), %url, error = %err, "请求数据服务失败");
            DataServiceError::Request {
                method: method.as_str(),
                url,
                source: err,
            }
        }
    }
}

#[async_trait]
impl DataFetcher for DataServiceClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
        params: Option<Value>,
    ) -> Result<Value, DataServiceError> {
        if self.auth_token.trim().is_empty() {
            return Err(DataServiceError::MissingToken);
        }
        let url = self.url(path);

        let builder = match method {
            HttpMethod::Post => {
                let builder = self.http.post(&url);
                match payload {
                    Some(payload) => builder.json(&payload),
                    None => builder,
                }
            }
            HttpMethod::Get => {
                let builder = self.http.get(&url);
                match params {
                    Some(params) => builder.query(&params),
                    None => builder,
                }
            }
        };

        tracing::debug!(method = method.as_str(), %url, "请求数据服务");
        let response = builder
            .header(AUTH_HEADER, &self.auth_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.transport_error(method, url.clone(), err))?;

        response.json::<Value>().await.map_err(|err| {
            tracing::error!(method = method.as_str(), %url, error = %err, "数据服务返回的不是有效的 JSON");
            outage_telemetry::record_upstream_error();
            DataServiceError::InvalidJson {
                method: method.as_str(),
                url,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = DataServiceClient::new("http://backend:18081/", "token", 10).expect("client");
        assert_eq!(
            client.url("/outage/event/query"),
            "http://backend:18081/outage/event/query"
        );
        assert_eq!(client.url("api/drone/analysis"), "http://backend:18081/api/drone/analysis");
    }

    #[test]
    fn method_names_are_case_insensitive() {
        assert_eq!(HttpMethod::parse("get").ok(), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse(" Post ").ok(), Some(HttpMethod::Post));
        assert!(matches!(
            HttpMethod::parse("DELETE"),
            Err(DataServiceError::UnsupportedMethod(method)) if method == "DELETE"
        ));
    }
}
