//! 地貌服务客户端。

use crate::traits::LandformLookup;
use async_trait::async_trait;
use outage_config::{AppConfig, normalize_base_url};
use outage_environment::{
    LANDFORM_BAD_POSITION, LANDFORM_UNKNOWN, landform_from_response, split_geo_position,
};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LandformClient {
    http: reqwest::Client,
    base_url: String,
}

impl LandformClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.landform_url, config.landform_timeout_seconds)
    }

    async fn query(&self, lon: &str, lat: &str) -> Result<Value, reqwest::Error> {
        self.http
            .get(format!("{}/getDimao", self.base_url))
            .query(&[("lon", lon), ("lat", lat)])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

#[async_trait]
impl LandformLookup for LandformClient {
    async fn lookup(&self, geo_position: &str) -> String {
        let Some((lon, lat)) = split_geo_position(geo_position) else {
            return LANDFORM_BAD_POSITION.to_string();
        };
        match self.query(lon, lat).await {
            Ok(response) => landform_from_response(&response),
            Err(err) => {
                tracing::error!(%geo_position, error = %err, "调用地貌接口失败");
                outage_telemetry::record_upstream_error();
                LANDFORM_UNKNOWN.to_string()
            }
        }
    }
}
