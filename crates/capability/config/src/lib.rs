//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 数据服务根地址（已去除末尾 `/`）。
    pub data_base_url: String,
    /// 数据服务鉴权 token，随请求头 `AuthToken` 下发。
    pub auth_token: String,
    pub timeout_seconds: u64,
    /// 地貌服务根地址（已去除末尾 `/`）。
    pub landform_url: String,
    pub landform_timeout_seconds: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_base_url = env::var("OUTAGE_DATA_BASE_URL")
            .map_err(|_| ConfigError::Missing("OUTAGE_DATA_BASE_URL".to_string()))?;
        let auth_token = read_required_non_empty("OUTAGE_AUTH_TOKEN")?;
        let http_addr =
            env::var("OUTAGE_HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:9090".to_string());
        let timeout_seconds = read_u64_with_default("OUTAGE_TIMEOUT_SECONDS", 10)?;
        let landform_url = env::var("OUTAGE_LANDFORM_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:38000".to_string());
        let landform_timeout_seconds =
            read_u64_with_default("OUTAGE_LANDFORM_TIMEOUT_SECONDS", 10)?;

        for (key, value) in [
            ("OUTAGE_TIMEOUT_SECONDS", timeout_seconds),
            ("OUTAGE_LANDFORM_TIMEOUT_SECONDS", landform_timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(key.to_string(), "0".to_string()));
            }
        }

        Ok(Self {
            http_addr,
            data_base_url: normalize_base_url(&data_base_url),
            auth_token,
            timeout_seconds,
            landform_url: normalize_base_url(&landform_url),
            landform_timeout_seconds,
        })
    }
}

/// 去除根地址末尾的 `/`。
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn read_required_non_empty(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key.to_string())),
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::normalize_base_url;

    #[test]
    fn base_url_drops_trailing_slashes() {
        assert_eq!(normalize_base_url("http://host:18081/"), "http://host:18081");
        assert_eq!(normalize_base_url("http://host//"), "http://host");
        assert_eq!(normalize_base_url("http://host"), "http://host");
    }
}
