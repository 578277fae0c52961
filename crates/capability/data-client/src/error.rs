//! 数据服务调用错误。

/// 数据服务调用错误，错误信息包含请求地址，便于定位后端问题。
#[derive(Debug, thiserror::Error)]
pub enum DataServiceError {
    #[error("{method}请求数据服务超时（{secs}s）: {url}")]
    Timeout {
        method: &'static str,
        url: String,
        secs: u64,
    },
    #[error("{method}请求数据服务失败: {url}")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method}数据服务返回的不是有效的 JSON: {url}")]
    InvalidJson { method: &'static str, url: String },
    #[error("不支持的HTTP方法: {0}")]
    UnsupportedMethod(String),
    #[error("未配置 AuthToken。")]
    MissingToken,
    #[error("初始化 HTTP 客户端失败: {0}")]
    Build(#[source] reqwest::Error),
}
