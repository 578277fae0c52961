//! 停电研判工具服务：以 HTTP JSON 接口暴露数据获取与数据处理工具。

mod handlers;
mod middleware;
mod routes;
mod utils;

use axum::{Router, middleware as axum_middleware};
use outage_config::AppConfig;
use outage_data_client::{DataFetcher, DataServiceClient, LandformClient, LandformLookup};
use outage_telemetry::init_tracing;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub data_service: Arc<dyn DataFetcher>,
    pub landform: Arc<dyn LandformLookup>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let state = AppState {
        data_service: Arc::new(DataServiceClient::from_config(&config)?),
        landform: Arc::new(LandformClient::from_config(&config)?),
    };
    let app = build_app(state);

    tracing::info!(addr = %config.http_addr, "启动工具服务");
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// 组装路由与中间件。
pub fn build_app(state: AppState) -> Router {
    routes::create_tool_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(axum_middleware::from_fn(middleware::request_context))
}

#[cfg(test)]
mod tests;
