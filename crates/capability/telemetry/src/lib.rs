//! 追踪、请求 ID 生成与工具调用计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 工具调用指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub tool_calls: u64,
    pub tool_failures: u64,
    pub upstream_errors: u64,
    pub skipped_records: u64,
    pub degraded_assessments: u64,
}

/// 工具调用指标。
pub struct TelemetryMetrics {
    tool_calls: AtomicU64,
    tool_failures: AtomicU64,
    upstream_errors: AtomicU64,
    skipped_records: AtomicU64,
    degraded_assessments: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            tool_calls: AtomicU64::new(0),
            tool_failures: AtomicU64::new(0),
            upstream_errors: AtomicU64::new(0),
            skipped_records: AtomicU64::new(0),
            degraded_assessments: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tool_calls: self.tool_calls.load(Ordering::Relaxed),
            tool_failures: self.tool_failures.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
            skipped_records: self.skipped_records.load(Ordering::Relaxed),
            degraded_assessments: self.degraded_assessments.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录工具调用次数。
pub fn record_tool_call() {
    metrics().tool_calls.fetch_add(1, Ordering::Relaxed);
}

/// 记录工具返回失败信封的次数。
pub fn record_tool_failure() {
    metrics().tool_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录后端数据服务调用失败次数。
pub fn record_upstream_error() {
    metrics().upstream_errors.fetch_add(1, Ordering::Relaxed);
}

/// 记录因结构不合法被跳过的单条记录数。
pub fn record_skipped_records(count: u64) {
    metrics()
        .skipped_records
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录退化为“未知”的设备风险计算次数。
pub fn record_degraded_assessment() {
    metrics()
        .degraded_assessments
        .fetch_add(1, Ordering::Relaxed);
}
