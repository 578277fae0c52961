//! 后端数据访问。
//!
//! - [`DataServiceClient`]：数据服务，`<base>/<path>`，请求头携带 `AuthToken`，单次请求、固定超时。
//! - [`LandformClient`]：地貌服务，失败时降级为“未知”。
//! - [`in_memory`]：预置响应的内存实现，供 handler 测试使用。
//!
//! handler 只依赖 [`DataFetcher`] 与 [`LandformLookup`] 两个 trait。

pub mod client;
pub mod error;
pub mod in_memory;
pub mod landform;
pub mod traits;

pub use client::DataServiceClient;
pub use error::DataServiceError;
pub use in_memory::{FixedLandform, InMemoryDataService, RecordedRequest};
pub use landform::LandformClient;
pub use traits::{DataFetcher, HttpMethod, LandformLookup};
