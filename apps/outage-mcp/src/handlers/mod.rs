//! Handlers 模块

pub mod catalog;
pub mod fetch;
pub mod metrics;
pub mod processing;

pub use catalog::*;
pub use fetch::*;
pub use metrics::*;
pub use processing::*;
