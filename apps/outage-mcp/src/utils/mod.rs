//! Handler 公共辅助函数。

pub mod response;
pub mod validation;

pub use response::{envelope, invalid_argument, passthrough, upstream_error};
pub use validation::{normalize_required, require_analysis_type, tool_args};
