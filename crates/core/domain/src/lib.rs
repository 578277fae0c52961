//! 停电研判领域模型：PSR 设备类型目录、知识库常量表与后端数据的宽松读取。
//!
//! 这里的表都是进程级只读常量，由外部知识库给定，不在运行时计算或修改。

pub mod catalog;
pub mod knowledge;
pub mod lenient;

pub use catalog::{DeviceCategory, PsrType, normalize_psr_type};
pub use knowledge::{WEATHER_FAULT_RISKS, weather_fault_risks};
