//! Mock 服务模块
//!
//! 提供 LOS 记录树的 REST API 实现，用于开发和测试环境。

pub mod values_service;


pub use values_service::{ValuesServiceState, values_routes};
