//! 制造运营服务（mf-ops）
//!
//! - `domain`: 实体、业务规则、仓储接口、编号与拆件
//! - `application`: 各业务模块的应用服务与统一响应
//! - `infrastructure`: 内存仓储与业务指标

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{ApiResponse, ServiceRegistry};
pub use error::OpsError;
