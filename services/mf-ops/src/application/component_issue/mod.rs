//! 组件发料应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::ComponentIssueResponse;
pub use service::ComponentIssueService;
