//! 仓库应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::WarehouseResponse;
pub use service::WarehouseService;
