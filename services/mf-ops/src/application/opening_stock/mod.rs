//! 期初库存应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::OpeningStockResponse;
pub use service::OpeningStockService;
