//! 库存应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::{LowStockResponse, StockMovementResponse, StockResponse};
pub use service::InventoryService;
