//! 物料主数据应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::ItemResponse;
pub use service::ItemService;
