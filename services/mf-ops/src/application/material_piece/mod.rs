//! 原材料件与使用记录应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::{MaterialPieceResponse, MaterialUsageResponse, PieceUsageResponse};
pub use service::MaterialPieceService;
