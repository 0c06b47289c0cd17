//! 外协加工应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::{OspJobResponse, OspReceiptResponse};
pub use service::OspJobService;
