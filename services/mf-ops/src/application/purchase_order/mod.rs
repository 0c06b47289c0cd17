//! 采购订单应用服务

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::{PurchaseOrderLineResponse, PurchaseOrderResponse, PurchaseReceiptResponse};
pub use service::PurchaseOrderService;
