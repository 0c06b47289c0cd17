//! 采购订单领域模块

pub mod order;
pub mod repository;

pub use order::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};
pub use repository::{PurchaseOrderFilter, PurchaseOrderRepository};
