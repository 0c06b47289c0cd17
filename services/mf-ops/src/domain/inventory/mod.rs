//! 库存领域模块
//!
//! 汇总库存（数量 / 重量 / 长度）与库存流水账。所有出入库都经过
//! [`InventoryPosting`]，保证余额与流水同步。

pub mod balance;
pub mod movement;
pub mod posting;
pub mod repository;

pub use balance::{InventoryBalance, StockLevel};
pub use movement::{MovementType, StockDelta, StockMovement};
pub use posting::{InventoryPosting, PostingRequest};
pub use repository::{BalanceFilter, InventoryRepository, StockLedgerRepository};
