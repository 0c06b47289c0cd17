//! 期初库存领域模块

pub mod entry;
pub mod repository;

pub use entry::{OpeningStockEntry, OpeningStockStatus};
pub use repository::{OpeningStockFilter, OpeningStockRepository};
