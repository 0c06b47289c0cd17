//! 内存仓储实现
//!
//! 供测试与嵌入式使用；所有数据按租户隔离，列表按创建顺序倒序返回。

mod component_issue_repository;
mod inventory_repository;
mod item_repository;
mod material_piece_repository;
mod opening_stock_repository;
mod osp_job_repository;
mod purchase_order_repository;
mod sequence_repository;
mod table;
mod vendor_repository;
mod warehouse_repository;

use std::sync::Arc;

pub use component_issue_repository::InMemoryComponentIssueRepository;
pub use inventory_repository::{InMemoryInventoryRepository, InMemoryStockLedgerRepository};
pub use item_repository::InMemoryItemRepository;
pub use material_piece_repository::{
    InMemoryMaterialPieceRepository, InMemoryMaterialUsageRepository,
};
pub use opening_stock_repository::InMemoryOpeningStockRepository;
pub use osp_job_repository::InMemoryOspJobRepository;
pub use purchase_order_repository::InMemoryPurchaseOrderRepository;
pub use sequence_repository::InMemorySequenceRepository;
pub use vendor_repository::InMemoryVendorRepository;
pub use warehouse_repository::InMemoryWarehouseRepository;

use crate::domain::Repositories;

/// 构建一整套内存仓储
pub fn in_memory_repositories() -> Repositories {
    Repositories {
        vendors: Arc::new(InMemoryVendorRepository::new()),
        warehouses: Arc::new(InMemoryWarehouseRepository::new()),
        items: Arc::new(InMemoryItemRepository::new()),
        inventory: Arc::new(InMemoryInventoryRepository::new()),
        ledger: Arc::new(InMemoryStockLedgerRepository::new()),
        purchase_orders: Arc::new(InMemoryPurchaseOrderRepository::new()),
        component_issues: Arc::new(InMemoryComponentIssueRepository::new()),
        opening_stock: Arc::new(InMemoryOpeningStockRepository::new()),
        pieces: Arc::new(InMemoryMaterialPieceRepository::new()),
        usages: Arc::new(InMemoryMaterialUsageRepository::new()),
        osp_jobs: Arc::new(InMemoryOspJobRepository::new()),
        sequences: Arc::new(InMemorySequenceRepository::new()),
    }
}
