//! 仓储集合

use std::sync::Arc;

use super::component_issue::ComponentIssueRepository;
use super::inventory::{InventoryRepository, StockLedgerRepository};
use super::item::ItemRepository;
use super::material_piece::{MaterialPieceRepository, MaterialUsageRepository};
use super::numbering::SequenceRepository;
use super::opening_stock::OpeningStockRepository;
use super::osp::OspJobRepository;
use super::purchase_order::PurchaseOrderRepository;
use super::vendor::VendorRepository;
use super::warehouse::WarehouseRepository;

/// 服务层依赖的全部仓储端口
#[derive(Clone)]
pub struct Repositories {
    pub vendors: Arc<dyn VendorRepository>,
    pub warehouses: Arc<dyn WarehouseRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub ledger: Arc<dyn StockLedgerRepository>,
    pub purchase_orders: Arc<dyn PurchaseOrderRepository>,
    pub component_issues: Arc<dyn ComponentIssueRepository>,
    pub opening_stock: Arc<dyn OpeningStockRepository>,
    pub pieces: Arc<dyn MaterialPieceRepository>,
    pub usages: Arc<dyn MaterialUsageRepository>,
    pub osp_jobs: Arc<dyn OspJobRepository>,
    pub sequences: Arc<dyn SequenceRepository>,
}
