//! 应用层
//!
//! 每个业务模块包含命令、响应 DTO 与服务；服务对外统一返回 `ApiResponse`。

pub mod component_issue;
pub mod context;
pub mod envelope;
pub mod inventory;
pub mod item;
pub mod material_piece;
pub mod opening_stock;
pub mod osp;
pub mod purchase_order;
pub mod vendor;
pub mod warehouse;

mod intake;

use mferp_config::AppConfig;

pub use context::ServiceContext;
pub use envelope::{ApiResponse, IntoEnvelope};

use crate::domain::Repositories;
use crate::infrastructure::persistence::memory::in_memory_repositories;

/// 去除首尾空白，空串视为未填写
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 全部应用服务（共享同一上下文）
pub struct ServiceRegistry {
    pub vendors: vendor::VendorService,
    pub warehouses: warehouse::WarehouseService,
    pub items: item::ItemService,
    pub inventory: inventory::InventoryService,
    pub purchase_orders: purchase_order::PurchaseOrderService,
    pub component_issues: component_issue::ComponentIssueService,
    pub opening_stock: opening_stock::OpeningStockService,
    pub pieces: material_piece::MaterialPieceService,
    pub osp_jobs: osp::OspJobService,
}

impl ServiceRegistry {
    pub fn new(repos: Repositories, config: AppConfig) -> Self {
        let ctx = ServiceContext::new(repos, config);
        Self {
            vendors: vendor::VendorService::new(ctx.clone()),
            warehouses: warehouse::WarehouseService::new(ctx.clone()),
            items: item::ItemService::new(ctx.clone()),
            inventory: inventory::InventoryService::new(ctx.clone()),
            purchase_orders: purchase_order::PurchaseOrderService::new(ctx.clone()),
            component_issues: component_issue::ComponentIssueService::new(ctx.clone()),
            opening_stock: opening_stock::OpeningStockService::new(ctx.clone()),
            pieces: material_piece::MaterialPieceService::new(ctx.clone()),
            osp_jobs: osp::OspJobService::new(ctx),
        }
    }

    /// 使用内存仓储构建
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(in_memory_repositories(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  Pune  ".to_string())), Some("Pune".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
