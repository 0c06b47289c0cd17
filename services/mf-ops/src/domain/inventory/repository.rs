//! 库存仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::balance::InventoryBalance;
use super::movement::StockMovement;
use crate::domain::ids::{ItemId, WarehouseId};

#[derive(Debug, Clone, Default)]
pub struct BalanceFilter {
    pub warehouse_id: Option<WarehouseId>,
    pub item_id: Option<ItemId>,
}

/// 库存余额仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_balance(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<Option<InventoryBalance>>;

    /// 按 (物料, 仓库) 新增或覆盖余额
    async fn save_balance(&self, balance: &InventoryBalance) -> AppResult<()>;

    async fn list_balances(
        &self,
        tenant_id: &TenantId,
        filter: BalanceFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<InventoryBalance>>;

    /// 物料在所有仓库的余额
    async fn balances_for_item(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
    ) -> AppResult<Vec<InventoryBalance>>;

    /// 仓库内是否存在非零余额
    async fn has_stock_in_warehouse(
        &self,
        tenant_id: &TenantId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<bool>;
}

/// 库存流水仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockLedgerRepository: Send + Sync {
    async fn append(&self, movement: &StockMovement) -> AppResult<()>;

    /// 按时间倒序
    async fn list(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: Option<WarehouseId>,
        pagination: Pagination,
    ) -> AppResult<PagedResult<StockMovement>>;
}
