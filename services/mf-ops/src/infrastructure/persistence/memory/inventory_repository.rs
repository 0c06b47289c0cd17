//! 库存余额与流水内存仓储

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;
use tokio::sync::RwLock;

use super::table::MemoryTable;
use crate::domain::ids::{ItemId, WarehouseId};
use crate::domain::inventory::{
    BalanceFilter, InventoryBalance, InventoryRepository, StockLedgerRepository, StockMovement,
};

pub struct InMemoryInventoryRepository {
    table: MemoryTable<InventoryBalance>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Inventory balance"),
        }
    }
}

impl Default for InMemoryInventoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn find_balance(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<Option<InventoryBalance>> {
        Ok(self
            .table
            .find(tenant_id, |b| &b.item_id == item_id && &b.warehouse_id == warehouse_id)
            .await)
    }

    async fn save_balance(&self, balance: &InventoryBalance) -> AppResult<()> {
        self.table.upsert(balance).await
    }

    async fn list_balances(
        &self,
        tenant_id: &TenantId,
        filter: BalanceFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<InventoryBalance>> {
        let balances = self
            .table
            .select(tenant_id, |b| {
                filter.item_id.as_ref().is_none_or(|id| &b.item_id == id)
                    && filter.warehouse_id.as_ref().is_none_or(|id| &b.warehouse_id == id)
            })
            .await;
        Ok(pagination.slice(balances))
    }

    async fn balances_for_item(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
    ) -> AppResult<Vec<InventoryBalance>> {
        Ok(self.table.select(tenant_id, |b| &b.item_id == item_id).await)
    }

    async fn has_stock_in_warehouse(
        &self,
        tenant_id: &TenantId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<bool> {
        Ok(self
            .table
            .any(tenant_id, |b| {
                &b.warehouse_id == warehouse_id && !b.level().is_zero()
            })
            .await)
    }
}

/// 只追加的流水账
pub struct InMemoryStockLedgerRepository {
    movements: RwLock<Vec<StockMovement>>,
}

impl InMemoryStockLedgerRepository {
    pub fn new() -> Self {
        Self {
            movements: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStockLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StockLedgerRepository for InMemoryStockLedgerRepository {
    async fn append(&self, movement: &StockMovement) -> AppResult<()> {
        self.movements.write().await.push(movement.clone());
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: Option<WarehouseId>,
        pagination: Pagination,
    ) -> AppResult<PagedResult<StockMovement>> {
        let movements: Vec<StockMovement> = self
            .movements
            .read()
            .await
            .iter()
            .rev()
            .filter(|m| {
                &m.tenant_id == tenant_id
                    && &m.item_id == item_id
                    && warehouse_id.as_ref().is_none_or(|w| &m.warehouse_id == w)
            })
            .cloned()
            .collect();
        Ok(pagination.slice(movements))
    }
}
