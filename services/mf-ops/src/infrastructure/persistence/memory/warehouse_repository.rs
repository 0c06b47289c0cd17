//! 仓库内存仓储

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::WarehouseId;
use crate::domain::warehouse::{Warehouse, WarehouseFilter, WarehouseRepository};

pub struct InMemoryWarehouseRepository {
    table: MemoryTable<Warehouse>,
}

impl InMemoryWarehouseRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Warehouse"),
        }
    }
}

impl Default for InMemoryWarehouseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WarehouseRepository for InMemoryWarehouseRepository {
    async fn save(&self, warehouse: &Warehouse) -> AppResult<()> {
        self.table.insert(warehouse).await
    }

    async fn update(&self, warehouse: &Warehouse) -> AppResult<()> {
        self.table.replace(warehouse).await
    }

    async fn delete(&self, id: &WarehouseId, tenant_id: &TenantId) -> AppResult<()> {
        self.table.remove(id, tenant_id).await
    }

    async fn find_by_id(
        &self,
        id: &WarehouseId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<Warehouse>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn exists_by_code(&self, code: &str, tenant_id: &TenantId) -> AppResult<bool> {
        Ok(self.table.any(tenant_id, |w| w.code == code).await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: WarehouseFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Warehouse>> {
        let warehouses = self
            .table
            .select(tenant_id, |w| {
                (!filter.active_only || w.is_active)
                    && filter.warehouse_type.is_none_or(|t| w.warehouse_type == t)
            })
            .await;
        Ok(pagination.slice(warehouses))
    }
}
