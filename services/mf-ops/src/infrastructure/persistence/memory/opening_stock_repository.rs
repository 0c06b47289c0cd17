//! 期初库存内存仓储

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::OpeningStockId;
use crate::domain::opening_stock::{OpeningStockEntry, OpeningStockFilter, OpeningStockRepository};

pub struct InMemoryOpeningStockRepository {
    table: MemoryTable<OpeningStockEntry>,
}

impl InMemoryOpeningStockRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Opening stock entry"),
        }
    }
}

impl Default for InMemoryOpeningStockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpeningStockRepository for InMemoryOpeningStockRepository {
    async fn save(&self, entry: &OpeningStockEntry) -> AppResult<()> {
        self.table.insert(entry).await
    }

    async fn update(&self, entry: &OpeningStockEntry) -> AppResult<()> {
        self.table.replace(entry).await
    }

    async fn delete(&self, id: &OpeningStockId, tenant_id: &TenantId) -> AppResult<()> {
        self.table.remove(id, tenant_id).await
    }

    async fn find_by_id(
        &self,
        id: &OpeningStockId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<OpeningStockEntry>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: OpeningStockFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<OpeningStockEntry>> {
        let entries = self
            .table
            .select(tenant_id, |e| {
                filter.status.is_none_or(|s| e.status == s)
                    && filter.warehouse_id.as_ref().is_none_or(|w| &e.warehouse_id == w)
            })
            .await;
        Ok(pagination.slice(entries))
    }
}
