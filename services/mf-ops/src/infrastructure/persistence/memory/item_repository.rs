//! 物料内存仓储

use async_trait::async_trait;
use mferp_common::utils::contains_ignore_case;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::ItemId;
use crate::domain::item::{Item, ItemFilter, ItemRepository};

pub struct InMemoryItemRepository {
    table: MemoryTable<Item>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Item"),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn save(&self, item: &Item) -> AppResult<()> {
        self.table.insert(item).await
    }

    async fn update(&self, item: &Item) -> AppResult<()> {
        self.table.replace(item).await
    }

    async fn find_by_id(&self, id: &ItemId, tenant_id: &TenantId) -> AppResult<Option<Item>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn exists_by_code(&self, code: &str, tenant_id: &TenantId) -> AppResult<bool> {
        Ok(self.table.any(tenant_id, |i| i.item_code == code).await)
    }

    async fn find_with_reorder_level(&self, tenant_id: &TenantId) -> AppResult<Vec<Item>> {
        Ok(self
            .table
            .select(tenant_id, |i| i.reorder_level.is_some())
            .await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: ItemFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Item>> {
        let items = self
            .table
            .select(tenant_id, |i| {
                filter.category.is_none_or(|c| i.category == c)
                    && (!filter.active_only || i.is_active)
                    && filter.search.as_deref().is_none_or(|q| {
                        contains_ignore_case(&i.item_code, q) || contains_ignore_case(&i.name, q)
                    })
            })
            .await;
        Ok(pagination.slice(items))
    }
}
