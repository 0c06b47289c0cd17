//! 期初库存仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::entry::{OpeningStockEntry, OpeningStockStatus};
use crate::domain::ids::{OpeningStockId, WarehouseId};

#[derive(Debug, Clone, Default)]
pub struct OpeningStockFilter {
    pub status: Option<OpeningStockStatus>,
    pub warehouse_id: Option<WarehouseId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpeningStockRepository: Send + Sync {
    async fn save(&self, entry: &OpeningStockEntry) -> AppResult<()>;

    async fn update(&self, entry: &OpeningStockEntry) -> AppResult<()>;

    async fn delete(&self, id: &OpeningStockId, tenant_id: &TenantId) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &OpeningStockId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<OpeningStockEntry>>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: OpeningStockFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<OpeningStockEntry>>;
}
