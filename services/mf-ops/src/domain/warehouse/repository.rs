//! 仓库仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::warehouse::{Warehouse, WarehouseType};
use crate::domain::ids::WarehouseId;

#[derive(Debug, Clone, Default)]
pub struct WarehouseFilter {
    pub active_only: bool,
    pub warehouse_type: Option<WarehouseType>,
}

/// 仓库仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn save(&self, warehouse: &Warehouse) -> AppResult<()>;

    async fn update(&self, warehouse: &Warehouse) -> AppResult<()>;

    async fn delete(&self, id: &WarehouseId, tenant_id: &TenantId) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &WarehouseId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<Warehouse>>;

    async fn exists_by_code(&self, code: &str, tenant_id: &TenantId) -> AppResult<bool>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: WarehouseFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Warehouse>>;
}
