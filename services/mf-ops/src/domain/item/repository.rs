//! 物料仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::item::{Item, ItemCategory};
use crate::domain::ids::ItemId;

/// 物料列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category: Option<ItemCategory>,
    pub active_only: bool,
    /// 按编码或名称模糊搜索
    pub search: Option<String>,
}

/// 物料仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn save(&self, item: &Item) -> AppResult<()>;

    async fn update(&self, item: &Item) -> AppResult<()>;

    async fn find_by_id(&self, id: &ItemId, tenant_id: &TenantId) -> AppResult<Option<Item>>;

    async fn exists_by_code(&self, code: &str, tenant_id: &TenantId) -> AppResult<bool>;

    /// 设置了再订货点的物料（低库存报表用）
    async fn find_with_reorder_level(&self, tenant_id: &TenantId) -> AppResult<Vec<Item>>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: ItemFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Item>>;
}
