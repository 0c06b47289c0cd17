//! 组件发料仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::issue::ComponentIssue;
use crate::domain::ids::{ComponentIssueId, ItemId, WarehouseId};

#[derive(Debug, Clone, Default)]
pub struct ComponentIssueFilter {
    pub item_id: Option<ItemId>,
    pub warehouse_id: Option<WarehouseId>,
    pub issued_to: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComponentIssueRepository: Send + Sync {
    async fn save(&self, issue: &ComponentIssue) -> AppResult<()>;

    async fn update(&self, issue: &ComponentIssue) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &ComponentIssueId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<ComponentIssue>>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: ComponentIssueFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<ComponentIssue>>;
}
