//! 组件发料内存仓储

use async_trait::async_trait;
use mferp_common::utils::contains_ignore_case;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::component_issue::{
    ComponentIssue, ComponentIssueFilter, ComponentIssueRepository,
};
use crate::domain::ids::ComponentIssueId;

pub struct InMemoryComponentIssueRepository {
    table: MemoryTable<ComponentIssue>,
}

impl InMemoryComponentIssueRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Component issue"),
        }
    }
}

impl Default for InMemoryComponentIssueRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComponentIssueRepository for InMemoryComponentIssueRepository {
    async fn save(&self, issue: &ComponentIssue) -> AppResult<()> {
        self.table.insert(issue).await
    }

    async fn update(&self, issue: &ComponentIssue) -> AppResult<()> {
        self.table.replace(issue).await
    }

    async fn find_by_id(
        &self,
        id: &ComponentIssueId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<ComponentIssue>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: ComponentIssueFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<ComponentIssue>> {
        let issues = self
            .table
            .select(tenant_id, |i| {
                filter.item_id.as_ref().is_none_or(|id| &i.item_id == id)
                    && filter.warehouse_id.as_ref().is_none_or(|id| &i.warehouse_id == id)
                    && filter
                        .issued_to
                        .as_deref()
                        .is_none_or(|q| contains_ignore_case(&i.issued_to, q))
            })
            .await;
        Ok(pagination.slice(issues))
    }
}
