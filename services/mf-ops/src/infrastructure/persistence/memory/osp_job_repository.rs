//! 外协加工单内存仓储

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::{OspJobId, VendorId};
use crate::domain::osp::{OspJob, OspJobFilter, OspJobRepository};

pub struct InMemoryOspJobRepository {
    table: MemoryTable<OspJob>,
}

impl InMemoryOspJobRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("OSP job"),
        }
    }
}

impl Default for InMemoryOspJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OspJobRepository for InMemoryOspJobRepository {
    async fn save(&self, job: &OspJob) -> AppResult<()> {
        self.table.insert(job).await
    }

    async fn update(&self, job: &OspJob) -> AppResult<()> {
        self.table.replace(job).await
    }

    async fn find_by_id(&self, id: &OspJobId, tenant_id: &TenantId) -> AppResult<Option<OspJob>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn exists_by_vendor(
        &self,
        vendor_id: &VendorId,
        tenant_id: &TenantId,
    ) -> AppResult<bool> {
        Ok(self.table.any(tenant_id, |j| &j.vendor_id == vendor_id).await)
    }

    async fn find_open(&self, tenant_id: &TenantId) -> AppResult<Vec<OspJob>> {
        Ok(self.table.select(tenant_id, |j| j.status.is_open()).await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: OspJobFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<OspJob>> {
        let jobs = self
            .table
            .select(tenant_id, |j| {
                filter.vendor_id.as_ref().is_none_or(|v| &j.vendor_id == v)
                    && filter.status.is_none_or(|s| j.status == s)
            })
            .await;
        Ok(pagination.slice(jobs))
    }
}
