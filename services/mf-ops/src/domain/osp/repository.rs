//! 外协加工单仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::job::{OspJob, OspJobStatus};
use crate::domain::ids::{OspJobId, VendorId};

#[derive(Debug, Clone, Default)]
pub struct OspJobFilter {
    pub vendor_id: Option<VendorId>,
    pub status: Option<OspJobStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OspJobRepository: Send + Sync {
    async fn save(&self, job: &OspJob) -> AppResult<()>;

    async fn update(&self, job: &OspJob) -> AppResult<()>;

    async fn find_by_id(&self, id: &OspJobId, tenant_id: &TenantId) -> AppResult<Option<OspJob>>;

    async fn exists_by_vendor(&self, vendor_id: &VendorId, tenant_id: &TenantId) -> AppResult<bool>;

    /// 所有未结案（Sent / PartiallyReceived）的加工单
    async fn find_open(&self, tenant_id: &TenantId) -> AppResult<Vec<OspJob>>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: OspJobFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<OspJob>>;
}
