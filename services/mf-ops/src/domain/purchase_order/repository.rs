//! 采购订单仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::order::{PurchaseOrder, PurchaseOrderStatus};
use crate::domain::ids::{PurchaseOrderId, VendorId};

#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderFilter {
    pub vendor_id: Option<VendorId>,
    pub status: Option<PurchaseOrderStatus>,
}

/// 采购订单仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn save(&self, order: &PurchaseOrder) -> AppResult<()>;

    async fn update(&self, order: &PurchaseOrder) -> AppResult<()>;

    async fn delete(&self, id: &PurchaseOrderId, tenant_id: &TenantId) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &PurchaseOrderId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<PurchaseOrder>>;

    async fn find_by_number(
        &self,
        po_number: &str,
        tenant_id: &TenantId,
    ) -> AppResult<Option<PurchaseOrder>>;

    async fn exists_by_vendor(&self, vendor_id: &VendorId, tenant_id: &TenantId) -> AppResult<bool>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: PurchaseOrderFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<PurchaseOrder>>;
}
