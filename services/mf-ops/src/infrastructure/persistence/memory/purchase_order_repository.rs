//! 采购订单内存仓储

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::{PurchaseOrderId, VendorId};
use crate::domain::purchase_order::{PurchaseOrder, PurchaseOrderFilter, PurchaseOrderRepository};

pub struct InMemoryPurchaseOrderRepository {
    table: MemoryTable<PurchaseOrder>,
}

impl InMemoryPurchaseOrderRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Purchase order"),
        }
    }
}

impl Default for InMemoryPurchaseOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseOrderRepository for InMemoryPurchaseOrderRepository {
    async fn save(&self, order: &PurchaseOrder) -> AppResult<()> {
        self.table.insert(order).await
    }

    async fn update(&self, order: &PurchaseOrder) -> AppResult<()> {
        self.table.replace(order).await
    }

    async fn delete(&self, id: &PurchaseOrderId, tenant_id: &TenantId) -> AppResult<()> {
        self.table.remove(id, tenant_id).await
    }

    async fn find_by_id(
        &self,
        id: &PurchaseOrderId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<PurchaseOrder>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn find_by_number(
        &self,
        po_number: &str,
        tenant_id: &TenantId,
    ) -> AppResult<Option<PurchaseOrder>> {
        Ok(self.table.find(tenant_id, |o| o.po_number == po_number).await)
    }

    async fn exists_by_vendor(
        &self,
        vendor_id: &VendorId,
        tenant_id: &TenantId,
    ) -> AppResult<bool> {
        Ok(self.table.any(tenant_id, |o| &o.vendor_id == vendor_id).await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: PurchaseOrderFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<PurchaseOrder>> {
        let orders = self
            .table
            .select(tenant_id, |o| {
                filter.vendor_id.as_ref().is_none_or(|v| &o.vendor_id == v)
                    && filter.status.is_none_or(|s| o.status == s)
            })
            .await;
        Ok(pagination.slice(orders))
    }
}
