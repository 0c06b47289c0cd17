//! 供应商内存仓储

use async_trait::async_trait;
use mferp_common::utils::contains_ignore_case;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::VendorId;
use crate::domain::vendor::{Vendor, VendorFilter, VendorRepository};

pub struct InMemoryVendorRepository {
    table: MemoryTable<Vendor>,
}

impl InMemoryVendorRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Vendor"),
        }
    }
}

impl Default for InMemoryVendorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VendorRepository for InMemoryVendorRepository {
    async fn save(&self, vendor: &Vendor) -> AppResult<()> {
        self.table.insert(vendor).await
    }

    async fn update(&self, vendor: &Vendor) -> AppResult<()> {
        self.table.replace(vendor).await
    }

    async fn delete(&self, id: &VendorId, tenant_id: &TenantId) -> AppResult<()> {
        self.table.remove(id, tenant_id).await
    }

    async fn find_by_id(&self, id: &VendorId, tenant_id: &TenantId) -> AppResult<Option<Vendor>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn find_by_code(&self, code: &str, tenant_id: &TenantId) -> AppResult<Option<Vendor>> {
        Ok(self
            .table
            .find(tenant_id, |v| v.vendor_code.eq_ignore_ascii_case(code))
            .await)
    }

    async fn exists_by_tax_id(
        &self,
        tax_id: &str,
        tenant_id: &TenantId,
        exclude: Option<VendorId>,
    ) -> AppResult<bool> {
        Ok(self
            .table
            .any(tenant_id, |v| {
                v.tax_id
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(tax_id))
                    && exclude.as_ref() != Some(&v.id)
            })
            .await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: VendorFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Vendor>> {
        let vendors = self
            .table
            .select(tenant_id, |v| {
                filter.status.is_none_or(|s| v.status == s)
                    && filter.vendor_type.is_none_or(|t| v.vendor_type == t)
                    && filter.search.as_deref().is_none_or(|q| {
                        contains_ignore_case(&v.vendor_code, q) || contains_ignore_case(&v.name, q)
                    })
            })
            .await;
        Ok(pagination.slice(vendors))
    }
}
