//! 原材料件与使用记录内存仓储

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::table::MemoryTable;
use crate::domain::ids::{MaterialPieceId, MaterialUsageId, WarehouseId};
use crate::domain::material_piece::{
    MaterialPiece, MaterialPieceRepository, MaterialUsage, MaterialUsageRepository, PieceFilter,
    UsageFilter,
};

pub struct InMemoryMaterialPieceRepository {
    table: MemoryTable<MaterialPiece>,
}

impl InMemoryMaterialPieceRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Material piece"),
        }
    }
}

impl Default for InMemoryMaterialPieceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MaterialPieceRepository for InMemoryMaterialPieceRepository {
    async fn save_all(&self, pieces: &[MaterialPiece]) -> AppResult<()> {
        for piece in pieces {
            self.table.insert(piece).await?;
        }
        Ok(())
    }

    async fn update(&self, piece: &MaterialPiece) -> AppResult<()> {
        self.table.replace(piece).await
    }

    async fn find_by_id(
        &self,
        id: &MaterialPieceId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialPiece>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn find_by_number(
        &self,
        piece_number: &str,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialPiece>> {
        Ok(self
            .table
            .find(tenant_id, |p| p.piece_number.eq_ignore_ascii_case(piece_number))
            .await)
    }

    async fn exists_in_warehouse(
        &self,
        tenant_id: &TenantId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<bool> {
        Ok(self
            .table
            .any(tenant_id, |p| &p.warehouse_id == warehouse_id && p.is_usable())
            .await)
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: PieceFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<MaterialPiece>> {
        let pieces = self
            .table
            .select(tenant_id, |p| {
                filter.item_id.as_ref().is_none_or(|id| &p.item_id == id)
                    && filter.warehouse_id.as_ref().is_none_or(|id| &p.warehouse_id == id)
                    && filter.status.is_none_or(|s| p.status == s)
            })
            .await;
        Ok(pagination.slice(pieces))
    }
}

pub struct InMemoryMaterialUsageRepository {
    table: MemoryTable<MaterialUsage>,
}

impl InMemoryMaterialUsageRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("Material usage"),
        }
    }
}

impl Default for InMemoryMaterialUsageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MaterialUsageRepository for InMemoryMaterialUsageRepository {
    async fn save(&self, usage: &MaterialUsage) -> AppResult<()> {
        self.table.insert(usage).await
    }

    async fn update(&self, usage: &MaterialUsage) -> AppResult<()> {
        self.table.replace(usage).await
    }

    async fn find_by_id(
        &self,
        id: &MaterialUsageId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialUsage>> {
        Ok(self.table.get(id, tenant_id).await)
    }

    async fn find_latest_active(
        &self,
        piece_id: &MaterialPieceId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialUsage>> {
        let usages = self
            .table
            .select(tenant_id, |u| &u.piece_id == piece_id && !u.reversed)
            .await;
        Ok(usages.into_iter().next())
    }

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: UsageFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<MaterialUsage>> {
        let usages = self
            .table
            .select(tenant_id, |u| {
                filter.piece_id.as_ref().is_none_or(|id| &u.piece_id == id)
                    && filter.reference.as_deref().is_none_or(|r| u.reference == r)
            })
            .await;
        Ok(pagination.slice(usages))
    }
}
