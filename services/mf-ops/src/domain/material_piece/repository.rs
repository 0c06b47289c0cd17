//! 原材料件与使用记录仓储接口

use async_trait::async_trait;
use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::AppResult;

use super::piece::{MaterialPiece, PieceStatus};
use super::usage::MaterialUsage;
use crate::domain::ids::{ItemId, MaterialPieceId, MaterialUsageId, WarehouseId};

#[derive(Debug, Clone, Default)]
pub struct PieceFilter {
    pub item_id: Option<ItemId>,
    pub warehouse_id: Option<WarehouseId>,
    pub status: Option<PieceStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct UsageFilter {
    pub piece_id: Option<MaterialPieceId>,
    pub reference: Option<String>,
}

/// 原材料件仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialPieceRepository: Send + Sync {
    async fn save_all(&self, pieces: &[MaterialPiece]) -> AppResult<()>;

    async fn update(&self, piece: &MaterialPiece) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &MaterialPieceId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialPiece>>;

    async fn find_by_number(
        &self,
        piece_number: &str,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialPiece>>;

    /// 仓库内是否还有未用完、未报废的件
    async fn exists_in_warehouse(
        &self,
        tenant_id: &TenantId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<bool>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: PieceFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<MaterialPiece>>;
}

/// 使用记录仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialUsageRepository: Send + Sync {
    async fn save(&self, usage: &MaterialUsage) -> AppResult<()>;

    async fn update(&self, usage: &MaterialUsage) -> AppResult<()>;

    async fn find_by_id(
        &self,
        id: &MaterialUsageId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialUsage>>;

    /// 件最近一条未冲销的使用记录
    async fn find_latest_active(
        &self,
        piece_id: &MaterialPieceId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<MaterialUsage>>;

    async fn list(
        &self,
        tenant_id: &TenantId,
        filter: UsageFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<MaterialUsage>>;
}
