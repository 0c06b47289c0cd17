//! 服务共享上下文

use std::sync::Arc;

use mferp_common::{Pagination, TenantId};
use mferp_config::AppConfig;
use mferp_errors::{AppError, AppResult};

use crate::domain::Repositories;
use crate::domain::ids::{ItemId, VendorId, WarehouseId};
use crate::domain::inventory::{InventoryPosting, PostingRequest, StockMovement};
use crate::domain::item::Item;
use crate::domain::material_piece::PieceSplitter;
use crate::domain::numbering::DocumentNumberGenerator;
use crate::domain::vendor::Vendor;
use crate::domain::warehouse::Warehouse;
use crate::infrastructure::observability;

/// 各应用服务共用的仓储、编号器、过账服务与配置
pub struct ServiceContext {
    pub repos: Repositories,
    pub numbers: DocumentNumberGenerator,
    posting: InventoryPosting,
    pub config: AppConfig,
}

impl ServiceContext {
    pub fn new(repos: Repositories, config: AppConfig) -> Arc<Self> {
        let numbers =
            DocumentNumberGenerator::new(repos.sequences.clone(), config.numbering.clone());
        let posting = InventoryPosting::new(repos.inventory.clone(), repos.ledger.clone());
        Arc::new(Self {
            repos,
            numbers,
            posting,
            config,
        })
    }

    pub fn page(&self, pagination: Pagination) -> Pagination {
        pagination.normalized(
            self.config.pagination.default_page_size,
            self.config.pagination.max_page_size,
        )
    }

    /// 库存过账并计数
    pub async fn post_stock(&self, request: PostingRequest) -> AppResult<StockMovement> {
        let movement = self.posting.post(request).await?;
        observability::record_stock_movement(movement.movement_type);
        Ok(movement)
    }

    pub fn splitter(&self) -> PieceSplitter {
        PieceSplitter::new(
            self.config.inventory.length_scale,
            self.config.inventory.weight_scale,
        )
    }

    pub async fn load_vendor(&self, tenant_id: &TenantId, id: &VendorId) -> AppResult<Vendor> {
        self.repos
            .vendors
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Vendor {} not found", id)))
    }

    pub async fn load_warehouse(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
    ) -> AppResult<Warehouse> {
        self.repos
            .warehouses
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Warehouse {} not found", id)))
    }

    pub async fn load_item(&self, tenant_id: &TenantId, id: &ItemId) -> AppResult<Item> {
        self.repos
            .items
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {} not found", id)))
    }

    /// 加载仓库并校验可出入库
    pub async fn active_warehouse(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
    ) -> AppResult<Warehouse> {
        let warehouse = self.load_warehouse(tenant_id, id).await?;
        warehouse.ensure_active()?;
        Ok(warehouse)
    }

    pub async fn active_item(&self, tenant_id: &TenantId, id: &ItemId) -> AppResult<Item> {
        let item = self.load_item(tenant_id, id).await?;
        item.ensure_active()?;
        Ok(item)
    }
}
