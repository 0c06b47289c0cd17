//! 仓库服务

use std::sync::Arc;

use mferp_common::{PagedResult, Pagination, TenantId, UserId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::*;
use super::dto::WarehouseResponse;
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::application::non_empty;
use crate::domain::ids::WarehouseId;
use crate::domain::value_objects::BusinessCode;
use crate::domain::warehouse::{Warehouse, WarehouseFilter};
use crate::error::OpsError;

pub struct WarehouseService {
    ctx: Arc<ServiceContext>,
}

impl WarehouseService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn create_warehouse(
        &self,
        cmd: CreateWarehouseCommand,
    ) -> ApiResponse<WarehouseResponse> {
        self.handle_create(cmd)
            .await
            .map(WarehouseResponse::from)
            .into_envelope("Warehouse created successfully")
    }

    pub async fn update_warehouse(
        &self,
        cmd: UpdateWarehouseCommand,
    ) -> ApiResponse<WarehouseResponse> {
        self.handle_update(cmd)
            .await
            .map(WarehouseResponse::from)
            .into_envelope("Warehouse updated successfully")
    }

    pub async fn get_warehouse(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
    ) -> ApiResponse<WarehouseResponse> {
        self.ctx
            .load_warehouse(tenant_id, id)
            .await
            .map(WarehouseResponse::from)
            .into_envelope("Warehouse retrieved successfully")
    }

    pub async fn list_warehouses(
        &self,
        tenant_id: &TenantId,
        filter: WarehouseFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<WarehouseResponse>> {
        self.ctx
            .repos
            .warehouses
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(WarehouseResponse::from))
            .into_envelope("Warehouses retrieved successfully")
    }

    pub async fn activate_warehouse(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<WarehouseResponse> {
        self.handle_set_active(tenant_id, id, true, performed_by)
            .await
            .map(WarehouseResponse::from)
            .into_envelope("Warehouse activated successfully")
    }

    pub async fn deactivate_warehouse(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<WarehouseResponse> {
        self.handle_set_active(tenant_id, id, false, performed_by)
            .await
            .map(WarehouseResponse::from)
            .into_envelope("Warehouse deactivated successfully")
    }

    /// 删除仓库（仍有库存或原材料件时拒绝）
    pub async fn delete_warehouse(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
    ) -> ApiResponse<()> {
        self.handle_delete(tenant_id, id)
            .await
            .into_envelope("Warehouse deleted successfully")
    }

    async fn handle_create(&self, cmd: CreateWarehouseCommand) -> AppResult<Warehouse> {
        cmd.validate().map_err(AppError::validation)?;
        let code = BusinessCode::new(cmd.code).map_err(OpsError::from)?;

        if self
            .ctx
            .repos
            .warehouses
            .exists_by_code(code.as_str(), &cmd.tenant_id)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Warehouse with code '{}' already exists",
                code
            )));
        }

        let mut warehouse = Warehouse::new(
            cmd.tenant_id,
            code,
            cmd.name.trim().to_string(),
            cmd.warehouse_type,
            cmd.performed_by,
        );
        warehouse.address = non_empty(cmd.address);

        self.ctx.repos.warehouses.save(&warehouse).await?;
        info!(tenant_id = %warehouse.tenant_id, code = %warehouse.code, "Warehouse created");
        Ok(warehouse)
    }

    async fn handle_update(&self, cmd: UpdateWarehouseCommand) -> AppResult<Warehouse> {
        cmd.validate().map_err(AppError::validation)?;
        let mut warehouse = self.ctx.load_warehouse(&cmd.tenant_id, &cmd.warehouse_id).await?;

        if let Some(name) = cmd.name {
            warehouse.name = name.trim().to_string();
        }
        if let Some(warehouse_type) = cmd.warehouse_type {
            warehouse.warehouse_type = warehouse_type;
        }
        if let Some(address) = cmd.address {
            warehouse.address = non_empty(Some(address));
        }

        warehouse.touch(cmd.performed_by);
        self.ctx.repos.warehouses.update(&warehouse).await?;
        info!(tenant_id = %warehouse.tenant_id, code = %warehouse.code, "Warehouse updated");
        Ok(warehouse)
    }

    async fn handle_set_active(
        &self,
        tenant_id: &TenantId,
        id: &WarehouseId,
        active: bool,
        performed_by: Option<UserId>,
    ) -> AppResult<Warehouse> {
        let mut warehouse = self.ctx.load_warehouse(tenant_id, id).await?;
        if active {
            warehouse.activate();
        } else {
            warehouse.deactivate();
        }
        warehouse.touch(performed_by);
        self.ctx.repos.warehouses.update(&warehouse).await?;

        info!(
            tenant_id = %tenant_id,
            code = %warehouse.code,
            is_active = warehouse.is_active,
            "Warehouse activation changed"
        );
        Ok(warehouse)
    }

    async fn handle_delete(&self, tenant_id: &TenantId, id: &WarehouseId) -> AppResult<()> {
        let warehouse = self.ctx.load_warehouse(tenant_id, id).await?;

        if self.ctx.repos.inventory.has_stock_in_warehouse(tenant_id, id).await?
            || self.ctx.repos.pieces.exists_in_warehouse(tenant_id, id).await?
        {
            return Err(AppError::conflict(format!(
                "Warehouse {} still holds stock",
                warehouse.code
            )));
        }

        self.ctx.repos.warehouses.delete(id, tenant_id).await?;
        info!(tenant_id = %tenant_id, code = %warehouse.code, "Warehouse deleted");
        Ok(())
    }
}
