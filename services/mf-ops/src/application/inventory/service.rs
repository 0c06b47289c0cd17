//! 库存查询与调整服务

use std::sync::Arc;

use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use tracing::info;

use super::commands::AdjustStockCommand;
use super::dto::{LowStockResponse, StockMovementResponse, StockResponse};
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::domain::ids::{ItemId, WarehouseId};
use crate::domain::inventory::{
    BalanceFilter, InventoryBalance, MovementType, PostingRequest, StockDelta, StockMovement,
};

pub struct InventoryService {
    ctx: Arc<ServiceContext>,
}

impl InventoryService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 物料在某仓库的库存（无记录时返回零）
    pub async fn get_stock(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: &WarehouseId,
    ) -> ApiResponse<StockResponse> {
        self.handle_get_stock(tenant_id, item_id, warehouse_id)
            .await
            .map(StockResponse::from)
            .into_envelope("Stock retrieved successfully")
    }

    pub async fn list_stock(
        &self,
        tenant_id: &TenantId,
        filter: BalanceFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<StockResponse>> {
        self.ctx
            .repos
            .inventory
            .list_balances(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(StockResponse::from))
            .into_envelope("Stock retrieved successfully")
    }

    /// 低于再订货点的物料
    pub async fn list_low_stock(&self, tenant_id: &TenantId) -> ApiResponse<Vec<LowStockResponse>> {
        self.handle_low_stock(tenant_id)
            .await
            .into_envelope("Low stock items retrieved successfully")
    }

    pub async fn adjust_stock(
        &self,
        cmd: AdjustStockCommand,
    ) -> ApiResponse<StockMovementResponse> {
        self.handle_adjust(cmd)
            .await
            .map(StockMovementResponse::from)
            .into_envelope("Stock adjusted successfully")
    }

    /// 库存流水（最新在前）
    pub async fn stock_ledger(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: Option<WarehouseId>,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<StockMovementResponse>> {
        self.ctx
            .repos
            .ledger
            .list(tenant_id, item_id, warehouse_id, self.ctx.page(pagination))
            .await
            .map(|page| page.map(StockMovementResponse::from))
            .into_envelope("Stock ledger retrieved successfully")
    }

    async fn handle_get_stock(
        &self,
        tenant_id: &TenantId,
        item_id: &ItemId,
        warehouse_id: &WarehouseId,
    ) -> AppResult<InventoryBalance> {
        self.ctx.load_item(tenant_id, item_id).await?;
        self.ctx.load_warehouse(tenant_id, warehouse_id).await?;

        let balance = self
            .ctx
            .repos
            .inventory
            .find_balance(tenant_id, item_id, warehouse_id)
            .await?
            .unwrap_or_else(|| {
                InventoryBalance::new(tenant_id.clone(), item_id.clone(), warehouse_id.clone())
            });
        Ok(balance)
    }

    async fn handle_low_stock(&self, tenant_id: &TenantId) -> AppResult<Vec<LowStockResponse>> {
        let items = self.ctx.repos.items.find_with_reorder_level(tenant_id).await?;

        let mut report = Vec::new();
        for item in items.into_iter().filter(|i| i.is_active) {
            let Some(reorder_level) = item.reorder_level else {
                continue;
            };
            let total_quantity: Decimal = self
                .ctx
                .repos
                .inventory
                .balances_for_item(tenant_id, &item.id)
                .await?
                .iter()
                .map(|b| b.quantity)
                .sum();

            if total_quantity < reorder_level {
                report.push(LowStockResponse {
                    item_id: item.id,
                    item_code: item.item_code,
                    name: item.name,
                    reorder_level,
                    total_quantity,
                    shortfall: reorder_level - total_quantity,
                });
            }
        }

        report.sort_by(|a, b| b.shortfall.cmp(&a.shortfall));
        Ok(report)
    }

    async fn handle_adjust(&self, cmd: AdjustStockCommand) -> AppResult<StockMovement> {
        cmd.validate().map_err(AppError::validation)?;
        let item = self.ctx.active_item(&cmd.tenant_id, &cmd.item_id).await?;
        item.ensure_not_raw_material("stock adjustment")?;
        self.ctx.active_warehouse(&cmd.tenant_id, &cmd.warehouse_id).await?;

        let movement = self
            .ctx
            .post_stock(PostingRequest {
                tenant_id: cmd.tenant_id,
                item_id: item.id,
                item_code: item.item_code.clone(),
                warehouse_id: cmd.warehouse_id,
                movement_type: MovementType::Adjustment,
                delta: StockDelta::quantity(cmd.quantity_delta),
                reference: None,
                remarks: Some(cmd.reason.trim().to_string()),
                performed_by: cmd.performed_by,
            })
            .await?;

        info!(
            tenant_id = %movement.tenant_id,
            item_code = %item.item_code,
            quantity_delta = %movement.quantity_delta,
            "Stock adjusted"
        );
        Ok(movement)
    }
}
