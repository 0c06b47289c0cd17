//! 期初库存服务

use std::sync::Arc;

use chrono::Utc;
use mferp_common::{PagedResult, Pagination, TenantId, UserId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::*;
use super::dto::OpeningStockResponse;
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::application::intake::{
    RawMaterialIntake, check_raw_quantities, plan_raw_pieces, receive_raw_material,
};
use crate::application::non_empty;
use crate::domain::ids::OpeningStockId;
use crate::domain::inventory::{MovementType, PostingRequest, StockDelta};
use crate::domain::item::Item;
use crate::domain::material_piece::PieceSource;
use crate::domain::numbering::DocumentKind;
use crate::domain::opening_stock::{OpeningStockEntry, OpeningStockFilter};
use crate::infrastructure::observability;

pub struct OpeningStockService {
    ctx: Arc<ServiceContext>,
}

impl OpeningStockService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn create_opening_stock(
        &self,
        cmd: CreateOpeningStockCommand,
    ) -> ApiResponse<OpeningStockResponse> {
        self.handle_create(cmd)
            .await
            .map(OpeningStockResponse::from)
            .into_envelope("Opening stock entry created successfully")
    }

    pub async fn update_opening_stock(
        &self,
        cmd: UpdateOpeningStockCommand,
    ) -> ApiResponse<OpeningStockResponse> {
        self.handle_update(cmd)
            .await
            .map(OpeningStockResponse::from)
            .into_envelope("Opening stock entry updated successfully")
    }

    /// 确认期初单：原材料拆件入库，其他物料按数量入库
    pub async fn confirm_opening_stock(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<OpeningStockResponse> {
        self.handle_confirm(tenant_id, id, performed_by)
            .await
            .map(OpeningStockResponse::from)
            .into_envelope("Opening stock entry confirmed successfully")
    }

    pub async fn cancel_opening_stock(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<OpeningStockResponse> {
        self.handle_cancel(tenant_id, id, performed_by)
            .await
            .map(OpeningStockResponse::from)
            .into_envelope("Opening stock entry cancelled successfully")
    }

    pub async fn delete_opening_stock(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
    ) -> ApiResponse<()> {
        self.handle_delete(tenant_id, id)
            .await
            .into_envelope("Opening stock entry deleted successfully")
    }

    pub async fn get_opening_stock(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
    ) -> ApiResponse<OpeningStockResponse> {
        self.load(tenant_id, id)
            .await
            .map(OpeningStockResponse::from)
            .into_envelope("Opening stock entry retrieved successfully")
    }

    pub async fn list_opening_stock(
        &self,
        tenant_id: &TenantId,
        filter: OpeningStockFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<OpeningStockResponse>> {
        self.ctx
            .repos
            .opening_stock
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(OpeningStockResponse::from))
            .into_envelope("Opening stock entries retrieved successfully")
    }

    async fn load(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
    ) -> AppResult<OpeningStockEntry> {
        self.ctx
            .repos
            .opening_stock
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Opening stock entry {} not found", id)))
    }

    fn check_item_rules(item: &Item, entry: &OpeningStockEntry) -> AppResult<()> {
        if item.is_raw_material() {
            check_raw_quantities(entry.quantity, entry.total_weight_kg, entry.length_per_piece_mm)?;
        }
        Ok(())
    }

    async fn handle_create(&self, cmd: CreateOpeningStockCommand) -> AppResult<OpeningStockEntry> {
        cmd.validate().map_err(AppError::validation)?;
        let item = self.ctx.active_item(&cmd.tenant_id, &cmd.item_id).await?;
        self.ctx.active_warehouse(&cmd.tenant_id, &cmd.warehouse_id).await?;

        let entry_number = self
            .ctx
            .numbers
            .next_document_number(
                &cmd.tenant_id,
                DocumentKind::OpeningStock,
                Utc::now().date_naive(),
            )
            .await?;

        let mut entry = OpeningStockEntry::new(
            cmd.tenant_id,
            entry_number,
            cmd.item_id,
            cmd.warehouse_id,
            cmd.quantity,
            cmd.performed_by,
        );
        entry.total_weight_kg = cmd.total_weight_kg;
        entry.length_per_piece_mm = cmd.length_per_piece_mm;
        entry.heat_number = non_empty(cmd.heat_number);
        entry.unit_cost = cmd.unit_cost;
        entry.remarks = non_empty(cmd.remarks);
        Self::check_item_rules(&item, &entry)?;

        self.ctx.repos.opening_stock.save(&entry).await?;
        observability::record_document_created(DocumentKind::OpeningStock.as_str());

        info!(
            tenant_id = %entry.tenant_id,
            entry_number = %entry.entry_number,
            item_code = %item.item_code,
            quantity = %entry.quantity,
            "Opening stock entry created"
        );
        Ok(entry)
    }

    async fn handle_update(&self, cmd: UpdateOpeningStockCommand) -> AppResult<OpeningStockEntry> {
        cmd.validate().map_err(AppError::validation)?;
        let mut entry = self.load(&cmd.tenant_id, &cmd.entry_id).await?;
        entry.ensure_draft("update")?;

        if let Some(warehouse_id) = cmd.warehouse_id {
            self.ctx.active_warehouse(&cmd.tenant_id, &warehouse_id).await?;
            entry.warehouse_id = warehouse_id;
        }
        if let Some(quantity) = cmd.quantity {
            entry.quantity = quantity;
        }
        if cmd.total_weight_kg.is_some() {
            entry.total_weight_kg = cmd.total_weight_kg;
        }
        if cmd.length_per_piece_mm.is_some() {
            entry.length_per_piece_mm = cmd.length_per_piece_mm;
        }
        if let Some(heat_number) = cmd.heat_number {
            entry.heat_number = non_empty(Some(heat_number));
        }
        if cmd.unit_cost.is_some() {
            entry.unit_cost = cmd.unit_cost;
        }
        if let Some(remarks) = cmd.remarks {
            entry.remarks = non_empty(Some(remarks));
        }

        let item = self.ctx.load_item(&cmd.tenant_id, &entry.item_id).await?;
        Self::check_item_rules(&item, &entry)?;

        entry.touch(cmd.performed_by);
        self.ctx.repos.opening_stock.update(&entry).await?;
        info!(
            tenant_id = %entry.tenant_id,
            entry_number = %entry.entry_number,
            "Opening stock entry updated"
        );
        Ok(entry)
    }

    async fn handle_confirm(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
        performed_by: Option<UserId>,
    ) -> AppResult<OpeningStockEntry> {
        let mut entry = self.load(tenant_id, id).await?;
        entry.ensure_draft("confirm")?;
        let item = self.ctx.active_item(tenant_id, &entry.item_id).await?;
        self.ctx.active_warehouse(tenant_id, &entry.warehouse_id).await?;

        let piece_ids = if item.is_raw_material() {
            let dimensions = plan_raw_pieces(
                &self.ctx,
                &item,
                entry.quantity,
                entry.total_weight_kg,
                entry.length_per_piece_mm,
            )?;
            let pieces = receive_raw_material(
                &self.ctx,
                RawMaterialIntake {
                    tenant_id,
                    item: &item,
                    warehouse_id: &entry.warehouse_id,
                    dimensions,
                    heat_number: entry.heat_number.clone(),
                    source: PieceSource::OpeningStock,
                    source_ref: &entry.entry_number,
                    movement_type: MovementType::OpeningStock,
                    performed_by: performed_by.clone(),
                },
            )
            .await?;
            pieces.into_iter().map(|p| p.id).collect()
        } else {
            self.ctx
                .post_stock(PostingRequest {
                    tenant_id: tenant_id.clone(),
                    item_id: item.id.clone(),
                    item_code: item.item_code.clone(),
                    warehouse_id: entry.warehouse_id.clone(),
                    movement_type: MovementType::OpeningStock,
                    delta: StockDelta::quantity(entry.quantity),
                    reference: Some(entry.entry_number.clone()),
                    remarks: entry.remarks.clone(),
                    performed_by: performed_by.clone(),
                })
                .await?;
            Vec::new()
        };

        entry.confirm(piece_ids)?;
        entry.touch(performed_by);
        self.ctx.repos.opening_stock.update(&entry).await?;

        info!(
            tenant_id = %tenant_id,
            entry_number = %entry.entry_number,
            item_code = %item.item_code,
            pieces = entry.piece_ids.len(),
            "Opening stock entry confirmed"
        );
        Ok(entry)
    }

    async fn handle_cancel(
        &self,
        tenant_id: &TenantId,
        id: &OpeningStockId,
        performed_by: Option<UserId>,
    ) -> AppResult<OpeningStockEntry> {
        let mut entry = self.load(tenant_id, id).await?;
        entry.cancel()?;
        entry.touch(performed_by);
        self.ctx.repos.opening_stock.update(&entry).await?;

        info!(
            tenant_id = %tenant_id,
            entry_number = %entry.entry_number,
            "Opening stock entry cancelled"
        );
        Ok(entry)
    }

    async fn handle_delete(&self, tenant_id: &TenantId, id: &OpeningStockId) -> AppResult<()> {
        let entry = self.load(tenant_id, id).await?;
        entry.ensure_draft("delete")?;
        self.ctx.repos.opening_stock.delete(id, tenant_id).await?;

        info!(
            tenant_id = %tenant_id,
            entry_number = %entry.entry_number,
            "Opening stock entry deleted"
        );
        Ok(())
    }
}
