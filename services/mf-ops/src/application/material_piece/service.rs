//! 原材料件服务：下料、冲销、报废与查询

use std::sync::Arc;

use mferp_common::{PagedResult, Pagination, TenantId, UserId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::commands::*;
use super::dto::{MaterialPieceResponse, MaterialUsageResponse, PieceUsageResponse};
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::application::non_empty;
use crate::domain::ids::{MaterialPieceId, MaterialUsageId};
use crate::domain::inventory::{MovementType, PostingRequest, StockDelta};
use crate::domain::material_piece::{
    MaterialPiece, MaterialUsage, PieceFilter, PieceStatus, UsageFilter,
};
use crate::error::OpsError;
use crate::infrastructure::observability;

pub struct MaterialPieceService {
    ctx: Arc<ServiceContext>,
}

impl MaterialPieceService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 登记下料，按长度比例扣减重量
    pub async fn record_usage(&self, cmd: RecordUsageCommand) -> ApiResponse<PieceUsageResponse> {
        self.handle_record(cmd)
            .await
            .map(PieceUsageResponse::from)
            .into_envelope("Material usage recorded successfully")
    }

    /// 冲销件上最近一次未冲销的下料
    pub async fn reverse_usage(&self, cmd: ReverseUsageCommand) -> ApiResponse<PieceUsageResponse> {
        self.handle_reverse(cmd)
            .await
            .map(PieceUsageResponse::from)
            .into_envelope("Material usage reversed successfully")
    }

    pub async fn scrap_piece(&self, cmd: ScrapPieceCommand) -> ApiResponse<MaterialPieceResponse> {
        self.handle_scrap(cmd)
            .await
            .map(MaterialPieceResponse::from)
            .into_envelope("Material piece scrapped successfully")
    }

    pub async fn get_piece(
        &self,
        tenant_id: &TenantId,
        id: &MaterialPieceId,
    ) -> ApiResponse<MaterialPieceResponse> {
        self.load_piece(tenant_id, id)
            .await
            .map(MaterialPieceResponse::from)
            .into_envelope("Material piece retrieved successfully")
    }

    pub async fn get_piece_by_number(
        &self,
        tenant_id: &TenantId,
        piece_number: &str,
    ) -> ApiResponse<MaterialPieceResponse> {
        self.handle_get_by_number(tenant_id, piece_number)
            .await
            .map(MaterialPieceResponse::from)
            .into_envelope("Material piece retrieved successfully")
    }

    pub async fn list_pieces(
        &self,
        tenant_id: &TenantId,
        filter: PieceFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<MaterialPieceResponse>> {
        self.ctx
            .repos
            .pieces
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(MaterialPieceResponse::from))
            .into_envelope("Material pieces retrieved successfully")
    }

    pub async fn list_usages(
        &self,
        tenant_id: &TenantId,
        filter: UsageFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<MaterialUsageResponse>> {
        self.ctx
            .repos
            .usages
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(MaterialUsageResponse::from))
            .into_envelope("Material usages retrieved successfully")
    }

    async fn load_piece(
        &self,
        tenant_id: &TenantId,
        id: &MaterialPieceId,
    ) -> AppResult<MaterialPiece> {
        self.ctx
            .repos
            .pieces
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Material piece {} not found", id)))
    }

    async fn handle_get_by_number(
        &self,
        tenant_id: &TenantId,
        piece_number: &str,
    ) -> AppResult<MaterialPiece> {
        self.ctx
            .repos
            .pieces
            .find_by_number(piece_number.trim(), tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Material piece {} not found", piece_number))
            })
    }

    async fn post_piece_movement(
        &self,
        piece: &MaterialPiece,
        movement_type: MovementType,
        delta: StockDelta,
        reference: String,
        remarks: Option<String>,
        performed_by: Option<UserId>,
    ) -> AppResult<()> {
        let item = self.ctx.load_item(&piece.tenant_id, &piece.item_id).await?;
        self.ctx
            .post_stock(PostingRequest {
                tenant_id: piece.tenant_id.clone(),
                item_id: piece.item_id.clone(),
                item_code: item.item_code,
                warehouse_id: piece.warehouse_id.clone(),
                movement_type,
                delta,
                reference: Some(reference),
                remarks,
                performed_by,
            })
            .await?;
        Ok(())
    }

    async fn handle_record(
        &self,
        cmd: RecordUsageCommand,
    ) -> AppResult<(MaterialUsage, MaterialPiece)> {
        cmd.validate().map_err(AppError::validation)?;
        let mut piece = self.load_piece(&cmd.tenant_id, &cmd.piece_id).await?;
        self.ctx.active_warehouse(&cmd.tenant_id, &piece.warehouse_id).await?;

        let used_weight =
            piece.consume(cmd.used_length_mm, self.ctx.config.inventory.weight_scale)?;
        let consumed = piece.status == PieceStatus::Consumed;
        let quantity = if consumed { Decimal::ONE } else { Decimal::ZERO };

        let usage = MaterialUsage::new(
            cmd.tenant_id.clone(),
            piece.id.clone(),
            cmd.used_length_mm,
            used_weight,
            cmd.reference.trim().to_string(),
            cmd.used_on,
            non_empty(cmd.remarks),
            cmd.performed_by.clone(),
        );

        self.post_piece_movement(
            &piece,
            MovementType::MaterialUsage,
            StockDelta::new(quantity, used_weight, cmd.used_length_mm).negate(),
            usage.reference.clone(),
            Some(format!("Piece {}", piece.piece_number)),
            cmd.performed_by.clone(),
        )
        .await?;

        piece.touch(cmd.performed_by);
        self.ctx.repos.pieces.update(&piece).await?;
        self.ctx.repos.usages.save(&usage).await?;
        observability::record_material_usage("recorded");

        info!(
            tenant_id = %piece.tenant_id,
            piece_number = %piece.piece_number,
            used_length_mm = %usage.used_length_mm,
            used_weight_kg = %usage.used_weight_kg,
            remaining_length_mm = %piece.remaining_length_mm,
            consumed,
            "Material usage recorded"
        );
        Ok((usage, piece))
    }

    async fn handle_reverse(
        &self,
        cmd: ReverseUsageCommand,
    ) -> AppResult<(MaterialUsage, MaterialPiece)> {
        let mut usage = self
            .ctx
            .repos
            .usages
            .find_by_id(&cmd.usage_id, &cmd.tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Material usage {} not found", cmd.usage_id))
            })?;
        if usage.reversed {
            return Err(AppError::conflict(format!(
                "Material usage {} is already reversed",
                usage.id
            )));
        }

        let latest = self
            .ctx
            .repos
            .usages
            .find_latest_active(&usage.piece_id, &cmd.tenant_id)
            .await?;
        if latest.as_ref().map(|u| &u.id) != Some(&usage.id) {
            warn!(
                tenant_id = %cmd.tenant_id,
                usage_id = %usage.id,
                "Reversal rejected: not the latest usage of the piece"
            );
            return Err(OpsError::invalid_transition(
                "material usage",
                "superseded",
                "reverse",
            )
            .into());
        }

        let mut piece = self.load_piece(&cmd.tenant_id, &usage.piece_id).await?;
        self.ctx.active_warehouse(&cmd.tenant_id, &piece.warehouse_id).await?;
        let was_consumed = piece.restore(usage.used_length_mm, usage.used_weight_kg)?;
        let quantity = if was_consumed { Decimal::ONE } else { Decimal::ZERO };

        self.post_piece_movement(
            &piece,
            MovementType::UsageReversal,
            StockDelta::new(quantity, usage.used_weight_kg, usage.used_length_mm),
            usage.reference.clone(),
            Some(format!("Reversal of usage on piece {}", piece.piece_number)),
            cmd.performed_by.clone(),
        )
        .await?;

        piece.touch(cmd.performed_by.clone());
        usage.mark_reversed(cmd.performed_by);
        self.ctx.repos.pieces.update(&piece).await?;
        self.ctx.repos.usages.update(&usage).await?;
        observability::record_material_usage("reversed");

        info!(
            tenant_id = %piece.tenant_id,
            piece_number = %piece.piece_number,
            restored_length_mm = %usage.used_length_mm,
            status = ?piece.status,
            "Material usage reversed"
        );
        Ok((usage, piece))
    }

    async fn handle_scrap(&self, cmd: ScrapPieceCommand) -> AppResult<MaterialPiece> {
        cmd.validate().map_err(AppError::validation)?;
        let mut piece = self.load_piece(&cmd.tenant_id, &cmd.piece_id).await?;
        self.ctx.active_warehouse(&cmd.tenant_id, &piece.warehouse_id).await?;
        let delta = piece.scrap()?;

        self.post_piece_movement(
            &piece,
            MovementType::Scrap,
            delta,
            piece.piece_number.clone(),
            Some(cmd.reason.trim().to_string()),
            cmd.performed_by.clone(),
        )
        .await?;

        piece.touch(cmd.performed_by);
        self.ctx.repos.pieces.update(&piece).await?;
        observability::record_material_usage("scrapped");

        info!(
            tenant_id = %piece.tenant_id,
            piece_number = %piece.piece_number,
            reason = %cmd.reason.trim(),
            "Material piece scrapped"
        );
        Ok(piece)
    }
}
