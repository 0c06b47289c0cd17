//! 原材料入库拆件（期初与采购收货共用）

use mferp_common::{TenantId, UserId};
use mferp_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use tracing::info;

use super::context::ServiceContext;
use crate::domain::ids::WarehouseId;
use crate::domain::inventory::{MovementType, PostingRequest};
use crate::domain::item::Item;
use crate::domain::material_piece::{
    MaterialPiece, PieceDimensions, PieceSource, PieceSplitter, whole_piece_count,
};

/// 一批原材料入库
pub(crate) struct RawMaterialIntake<'a> {
    pub tenant_id: &'a TenantId,
    pub item: &'a Item,
    pub warehouse_id: &'a WarehouseId,
    /// 由 [`plan_raw_pieces`] 预先拆好
    pub dimensions: Vec<PieceDimensions>,
    pub heat_number: Option<String>,
    pub source: PieceSource,
    pub source_ref: &'a str,
    pub movement_type: MovementType,
    pub performed_by: Option<UserId>,
}

/// 原材料数量必须为整数件，且至少给出总重或单件长度
pub(crate) fn check_raw_quantities(
    quantity: Decimal,
    total_weight_kg: Option<Decimal>,
    length_per_piece_mm: Option<Decimal>,
) -> AppResult<u32> {
    let count = whole_piece_count(quantity).ok_or_else(|| {
        AppError::validation(format!(
            "Raw material quantity must be a whole number of pieces, got {}",
            quantity
        ))
    })?;

    let positive = |v: Option<Decimal>| v.is_some_and(|v| v > Decimal::ZERO);
    if !positive(total_weight_kg) && !positive(length_per_piece_mm) {
        return Err(AppError::validation(
            "Raw material requires total weight or length per piece",
        ));
    }
    Ok(count)
}

/// 校验并拆件，不写入任何数据
pub(crate) fn plan_raw_pieces(
    ctx: &ServiceContext,
    item: &Item,
    quantity: Decimal,
    total_weight_kg: Option<Decimal>,
    length_per_piece_mm: Option<Decimal>,
) -> AppResult<Vec<PieceDimensions>> {
    let count = check_raw_quantities(quantity, total_weight_kg, length_per_piece_mm)?;
    let spec = item.spec()?;
    let dimensions = ctx
        .splitter()
        .split(spec, count, total_weight_kg, length_per_piece_mm)?;
    Ok(dimensions)
}

/// 编号、保存拆好的件，并按合计过账
pub(crate) async fn receive_raw_material(
    ctx: &ServiceContext,
    intake: RawMaterialIntake<'_>,
) -> AppResult<Vec<MaterialPiece>> {
    let totals = PieceSplitter::totals(&intake.dimensions);

    let mut pieces = Vec::with_capacity(intake.dimensions.len());
    for dims in intake.dimensions {
        let piece_number = ctx
            .numbers
            .next_piece_number(intake.tenant_id, &intake.item.item_code)
            .await?;
        pieces.push(MaterialPiece::new(
            intake.tenant_id.clone(),
            piece_number,
            intake.item.id.clone(),
            intake.warehouse_id.clone(),
            intake.source,
            intake.source_ref.to_string(),
            intake.heat_number.clone(),
            dims,
            intake.performed_by.clone(),
        ));
    }

    ctx.repos.pieces.save_all(&pieces).await?;
    ctx.post_stock(PostingRequest {
        tenant_id: intake.tenant_id.clone(),
        item_id: intake.item.id.clone(),
        item_code: intake.item.item_code.clone(),
        warehouse_id: intake.warehouse_id.clone(),
        movement_type: intake.movement_type,
        delta: totals,
        reference: Some(intake.source_ref.to_string()),
        remarks: intake.heat_number.map(|h| format!("Heat {}", h)),
        performed_by: intake.performed_by,
    })
    .await?;

    info!(
        tenant_id = %intake.tenant_id,
        item_code = %intake.item.item_code,
        source_ref = intake.source_ref,
        pieces = pieces.len(),
        total_weight_kg = %totals.weight_kg,
        "Raw material split into pieces"
    );
    Ok(pieces)
}
