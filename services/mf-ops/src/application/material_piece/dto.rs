//! 原材料件响应

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ids::{ItemId, MaterialPieceId, MaterialUsageId, WarehouseId};
use crate::domain::material_piece::{MaterialPiece, MaterialUsage, PieceSource, PieceStatus};

#[derive(Debug, Clone, Serialize)]
pub struct MaterialPieceResponse {
    pub id: MaterialPieceId,
    pub piece_number: String,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub source: PieceSource,
    pub source_ref: String,
    pub heat_number: Option<String>,
    pub original_length_mm: Decimal,
    pub original_weight_kg: Decimal,
    pub remaining_length_mm: Decimal,
    pub remaining_weight_kg: Decimal,
    pub status: PieceStatus,
    pub created_at: DateTime<Utc>,
}

impl From<MaterialPiece> for MaterialPieceResponse {
    fn from(piece: MaterialPiece) -> Self {
        Self {
            id: piece.id,
            piece_number: piece.piece_number,
            item_id: piece.item_id,
            warehouse_id: piece.warehouse_id,
            source: piece.source,
            source_ref: piece.source_ref,
            heat_number: piece.heat_number,
            original_length_mm: piece.original_length_mm,
            original_weight_kg: piece.original_weight_kg,
            remaining_length_mm: piece.remaining_length_mm,
            remaining_weight_kg: piece.remaining_weight_kg,
            status: piece.status,
            created_at: piece.audit_info.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialUsageResponse {
    pub id: MaterialUsageId,
    pub piece_id: MaterialPieceId,
    pub used_length_mm: Decimal,
    pub used_weight_kg: Decimal,
    pub reference: String,
    pub used_on: NaiveDate,
    pub remarks: Option<String>,
    pub reversed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MaterialUsage> for MaterialUsageResponse {
    fn from(usage: MaterialUsage) -> Self {
        Self {
            id: usage.id,
            piece_id: usage.piece_id,
            used_length_mm: usage.used_length_mm,
            used_weight_kg: usage.used_weight_kg,
            reference: usage.reference,
            used_on: usage.used_on,
            remarks: usage.remarks,
            reversed: usage.reversed,
            created_at: usage.audit_info.created_at,
        }
    }
}

/// 下料 / 冲销结果：使用记录与件的最新状态
#[derive(Debug, Clone, Serialize)]
pub struct PieceUsageResponse {
    pub usage: MaterialUsageResponse,
    pub piece: MaterialPieceResponse,
}

impl From<(MaterialUsage, MaterialPiece)> for PieceUsageResponse {
    fn from((usage, piece): (MaterialUsage, MaterialPiece)) -> Self {
        Self {
            usage: usage.into(),
            piece: piece.into(),
        }
    }
}
