//! 期初库存响应

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ids::{ItemId, MaterialPieceId, OpeningStockId, WarehouseId};
use crate::domain::opening_stock::{OpeningStockEntry, OpeningStockStatus};

#[derive(Debug, Clone, Serialize)]
pub struct OpeningStockResponse {
    pub id: OpeningStockId,
    pub entry_number: String,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub total_weight_kg: Option<Decimal>,
    pub length_per_piece_mm: Option<Decimal>,
    pub heat_number: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub remarks: Option<String>,
    pub status: OpeningStockStatus,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub piece_ids: Vec<MaterialPieceId>,
    pub created_at: DateTime<Utc>,
}

impl From<OpeningStockEntry> for OpeningStockResponse {
    fn from(entry: OpeningStockEntry) -> Self {
        Self {
            id: entry.id,
            entry_number: entry.entry_number,
            item_id: entry.item_id,
            warehouse_id: entry.warehouse_id,
            quantity: entry.quantity,
            total_weight_kg: entry.total_weight_kg,
            length_per_piece_mm: entry.length_per_piece_mm,
            heat_number: entry.heat_number,
            unit_cost: entry.unit_cost,
            remarks: entry.remarks,
            status: entry.status,
            confirmed_at: entry.confirmed_at,
            piece_ids: entry.piece_ids,
            created_at: entry.audit_info.created_at,
        }
    }
}
