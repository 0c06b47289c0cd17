//! 库存响应

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ids::{ItemId, StockMovementId, WarehouseId};
use crate::domain::inventory::{InventoryBalance, MovementType, StockLevel, StockMovement};

#[derive(Debug, Clone, Serialize)]
pub struct StockResponse {
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub weight_kg: Decimal,
    pub length_mm: Decimal,
    pub last_movement_at: Option<DateTime<Utc>>,
}

impl From<InventoryBalance> for StockResponse {
    fn from(balance: InventoryBalance) -> Self {
        Self {
            item_id: balance.item_id,
            warehouse_id: balance.warehouse_id,
            quantity: balance.quantity,
            weight_kg: balance.weight_kg,
            length_mm: balance.length_mm,
            last_movement_at: balance.last_movement_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LowStockResponse {
    pub item_id: ItemId,
    pub item_code: String,
    pub name: String,
    pub reorder_level: Decimal,
    /// 所有仓库合计
    pub total_quantity: Decimal,
    pub shortfall: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockMovementResponse {
    pub id: StockMovementId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub movement_type: MovementType,
    pub quantity_delta: Decimal,
    pub weight_delta: Decimal,
    pub length_delta: Decimal,
    pub balance_after: StockLevel,
    pub reference: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StockMovement> for StockMovementResponse {
    fn from(movement: StockMovement) -> Self {
        Self {
            id: movement.id,
            item_id: movement.item_id,
            warehouse_id: movement.warehouse_id,
            movement_type: movement.movement_type,
            quantity_delta: movement.quantity_delta,
            weight_delta: movement.weight_delta,
            length_delta: movement.length_delta,
            balance_after: movement.balance_after,
            reference: movement.reference,
            remarks: movement.remarks,
            created_at: movement.created_at,
        }
    }
}
