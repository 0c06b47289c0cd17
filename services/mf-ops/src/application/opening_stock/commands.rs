//! 期初库存命令定义

use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;

use crate::domain::ids::{ItemId, OpeningStockId, WarehouseId};

#[derive(Debug, Clone)]
pub struct CreateOpeningStockCommand {
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    /// 原材料为件数
    pub quantity: Decimal,
    pub total_weight_kg: Option<Decimal>,
    pub length_per_piece_mm: Option<Decimal>,
    pub heat_number: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl CreateOpeningStockCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity <= Decimal::ZERO {
            return Err("Quantity must be greater than zero".to_string());
        }
        validate_measures(self.total_weight_kg, self.length_per_piece_mm, self.unit_cost)
    }
}

/// 修改草稿期初单（None 表示不修改）
#[derive(Debug, Clone)]
pub struct UpdateOpeningStockCommand {
    pub tenant_id: TenantId,
    pub entry_id: OpeningStockId,
    pub warehouse_id: Option<WarehouseId>,
    pub quantity: Option<Decimal>,
    pub total_weight_kg: Option<Decimal>,
    pub length_per_piece_mm: Option<Decimal>,
    pub heat_number: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl UpdateOpeningStockCommand {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(q) = self.quantity
            && q <= Decimal::ZERO
        {
            return Err("Quantity must be greater than zero".to_string());
        }
        validate_measures(self.total_weight_kg, self.length_per_piece_mm, self.unit_cost)
    }
}

fn validate_measures(
    total_weight_kg: Option<Decimal>,
    length_per_piece_mm: Option<Decimal>,
    unit_cost: Option<Decimal>,
) -> Result<(), String> {
    if total_weight_kg.is_some_and(|w| w <= Decimal::ZERO) {
        return Err("Total weight must be greater than zero".to_string());
    }
    if length_per_piece_mm.is_some_and(|l| l <= Decimal::ZERO) {
        return Err("Length per piece must be greater than zero".to_string());
    }
    if unit_cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err("Unit cost cannot be negative".to_string());
    }
    Ok(())
}
