//! 库存命令定义

use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;

use crate::domain::ids::{ItemId, WarehouseId};

/// 手工库存调整（仅非原材料）
#[derive(Debug, Clone)]
pub struct AdjustStockCommand {
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    /// 正数盘盈，负数盘亏
    pub quantity_delta: Decimal,
    pub reason: String,
    pub performed_by: Option<UserId>,
}

impl AdjustStockCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity_delta.is_zero() {
            return Err("Adjustment quantity cannot be zero".to_string());
        }
        if self.reason.trim().is_empty() {
            return Err("Adjustment reason is required".to_string());
        }
        Ok(())
    }
}
