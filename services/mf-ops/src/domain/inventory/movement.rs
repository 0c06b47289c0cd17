//! 库存流水

use chrono::{DateTime, Utc};
use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::StockLevel;
use crate::domain::ids::{ItemId, StockMovementId, WarehouseId};

/// 库存变动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    OpeningStock,
    PurchaseReceipt,
    ComponentIssue,
    ComponentReturn,
    MaterialUsage,
    UsageReversal,
    Scrap,
    OspDispatch,
    OspReceipt,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpeningStock => "opening_stock",
            Self::PurchaseReceipt => "purchase_receipt",
            Self::ComponentIssue => "component_issue",
            Self::ComponentReturn => "component_return",
            Self::MaterialUsage => "material_usage",
            Self::UsageReversal => "usage_reversal",
            Self::Scrap => "scrap",
            Self::OspDispatch => "osp_dispatch",
            Self::OspReceipt => "osp_receipt",
            Self::Adjustment => "adjustment",
        }
    }
}

/// 三维库存变动量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockDelta {
    pub quantity: Decimal,
    pub weight_kg: Decimal,
    pub length_mm: Decimal,
}

impl StockDelta {
    pub fn new(quantity: Decimal, weight_kg: Decimal, length_mm: Decimal) -> Self {
        Self {
            quantity,
            weight_kg,
            length_mm,
        }
    }

    /// 仅数量变动（非原材料）
    pub fn quantity(quantity: Decimal) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    pub fn negate(self) -> Self {
        Self {
            quantity: -self.quantity,
            weight_kg: -self.weight_kg,
            length_mm: -self.length_mm,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero() && self.weight_kg.is_zero() && self.length_mm.is_zero()
    }
}

/// 库存流水记录（只追加）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: StockMovementId,
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub movement_type: MovementType,
    pub quantity_delta: Decimal,
    pub weight_delta: Decimal,
    pub length_delta: Decimal,
    pub balance_after: StockLevel,
    /// 来源单据号
    pub reference: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
}
