//! 库存余额

use chrono::{DateTime, Utc};
use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::movement::StockDelta;
use crate::domain::ids::{InventoryBalanceId, ItemId, WarehouseId};
use crate::error::OpsError;

/// 库存水平快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevel {
    pub quantity: Decimal,
    pub weight_kg: Decimal,
    pub length_mm: Decimal,
}

impl StockLevel {
    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero() && self.weight_kg.is_zero() && self.length_mm.is_zero()
    }
}

/// 物料在某仓库的库存余额
///
/// 原材料的 quantity 为件数，weight_kg / length_mm 为所有在库件剩余量之和。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryBalance {
    pub id: InventoryBalanceId,
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub weight_kg: Decimal,
    pub length_mm: Decimal,
    pub last_movement_at: Option<DateTime<Utc>>,
    pub audit_info: AuditInfo,
}

impl InventoryBalance {
    pub fn new(tenant_id: TenantId, item_id: ItemId, warehouse_id: WarehouseId) -> Self {
        Self {
            id: InventoryBalanceId::new(),
            tenant_id,
            item_id,
            warehouse_id,
            quantity: Decimal::ZERO,
            weight_kg: Decimal::ZERO,
            length_mm: Decimal::ZERO,
            last_movement_at: None,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn level(&self) -> StockLevel {
        StockLevel {
            quantity: self.quantity,
            weight_kg: self.weight_kg,
            length_mm: self.length_mm,
        }
    }

    /// 应用库存变动，任一维度变为负数时拒绝且不修改余额
    pub fn apply(
        &mut self,
        item_code: &str,
        delta: &StockDelta,
        performed_by: Option<UserId>,
    ) -> Result<StockLevel, OpsError> {
        let quantity = self.quantity + delta.quantity;
        let weight_kg = self.weight_kg + delta.weight_kg;
        let length_mm = self.length_mm + delta.length_mm;

        let shortage = [
            (quantity, self.quantity, delta.quantity),
            (weight_kg, self.weight_kg, delta.weight_kg),
            (length_mm, self.length_mm, delta.length_mm),
        ]
        .into_iter()
        .find(|(after, _, _)| *after < Decimal::ZERO);

        if let Some((_, available, change)) = shortage {
            return Err(OpsError::InsufficientStock {
                item_code: item_code.to_string(),
                available,
                requested: -change,
            });
        }

        self.quantity = quantity;
        self.weight_kg = weight_kg;
        self.length_mm = length_mm;
        self.last_movement_at = Some(Utc::now());
        self.audit_info.update(performed_by);

        Ok(self.level())
    }
}

impl Entity for InventoryBalance {
    type Id = InventoryBalanceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for InventoryBalance {
    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn balance() -> InventoryBalance {
        InventoryBalance::new(TenantId::new(), ItemId::new(), WarehouseId::new())
    }

    #[test]
    fn test_apply_all_dimensions() {
        let mut b = balance();
        let level = b
            .apply(
                "RM-EN8-32",
                &StockDelta::new(dec!(4), dec!(25.252), dec!(4000)),
                None,
            )
            .unwrap();

        assert_eq!(level.quantity, dec!(4));
        assert_eq!(level.weight_kg, dec!(25.252));
        assert!(b.last_movement_at.is_some());
    }

    #[test]
    fn test_negative_result_rejected_without_change() {
        let mut b = balance();
        b.apply("BRG-6204", &StockDelta::quantity(dec!(3)), None).unwrap();

        let err = b
            .apply("BRG-6204", &StockDelta::quantity(dec!(-5)), None)
            .unwrap_err();

        match err {
            OpsError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, dec!(3));
                assert_eq!(requested, dec!(5));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(b.quantity, dec!(3));
    }

    #[test]
    fn test_drain_to_exact_zero() {
        let mut b = balance();
        b.apply("BRG-6204", &StockDelta::quantity(dec!(2)), None).unwrap();
        let level = b
            .apply("BRG-6204", &StockDelta::quantity(dec!(-2)), None)
            .unwrap();
        assert!(level.is_zero());
    }
}
