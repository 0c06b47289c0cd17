//! 原材料件

use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::splitter::PieceDimensions;
use crate::domain::geometry::round_half_up;
use crate::domain::ids::{ItemId, MaterialPieceId, WarehouseId};
use crate::domain::inventory::StockDelta;
use crate::error::OpsError;

/// 件来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceSource {
    OpeningStock,
    PurchaseReceipt,
}

/// 件状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceStatus {
    Available,
    PartiallyUsed,
    Consumed,
    Scrapped,
}

/// 原材料件（单根棒料 / 单张板料）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialPiece {
    pub id: MaterialPieceId,
    pub tenant_id: TenantId,
    pub piece_number: String,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub source: PieceSource,
    /// 来源单据号（期初单号 / 采购单号）
    pub source_ref: String,
    /// 炉号
    pub heat_number: Option<String>,
    pub original_length_mm: Decimal,
    pub original_weight_kg: Decimal,
    pub remaining_length_mm: Decimal,
    pub remaining_weight_kg: Decimal,
    pub status: PieceStatus,
    pub audit_info: AuditInfo,
}

impl MaterialPiece {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        piece_number: String,
        item_id: ItemId,
        warehouse_id: WarehouseId,
        source: PieceSource,
        source_ref: String,
        heat_number: Option<String>,
        dimensions: PieceDimensions,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: MaterialPieceId::new(),
            tenant_id,
            piece_number,
            item_id,
            warehouse_id,
            source,
            source_ref,
            heat_number,
            original_length_mm: dimensions.length_mm,
            original_weight_kg: dimensions.weight_kg,
            remaining_length_mm: dimensions.length_mm,
            remaining_weight_kg: dimensions.weight_kg,
            status: PieceStatus::Available,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self.status, PieceStatus::Available | PieceStatus::PartiallyUsed)
    }

    fn ensure_usable(&self, action: &'static str) -> Result<(), OpsError> {
        if !self.is_usable() {
            return Err(OpsError::invalid_transition("material piece", self.status, action));
        }
        Ok(())
    }

    /// 剩余量对应的库存变动（出库为负）
    pub fn remaining_delta(&self) -> StockDelta {
        StockDelta::new(Decimal::ONE, self.remaining_weight_kg, self.remaining_length_mm).negate()
    }

    /// 切割使用，返回本次使用的重量
    ///
    /// 重量按剩余长度比例折算，用完时取全部剩余重量，避免舍入残留。
    pub fn consume(
        &mut self,
        used_length_mm: Decimal,
        weight_scale: u32,
    ) -> Result<Decimal, OpsError> {
        self.ensure_usable("record usage on")?;
        if used_length_mm > self.remaining_length_mm {
            return Err(OpsError::QuantityExceeded {
                requested: used_length_mm,
                pending: self.remaining_length_mm,
            });
        }

        let used_weight = if used_length_mm == self.remaining_length_mm {
            self.remaining_weight_kg
        } else {
            round_half_up(
                self.remaining_weight_kg * used_length_mm / self.remaining_length_mm,
                weight_scale,
            )
        };

        self.remaining_length_mm -= used_length_mm;
        self.remaining_weight_kg -= used_weight;
        self.status = if self.remaining_length_mm.is_zero() {
            PieceStatus::Consumed
        } else {
            PieceStatus::PartiallyUsed
        };

        Ok(used_weight)
    }

    /// 冲销使用记录，返回冲销前是否已用完
    pub fn restore(&mut self, length_mm: Decimal, weight_kg: Decimal) -> Result<bool, OpsError> {
        if self.status == PieceStatus::Scrapped {
            return Err(OpsError::invalid_transition(
                "material piece",
                self.status,
                "reverse usage on",
            ));
        }

        let was_consumed = self.status == PieceStatus::Consumed;
        self.remaining_length_mm += length_mm;
        self.remaining_weight_kg += weight_kg;
        self.status = if self.remaining_length_mm >= self.original_length_mm {
            PieceStatus::Available
        } else {
            PieceStatus::PartiallyUsed
        };

        Ok(was_consumed)
    }

    /// 报废，返回报废时的库存变动
    pub fn scrap(&mut self) -> Result<StockDelta, OpsError> {
        self.ensure_usable("scrap")?;
        let delta = self.remaining_delta();
        self.status = PieceStatus::Scrapped;
        Ok(delta)
    }
}

impl Entity for MaterialPiece {
    type Id = MaterialPieceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for MaterialPiece {
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

    fn piece() -> MaterialPiece {
        MaterialPiece::new(
            TenantId::new(),
            "RM-SQ50-00001".to_string(),
            ItemId::new(),
            WarehouseId::new(),
            PieceSource::OpeningStock,
            "OS-202603-0001".to_string(),
            Some("H-4471".to_string()),
            PieceDimensions {
                length_mm: dec!(1000),
                weight_kg: dec!(19.625),
            },
            None,
        )
    }

    #[test]
    fn test_partial_usage_is_proportional() {
        let mut p = piece();
        let used = p.consume(dec!(300), 3).unwrap();

        assert_eq!(used, dec!(5.888));
        assert_eq!(p.remaining_length_mm, dec!(700));
        assert_eq!(p.remaining_weight_kg, dec!(13.737));
        assert_eq!(p.status, PieceStatus::PartiallyUsed);
    }

    #[test]
    fn test_full_usage_takes_all_remaining_weight() {
        let mut p = piece();
        p.consume(dec!(300), 3).unwrap();
        let used = p.consume(dec!(700), 3).unwrap();

        assert_eq!(used, dec!(13.737));
        assert!(p.remaining_weight_kg.is_zero());
        assert_eq!(p.status, PieceStatus::Consumed);
        assert!(p.consume(dec!(1), 3).is_err());
    }

    #[test]
    fn test_usage_beyond_remaining_rejected() {
        let mut p = piece();
        let err = p.consume(dec!(1200), 3).unwrap_err();
        assert!(matches!(err, OpsError::QuantityExceeded { .. }));
        assert_eq!(p.remaining_length_mm, dec!(1000));
    }

    #[test]
    fn test_restore_returns_to_available() {
        let mut p = piece();
        let used = p.consume(dec!(1000), 3).unwrap();
        let was_consumed = p.restore(dec!(1000), used).unwrap();

        assert!(was_consumed);
        assert_eq!(p.status, PieceStatus::Available);
        assert_eq!(p.remaining_weight_kg, dec!(19.625));
    }

    #[test]
    fn test_scrap() {
        let mut p = piece();
        p.consume(dec!(400), 3).unwrap();
        let delta = p.scrap().unwrap();

        assert_eq!(delta.quantity, dec!(-1));
        assert_eq!(delta.length_mm, dec!(-600));
        assert_eq!(p.status, PieceStatus::Scrapped);
        assert!(p.scrap().is_err());
        assert!(p.restore(dec!(400), dec!(7.85)).is_err());
    }
}
