//! 期初库存单

use chrono::{DateTime, Utc};
use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ItemId, MaterialPieceId, OpeningStockId, WarehouseId};
use crate::error::OpsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpeningStockStatus {
    Draft,
    Confirmed,
    Cancelled,
}

/// 期初库存单
///
/// 原材料的 quantity 为件数；确认时按总重 / 单件长度拆成单件。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningStockEntry {
    pub id: OpeningStockId,
    pub tenant_id: TenantId,
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
    pub audit_info: AuditInfo,
}

impl OpeningStockEntry {
    pub fn new(
        tenant_id: TenantId,
        entry_number: String,
        item_id: ItemId,
        warehouse_id: WarehouseId,
        quantity: Decimal,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: OpeningStockId::new(),
            tenant_id,
            entry_number,
            item_id,
            warehouse_id,
            quantity,
            total_weight_kg: None,
            length_per_piece_mm: None,
            heat_number: None,
            unit_cost: None,
            remarks: None,
            status: OpeningStockStatus::Draft,
            confirmed_at: None,
            piece_ids: Vec::new(),
            audit_info: AuditInfo::new(created_by),
        }
    }

    /// 草稿才允许修改、取消、删除、确认
    pub fn ensure_draft(&self, action: &'static str) -> Result<(), OpsError> {
        if self.status != OpeningStockStatus::Draft {
            return Err(OpsError::invalid_transition("opening stock entry", self.status, action));
        }
        Ok(())
    }

    pub fn confirm(&mut self, piece_ids: Vec<MaterialPieceId>) -> Result<(), OpsError> {
        self.ensure_draft("confirm")?;
        self.status = OpeningStockStatus::Confirmed;
        self.confirmed_at = Some(Utc::now());
        self.piece_ids = piece_ids;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), OpsError> {
        self.ensure_draft("cancel")?;
        self.status = OpeningStockStatus::Cancelled;
        Ok(())
    }
}

impl Entity for OpeningStockEntry {
    type Id = OpeningStockId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for OpeningStockEntry {
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

    fn entry(quantity: Decimal) -> OpeningStockEntry {
        OpeningStockEntry::new(
            TenantId::new(),
            "OS-202603-0001".to_string(),
            ItemId::new(),
            WarehouseId::new(),
            quantity,
            None,
        )
    }

    #[test]
    fn test_confirm_locks_entry() {
        let mut e = entry(dec!(2));
        e.confirm(vec![MaterialPieceId::new(), MaterialPieceId::new()])
            .unwrap();

        assert_eq!(e.status, OpeningStockStatus::Confirmed);
        assert!(e.confirmed_at.is_some());
        assert!(e.confirm(Vec::new()).is_err());
        assert!(e.cancel().is_err());
    }
}
