//! 采购订单聚合

use chrono::NaiveDate;
use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::geometry::round_half_up;
use crate::domain::ids::{ItemId, PurchaseOrderId, VendorId, WarehouseId};
use crate::error::OpsError;

const AMOUNT_SCALE: u32 = 2;

/// 采购订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseOrderStatus {
    Draft,
    Approved,
    PartiallyReceived,
    Received,
    Cancelled,
    Closed,
}

/// 采购订单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub line_no: u32,
    pub item_id: ItemId,
    pub quantity: Decimal,
    pub received_quantity: Decimal,
    pub unit_price: Decimal,
    /// 税率（百分比）
    pub tax_percent: Decimal,
}

impl PurchaseOrderLine {
    pub fn new(
        line_no: u32,
        item_id: ItemId,
        quantity: Decimal,
        unit_price: Decimal,
        tax_percent: Decimal,
    ) -> Self {
        Self {
            line_no,
            item_id,
            quantity,
            received_quantity: Decimal::ZERO,
            unit_price,
            tax_percent,
        }
    }

    pub fn amount(&self) -> Decimal {
        round_half_up(self.quantity * self.unit_price, AMOUNT_SCALE)
    }

    pub fn tax_amount(&self) -> Decimal {
        round_half_up(self.amount() * self.tax_percent / dec!(100), AMOUNT_SCALE)
    }

    pub fn pending_quantity(&self) -> Decimal {
        self.quantity - self.received_quantity
    }

    pub fn is_complete(&self) -> bool {
        self.received_quantity >= self.quantity
    }
}

/// 采购订单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub tenant_id: TenantId,
    pub po_number: String,
    pub vendor_id: VendorId,
    pub warehouse_id: WarehouseId,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    pub lines: Vec<PurchaseOrderLine>,
    pub notes: Option<String>,
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
    pub audit_info: AuditInfo,
}

impl PurchaseOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        po_number: String,
        vendor_id: VendorId,
        warehouse_id: WarehouseId,
        order_date: NaiveDate,
        expected_date: Option<NaiveDate>,
        lines: Vec<PurchaseOrderLine>,
        notes: Option<String>,
        created_by: Option<UserId>,
    ) -> Self {
        let mut order = Self {
            id: PurchaseOrderId::new(),
            tenant_id,
            po_number,
            vendor_id,
            warehouse_id,
            order_date,
            expected_date,
            status: PurchaseOrderStatus::Draft,
            lines,
            notes,
            subtotal: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            audit_info: AuditInfo::new(created_by),
        };
        order.recalculate_totals();
        order
    }

    fn recalculate_totals(&mut self) {
        self.subtotal = self.lines.iter().map(PurchaseOrderLine::amount).sum();
        self.tax_total = self.lines.iter().map(PurchaseOrderLine::tax_amount).sum();
        self.grand_total = self.subtotal + self.tax_total;
    }

    fn ensure_status(
        &self,
        allowed: &[PurchaseOrderStatus],
        action: &'static str,
    ) -> Result<(), OpsError> {
        if !allowed.contains(&self.status) {
            return Err(OpsError::invalid_transition("purchase order", self.status, action));
        }
        Ok(())
    }

    pub fn has_receipts(&self) -> bool {
        self.lines.iter().any(|l| l.received_quantity > Decimal::ZERO)
    }

    pub fn line(&self, line_no: u32) -> Option<&PurchaseOrderLine> {
        self.lines.iter().find(|l| l.line_no == line_no)
    }

    /// 修改草稿订单
    pub fn revise(
        &mut self,
        expected_date: Option<NaiveDate>,
        lines: Option<Vec<PurchaseOrderLine>>,
        notes: Option<String>,
    ) -> Result<(), OpsError> {
        self.ensure_status(&[PurchaseOrderStatus::Draft], "update")?;
        if expected_date.is_some() {
            self.expected_date = expected_date;
        }
        if let Some(lines) = lines {
            self.lines = lines;
            self.recalculate_totals();
        }
        if notes.is_some() {
            self.notes = notes;
        }
        Ok(())
    }

    pub fn approve(&mut self) -> Result<(), OpsError> {
        self.ensure_status(&[PurchaseOrderStatus::Draft], "approve")?;
        self.status = PurchaseOrderStatus::Approved;
        Ok(())
    }

    pub fn ensure_receivable(&self) -> Result<(), OpsError> {
        self.ensure_status(
            &[
                PurchaseOrderStatus::Approved,
                PurchaseOrderStatus::PartiallyReceived,
            ],
            "receive",
        )
    }

    /// 登记行收货数量
    pub fn receive_line(&mut self, line_no: u32, quantity: Decimal) -> Result<(), OpsError> {
        self.ensure_receivable()?;
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_no == line_no)
            .ok_or_else(|| OpsError::QuantityExceeded {
                requested: quantity,
                pending: Decimal::ZERO,
            })?;

        let pending = line.pending_quantity();
        if quantity > pending {
            return Err(OpsError::QuantityExceeded {
                requested: quantity,
                pending,
            });
        }
        line.received_quantity += quantity;
        Ok(())
    }

    /// 收货后刷新状态
    pub fn refresh_receipt_status(&mut self) {
        if self.lines.iter().all(PurchaseOrderLine::is_complete) {
            self.status = PurchaseOrderStatus::Received;
        } else if self.has_receipts() {
            self.status = PurchaseOrderStatus::PartiallyReceived;
        }
    }

    pub fn cancel(&mut self) -> Result<(), OpsError> {
        self.ensure_status(
            &[PurchaseOrderStatus::Draft, PurchaseOrderStatus::Approved],
            "cancel",
        )?;
        if self.has_receipts() {
            return Err(OpsError::invalid_transition(
                "purchase order",
                self.status,
                "cancel a received",
            ));
        }
        self.status = PurchaseOrderStatus::Cancelled;
        Ok(())
    }

    /// 结案（含短交结案）
    pub fn close(&mut self) -> Result<(), OpsError> {
        self.ensure_status(
            &[
                PurchaseOrderStatus::PartiallyReceived,
                PurchaseOrderStatus::Received,
            ],
            "close",
        )?;
        self.status = PurchaseOrderStatus::Closed;
        Ok(())
    }

    pub fn ensure_deletable(&self) -> Result<(), OpsError> {
        self.ensure_status(&[PurchaseOrderStatus::Draft], "delete")
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for PurchaseOrder {
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

    fn order() -> PurchaseOrder {
        PurchaseOrder::new(
            TenantId::new(),
            "PO-202603-0001".to_string(),
            VendorId::new(),
            WarehouseId::new(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            None,
            vec![
                PurchaseOrderLine::new(1, ItemId::new(), dec!(10), dec!(12.345), dec!(18)),
                PurchaseOrderLine::new(2, ItemId::new(), dec!(3), dec!(100), dec!(5)),
            ],
            None,
            None,
        )
    }

    #[test]
    fn test_totals() {
        let po = order();
        // 123.45 + 300.00
        assert_eq!(po.subtotal, dec!(423.45));
        // 22.22 + 15.00
        assert_eq!(po.tax_total, dec!(37.22));
        assert_eq!(po.grand_total, dec!(460.67));
    }

    #[test]
    fn test_receipt_lifecycle() {
        let mut po = order();
        assert!(po.receive_line(1, dec!(1)).is_err());

        po.approve().unwrap();
        po.receive_line(1, dec!(10)).unwrap();
        po.refresh_receipt_status();
        assert_eq!(po.status, PurchaseOrderStatus::PartiallyReceived);
        assert!(po.cancel().is_err());

        assert!(matches!(
            po.receive_line(2, dec!(4)),
            Err(OpsError::QuantityExceeded { .. })
        ));
        po.receive_line(2, dec!(3)).unwrap();
        po.refresh_receipt_status();
        assert_eq!(po.status, PurchaseOrderStatus::Received);

        po.close().unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::Closed);
    }

    #[test]
    fn test_revise_only_in_draft() {
        let mut po = order();
        let line = PurchaseOrderLine::new(1, ItemId::new(), dec!(2), dec!(50), dec!(0));
        po.revise(None, Some(vec![line]), None).unwrap();
        assert_eq!(po.grand_total, dec!(100));

        po.approve().unwrap();
        assert!(po.revise(None, None, Some("late".to_string())).is_err());
        assert!(po.ensure_deletable().is_err());
    }
}
