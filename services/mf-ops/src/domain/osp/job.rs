//! 外协加工单

use chrono::NaiveDate;
use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ItemId, OspJobId, VendorId, WarehouseId};
use crate::error::OpsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OspJobStatus {
    Sent,
    PartiallyReceived,
    Completed,
    /// 短收结案，未回数量核销
    ShortClosed,
    Cancelled,
}

impl OspJobStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Sent | Self::PartiallyReceived)
    }
}

/// 外协回收记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OspReceipt {
    pub received_on: NaiveDate,
    pub quantity_received: Decimal,
    pub quantity_rejected: Decimal,
    pub remarks: Option<String>,
}

/// 外协加工单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OspJob {
    pub id: OspJobId,
    pub tenant_id: TenantId,
    pub job_number: String,
    pub vendor_id: VendorId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    /// 工序（热处理、电镀等）
    pub process: String,
    pub quantity_sent: Decimal,
    pub quantity_received: Decimal,
    pub quantity_rejected: Decimal,
    pub rate_per_unit: Decimal,
    pub sent_on: NaiveDate,
    pub expected_return_on: Option<NaiveDate>,
    pub status: OspJobStatus,
    pub receipts: Vec<OspReceipt>,
    pub remarks: Option<String>,
    pub audit_info: AuditInfo,
}

impl OspJob {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        job_number: String,
        vendor_id: VendorId,
        item_id: ItemId,
        warehouse_id: WarehouseId,
        process: String,
        quantity_sent: Decimal,
        rate_per_unit: Decimal,
        sent_on: NaiveDate,
        expected_return_on: Option<NaiveDate>,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: OspJobId::new(),
            tenant_id,
            job_number,
            vendor_id,
            item_id,
            warehouse_id,
            process,
            quantity_sent,
            quantity_received: Decimal::ZERO,
            quantity_rejected: Decimal::ZERO,
            rate_per_unit,
            sent_on,
            expected_return_on,
            status: OspJobStatus::Sent,
            receipts: Vec::new(),
            remarks: None,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn pending_quantity(&self) -> Decimal {
        self.quantity_sent - self.quantity_received - self.quantity_rejected
    }

    /// 已发生加工费（按合格回收数量计）
    pub fn accrued_cost(&self) -> Decimal {
        self.rate_per_unit * self.quantity_received
    }

    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.status.is_open() && self.expected_return_on.is_some_and(|d| d < as_of)
    }

    pub fn receive(&mut self, receipt: OspReceipt) -> Result<(), OpsError> {
        if !self.status.is_open() {
            return Err(OpsError::invalid_transition("OSP job", self.status, "receive"));
        }

        let requested = receipt.quantity_received + receipt.quantity_rejected;
        let pending = self.pending_quantity();
        if requested > pending {
            return Err(OpsError::QuantityExceeded { requested, pending });
        }

        self.quantity_received += receipt.quantity_received;
        self.quantity_rejected += receipt.quantity_rejected;
        self.receipts.push(receipt);
        self.status = if self.pending_quantity().is_zero() {
            OspJobStatus::Completed
        } else {
            OspJobStatus::PartiallyReceived
        };
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), OpsError> {
        if self.status != OspJobStatus::Sent || !self.receipts.is_empty() {
            return Err(OpsError::invalid_transition("OSP job", self.status, "cancel"));
        }
        self.status = OspJobStatus::Cancelled;
        Ok(())
    }

    pub fn short_close(&mut self) -> Result<(), OpsError> {
        if self.status != OspJobStatus::PartiallyReceived {
            return Err(OpsError::invalid_transition("OSP job", self.status, "short close"));
        }
        self.status = OspJobStatus::ShortClosed;
        Ok(())
    }
}

impl Entity for OspJob {
    type Id = OspJobId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for OspJob {
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

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn job() -> OspJob {
        OspJob::new(
            TenantId::new(),
            "OSP-202603-0001".to_string(),
            VendorId::new(),
            ItemId::new(),
            WarehouseId::new(),
            "Zinc plating".to_string(),
            dec!(100),
            dec!(2.5),
            date(1),
            Some(date(10)),
            None,
        )
    }

    fn receipt(received: Decimal, rejected: Decimal) -> OspReceipt {
        OspReceipt {
            received_on: date(8),
            quantity_received: received,
            quantity_rejected: rejected,
            remarks: None,
        }
    }

    #[test]
    fn test_receipts_until_completed() {
        let mut j = job();
        j.receive(receipt(dec!(60), dec!(2))).unwrap();
        assert_eq!(j.status, OspJobStatus::PartiallyReceived);
        assert_eq!(j.pending_quantity(), dec!(38));
        assert_eq!(j.accrued_cost(), dec!(150));

        let err = j.receive(receipt(dec!(39), Decimal::ZERO)).unwrap_err();
        match err {
            OpsError::QuantityExceeded { pending, .. } => assert_eq!(pending, dec!(38)),
            other => panic!("unexpected error: {other:?}"),
        }

        j.receive(receipt(dec!(37), dec!(1))).unwrap();
        assert_eq!(j.status, OspJobStatus::Completed);
        assert_eq!(j.receipts.len(), 2);
        assert!(j.receive(receipt(dec!(1), Decimal::ZERO)).is_err());
    }

    #[test]
    fn test_cancel_and_short_close_rules() {
        let mut j = job();
        assert!(j.short_close().is_err());

        j.receive(receipt(dec!(10), Decimal::ZERO)).unwrap();
        assert!(j.cancel().is_err());
        j.short_close().unwrap();
        assert_eq!(j.status, OspJobStatus::ShortClosed);

        let mut fresh = job();
        fresh.cancel().unwrap();
        assert_eq!(fresh.status, OspJobStatus::Cancelled);
    }

    #[test]
    fn test_overdue() {
        let mut j = job();
        assert!(!j.is_overdue(date(10)));
        assert!(j.is_overdue(date(11)));
        j.cancel().unwrap();
        assert!(!j.is_overdue(date(11)));
    }
}
