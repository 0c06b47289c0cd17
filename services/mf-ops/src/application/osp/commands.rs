//! 外协加工命令定义

use chrono::NaiveDate;
use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;

use crate::domain::ids::{ItemId, OspJobId, VendorId, WarehouseId};

#[derive(Debug, Clone)]
pub struct CreateOspJobCommand {
    pub tenant_id: TenantId,
    pub vendor_id: VendorId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub process: String,
    pub quantity: Decimal,
    pub rate_per_unit: Decimal,
    pub sent_on: NaiveDate,
    pub expected_return_on: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl CreateOspJobCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.process.trim().is_empty() {
            return Err("Process is required".to_string());
        }
        if self.quantity <= Decimal::ZERO {
            return Err("Quantity must be greater than zero".to_string());
        }
        if self.rate_per_unit < Decimal::ZERO {
            return Err("Rate per unit cannot be negative".to_string());
        }
        if self.expected_return_on.is_some_and(|d| d < self.sent_on) {
            return Err("Expected return date cannot be before the sent date".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ReceiveOspJobCommand {
    pub tenant_id: TenantId,
    pub job_id: OspJobId,
    pub quantity_received: Decimal,
    pub quantity_rejected: Decimal,
    pub received_on: NaiveDate,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl ReceiveOspJobCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity_received < Decimal::ZERO || self.quantity_rejected < Decimal::ZERO {
            return Err("Received and rejected quantities cannot be negative".to_string());
        }
        if (self.quantity_received + self.quantity_rejected).is_zero() {
            return Err("Received plus rejected quantity must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, day).unwrap()
    }

    #[test]
    fn test_create_validation() {
        let mut cmd = CreateOspJobCommand {
            tenant_id: TenantId::new(),
            vendor_id: VendorId::new(),
            item_id: ItemId::new(),
            warehouse_id: WarehouseId::new(),
            process: "Induction hardening".to_string(),
            quantity: dec!(50),
            rate_per_unit: dec!(12),
            sent_on: date(6),
            expected_return_on: Some(date(12)),
            remarks: None,
            performed_by: None,
        };
        assert!(cmd.validate().is_ok());

        cmd.expected_return_on = Some(date(5));
        assert!(cmd.validate().is_err());

        cmd.expected_return_on = None;
        cmd.process = String::new();
        assert_eq!(cmd.validate().unwrap_err(), "Process is required");
    }

    #[test]
    fn test_receive_needs_some_quantity() {
        let mut cmd = ReceiveOspJobCommand {
            tenant_id: TenantId::new(),
            job_id: OspJobId::new(),
            quantity_received: Decimal::ZERO,
            quantity_rejected: Decimal::ZERO,
            received_on: date(9),
            remarks: None,
            performed_by: None,
        };
        assert!(cmd.validate().is_err());

        cmd.quantity_rejected = dec!(3);
        assert!(cmd.validate().is_ok());

        cmd.quantity_received = dec!(-1);
        assert!(cmd.validate().is_err());
    }
}
