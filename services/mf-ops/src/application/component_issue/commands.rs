//! 组件发料命令定义

use chrono::NaiveDate;
use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;

use crate::domain::ids::{ComponentIssueId, ItemId, WarehouseId};

#[derive(Debug, Clone)]
pub struct IssueComponentCommand {
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub issued_to: String,
    /// 工单号等外部参考
    pub reference: Option<String>,
    pub issue_date: NaiveDate,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl IssueComponentCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity <= Decimal::ZERO {
            return Err("Quantity must be greater than zero".to_string());
        }
        if self.issued_to.trim().is_empty() {
            return Err("Issued to is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ReturnComponentCommand {
    pub tenant_id: TenantId,
    pub issue_id: ComponentIssueId,
    pub quantity: Decimal,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl ReturnComponentCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity <= Decimal::ZERO {
            return Err("Return quantity must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn issue_cmd() -> IssueComponentCommand {
        IssueComponentCommand {
            tenant_id: TenantId::new(),
            item_id: ItemId::new(),
            warehouse_id: WarehouseId::new(),
            quantity: dec!(4),
            issued_to: "Assembly Line 1".to_string(),
            reference: None,
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            remarks: None,
            performed_by: None,
        }
    }

    #[test]
    fn test_issue_requires_recipient() {
        assert!(issue_cmd().validate().is_ok());

        let mut cmd = issue_cmd();
        cmd.issued_to = "  ".to_string();
        assert_eq!(cmd.validate().unwrap_err(), "Issued to is required");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cmd = issue_cmd();
        cmd.quantity = Decimal::ZERO;
        assert!(cmd.validate().is_err());

        let ret = ReturnComponentCommand {
            tenant_id: TenantId::new(),
            issue_id: ComponentIssueId::new(),
            quantity: dec!(-1),
            remarks: None,
            performed_by: None,
        };
        assert!(ret.validate().is_err());
    }
}
