//! 组件发料单

use chrono::NaiveDate;
use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ComponentIssueId, ItemId, WarehouseId};
use crate::error::OpsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Issued,
    PartiallyReturned,
    Returned,
}

/// 组件发料单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentIssue {
    pub id: ComponentIssueId,
    pub tenant_id: TenantId,
    pub issue_number: String,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub returned_quantity: Decimal,
    /// 领用人 / 产线 / 工单
    pub issued_to: String,
    pub reference: Option<String>,
    pub issue_date: NaiveDate,
    pub status: IssueStatus,
    pub remarks: Option<String>,
    pub audit_info: AuditInfo,
}

impl ComponentIssue {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        issue_number: String,
        item_id: ItemId,
        warehouse_id: WarehouseId,
        quantity: Decimal,
        issued_to: String,
        reference: Option<String>,
        issue_date: NaiveDate,
        remarks: Option<String>,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: ComponentIssueId::new(),
            tenant_id,
            issue_number,
            item_id,
            warehouse_id,
            quantity,
            returned_quantity: Decimal::ZERO,
            issued_to,
            reference,
            issue_date,
            status: IssueStatus::Issued,
            remarks,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn returnable_quantity(&self) -> Decimal {
        self.quantity - self.returned_quantity
    }

    /// 退料
    pub fn register_return(&mut self, quantity: Decimal) -> Result<(), OpsError> {
        if self.status == IssueStatus::Returned {
            return Err(OpsError::invalid_transition(
                "component issue",
                self.status,
                "return components against",
            ));
        }

        let pending = self.returnable_quantity();
        if quantity > pending {
            return Err(OpsError::QuantityExceeded {
                requested: quantity,
                pending,
            });
        }

        self.returned_quantity += quantity;
        self.status = if self.returned_quantity == self.quantity {
            IssueStatus::Returned
        } else {
            IssueStatus::PartiallyReturned
        };
        Ok(())
    }
}

impl Entity for ComponentIssue {
    type Id = ComponentIssueId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for ComponentIssue {
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

    #[test]
    fn test_partial_then_full_return() {
        let mut issue = ComponentIssue::new(
            TenantId::new(),
            "CI-202603-0001".to_string(),
            ItemId::new(),
            WarehouseId::new(),
            dec!(10),
            "Line 2".to_string(),
            None,
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            None,
            None,
        );

        issue.register_return(dec!(4)).unwrap();
        assert_eq!(issue.status, IssueStatus::PartiallyReturned);
        assert!(issue.register_return(dec!(7)).is_err());

        issue.register_return(dec!(6)).unwrap();
        assert_eq!(issue.status, IssueStatus::Returned);
        assert!(issue.register_return(dec!(1)).is_err());
    }
}
