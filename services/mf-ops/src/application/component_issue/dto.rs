//! 组件发料响应

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::component_issue::{ComponentIssue, IssueStatus};
use crate::domain::ids::{ComponentIssueId, ItemId, WarehouseId};

#[derive(Debug, Clone, Serialize)]
pub struct ComponentIssueResponse {
    pub id: ComponentIssueId,
    pub issue_number: String,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub quantity: Decimal,
    pub returned_quantity: Decimal,
    pub returnable_quantity: Decimal,
    pub issued_to: String,
    pub reference: Option<String>,
    pub issue_date: NaiveDate,
    pub status: IssueStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ComponentIssue> for ComponentIssueResponse {
    fn from(issue: ComponentIssue) -> Self {
        Self {
            returnable_quantity: issue.returnable_quantity(),
            id: issue.id,
            issue_number: issue.issue_number,
            item_id: issue.item_id,
            warehouse_id: issue.warehouse_id,
            quantity: issue.quantity,
            returned_quantity: issue.returned_quantity,
            issued_to: issue.issued_to,
            reference: issue.reference,
            issue_date: issue.issue_date,
            status: issue.status,
            remarks: issue.remarks,
            created_at: issue.audit_info.created_at,
        }
    }
}
