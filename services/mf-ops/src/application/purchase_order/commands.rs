//! 采购订单命令定义

use std::collections::HashSet;

use chrono::NaiveDate;
use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::ids::{ItemId, PurchaseOrderId, VendorId, WarehouseId};

/// 订单行输入，行号按顺序从 1 分配
#[derive(Debug, Clone)]
pub struct PurchaseOrderLineInput {
    pub item_id: ItemId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_percent: Decimal,
}

#[derive(Debug, Clone)]
pub struct CreatePurchaseOrderCommand {
    pub tenant_id: TenantId,
    pub vendor_id: VendorId,
    pub warehouse_id: WarehouseId,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub lines: Vec<PurchaseOrderLineInput>,
    pub notes: Option<String>,
    pub performed_by: Option<UserId>,
}

impl CreatePurchaseOrderCommand {
    pub fn validate(&self) -> Result<(), String> {
        validate_lines(&self.lines)?;
        validate_dates(self.order_date, self.expected_date)
    }
}

/// 修改草稿订单；给出 lines 时整体替换
#[derive(Debug, Clone)]
pub struct UpdatePurchaseOrderCommand {
    pub tenant_id: TenantId,
    pub po_id: PurchaseOrderId,
    pub expected_date: Option<NaiveDate>,
    pub lines: Option<Vec<PurchaseOrderLineInput>>,
    pub notes: Option<String>,
    pub performed_by: Option<UserId>,
}

impl UpdatePurchaseOrderCommand {
    pub fn validate(&self) -> Result<(), String> {
        match self.lines {
            Some(ref lines) => validate_lines(lines),
            None => Ok(()),
        }
    }
}

/// 收货行
#[derive(Debug, Clone)]
pub struct ReceiptLineInput {
    pub line_no: u32,
    /// 原材料为件数
    pub quantity: Decimal,
    pub weight_kg: Option<Decimal>,
    pub length_per_piece_mm: Option<Decimal>,
    pub heat_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReceivePurchaseOrderCommand {
    pub tenant_id: TenantId,
    pub po_id: PurchaseOrderId,
    pub received_on: NaiveDate,
    pub receipts: Vec<ReceiptLineInput>,
    pub performed_by: Option<UserId>,
}

impl ReceivePurchaseOrderCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.receipts.is_empty() {
            return Err("At least one receipt line is required".to_string());
        }

        let mut seen = HashSet::new();
        for receipt in &self.receipts {
            if !seen.insert(receipt.line_no) {
                return Err(format!("Line {} appears more than once", receipt.line_no));
            }
            if receipt.quantity <= Decimal::ZERO {
                return Err(format!(
                    "Received quantity for line {} must be greater than zero",
                    receipt.line_no
                ));
            }
            if receipt.weight_kg.is_some_and(|w| w <= Decimal::ZERO)
                || receipt.length_per_piece_mm.is_some_and(|l| l <= Decimal::ZERO)
            {
                return Err(format!(
                    "Weight and length for line {} must be greater than zero",
                    receipt.line_no
                ));
            }
        }
        Ok(())
    }
}

fn validate_lines(lines: &[PurchaseOrderLineInput]) -> Result<(), String> {
    if lines.is_empty() {
        return Err("Purchase order must have at least one line".to_string());
    }
    for (index, line) in lines.iter().enumerate() {
        let line_no = index + 1;
        if line.quantity <= Decimal::ZERO {
            return Err(format!("Line {}: quantity must be greater than zero", line_no));
        }
        if line.unit_price < Decimal::ZERO {
            return Err(format!("Line {}: unit price cannot be negative", line_no));
        }
        if line.tax_percent < Decimal::ZERO || line.tax_percent > dec!(100) {
            return Err(format!("Line {}: tax percent must be between 0 and 100", line_no));
        }
    }
    Ok(())
}

pub(crate) fn validate_dates(
    order_date: NaiveDate,
    expected: Option<NaiveDate>,
) -> Result<(), String> {
    match expected {
        Some(expected) if expected < order_date => {
            Err("Expected date cannot be before order date".to_string())
        }
        _ => Ok(()),
    }
}
