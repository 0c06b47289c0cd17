//! 采购订单响应

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ids::{ItemId, PurchaseOrderId, VendorId, WarehouseId};
use crate::domain::purchase_order::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderLineResponse {
    pub line_no: u32,
    pub item_id: ItemId,
    pub quantity: Decimal,
    pub received_quantity: Decimal,
    pub pending_quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_percent: Decimal,
    pub amount: Decimal,
    pub tax_amount: Decimal,
}

impl From<PurchaseOrderLine> for PurchaseOrderLineResponse {
    fn from(line: PurchaseOrderLine) -> Self {
        Self {
            amount: line.amount(),
            tax_amount: line.tax_amount(),
            pending_quantity: line.pending_quantity(),
            line_no: line.line_no,
            item_id: line.item_id,
            quantity: line.quantity,
            received_quantity: line.received_quantity,
            unit_price: line.unit_price,
            tax_percent: line.tax_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderResponse {
    pub id: PurchaseOrderId,
    pub po_number: String,
    pub vendor_id: VendorId,
    pub warehouse_id: WarehouseId,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    pub lines: Vec<PurchaseOrderLineResponse>,
    pub notes: Option<String>,
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PurchaseOrder> for PurchaseOrderResponse {
    fn from(order: PurchaseOrder) -> Self {
        Self {
            id: order.id,
            po_number: order.po_number,
            vendor_id: order.vendor_id,
            warehouse_id: order.warehouse_id,
            order_date: order.order_date,
            expected_date: order.expected_date,
            status: order.status,
            lines: order.lines.into_iter().map(Into::into).collect(),
            notes: order.notes,
            subtotal: order.subtotal,
            tax_total: order.tax_total,
            grand_total: order.grand_total,
            created_at: order.audit_info.created_at,
            updated_at: order.audit_info.updated_at,
        }
    }
}

/// 收货结果：订单最新状态与本次生成的原材料件号
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceiptResponse {
    pub order: PurchaseOrderResponse,
    pub piece_numbers: Vec<String>,
}
