//! 业务指标记录

use metrics::counter;
use rust_decimal::Decimal;

use crate::domain::inventory::MovementType;

/// 记录库存过账
pub fn record_stock_movement(movement_type: MovementType) {
    let labels = [("movement_type", movement_type.as_str().to_string())];
    counter!("mfops_stock_movements_total", &labels).increment(1);
}

/// 记录单据创建（采购单、发料单、期初单、外协单、供应商）
pub fn record_document_created(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!("mfops_documents_created_total", &labels).increment(1);
}

/// 记录外协回收
pub fn record_osp_receipt(quantity_rejected: Decimal) {
    let labels = [("has_rejection", (!quantity_rejected.is_zero()).to_string())];
    counter!("mfops_osp_receipts_total", &labels).increment(1);
}

/// 记录原材料使用（recorded / reversed / scrapped）
pub fn record_material_usage(action: &str) {
    let labels = [("action", action.to_string())];
    counter!("mfops_material_usage_total", &labels).increment(1);
}
