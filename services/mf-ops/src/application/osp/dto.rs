//! 外协加工响应

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::geometry::round_half_up;
use crate::domain::ids::{ItemId, OspJobId, VendorId, WarehouseId};
use crate::domain::osp::{OspJob, OspJobStatus, OspReceipt};

#[derive(Debug, Clone, Serialize)]
pub struct OspReceiptResponse {
    pub received_on: NaiveDate,
    pub quantity_received: Decimal,
    pub quantity_rejected: Decimal,
    pub remarks: Option<String>,
}

impl From<OspReceipt> for OspReceiptResponse {
    fn from(receipt: OspReceipt) -> Self {
        Self {
            received_on: receipt.received_on,
            quantity_received: receipt.quantity_received,
            quantity_rejected: receipt.quantity_rejected,
            remarks: receipt.remarks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OspJobResponse {
    pub id: OspJobId,
    pub job_number: String,
    pub vendor_id: VendorId,
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
    pub process: String,
    pub quantity_sent: Decimal,
    pub quantity_received: Decimal,
    pub quantity_rejected: Decimal,
    pub pending_quantity: Decimal,
    pub rate_per_unit: Decimal,
    pub accrued_cost: Decimal,
    pub sent_on: NaiveDate,
    pub expected_return_on: Option<NaiveDate>,
    pub status: OspJobStatus,
    pub receipts: Vec<OspReceiptResponse>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OspJob> for OspJobResponse {
    fn from(job: OspJob) -> Self {
        Self {
            pending_quantity: job.pending_quantity(),
            accrued_cost: round_half_up(job.accrued_cost(), 2),
            id: job.id,
            job_number: job.job_number,
            vendor_id: job.vendor_id,
            item_id: job.item_id,
            warehouse_id: job.warehouse_id,
            process: job.process,
            quantity_sent: job.quantity_sent,
            quantity_received: job.quantity_received,
            quantity_rejected: job.quantity_rejected,
            rate_per_unit: job.rate_per_unit,
            sent_on: job.sent_on,
            expected_return_on: job.expected_return_on,
            status: job.status,
            receipts: job.receipts.into_iter().map(OspReceiptResponse::from).collect(),
            remarks: job.remarks,
            created_at: job.audit_info.created_at,
        }
    }
}
