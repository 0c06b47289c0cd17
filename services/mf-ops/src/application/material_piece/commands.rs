//! 原材料件命令定义

use chrono::NaiveDate;
use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;

use crate::domain::ids::{MaterialPieceId, MaterialUsageId};

/// 登记一次下料
#[derive(Debug, Clone)]
pub struct RecordUsageCommand {
    pub tenant_id: TenantId,
    pub piece_id: MaterialPieceId,
    pub used_length_mm: Decimal,
    /// 工单号 / 生产批次
    pub reference: String,
    pub used_on: NaiveDate,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

impl RecordUsageCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.used_length_mm <= Decimal::ZERO {
            return Err("Used length must be greater than zero".to_string());
        }
        if self.reference.trim().is_empty() {
            return Err("Usage reference is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ReverseUsageCommand {
    pub tenant_id: TenantId,
    pub usage_id: MaterialUsageId,
    pub performed_by: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct ScrapPieceCommand {
    pub tenant_id: TenantId,
    pub piece_id: MaterialPieceId,
    pub reason: String,
    pub performed_by: Option<UserId>,
}

impl ScrapPieceCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.reason.trim().is_empty() {
            return Err("Scrap reason is required".to_string());
        }
        Ok(())
    }
}
