//! 原材料使用记录

use chrono::NaiveDate;
use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{MaterialPieceId, MaterialUsageId};

/// 一次切割使用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub id: MaterialUsageId,
    pub tenant_id: TenantId,
    pub piece_id: MaterialPieceId,
    pub used_length_mm: Decimal,
    pub used_weight_kg: Decimal,
    /// 生产工单号等
    pub reference: String,
    pub used_on: NaiveDate,
    pub remarks: Option<String>,
    pub reversed: bool,
    pub audit_info: AuditInfo,
}

impl MaterialUsage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        piece_id: MaterialPieceId,
        used_length_mm: Decimal,
        used_weight_kg: Decimal,
        reference: String,
        used_on: NaiveDate,
        remarks: Option<String>,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: MaterialUsageId::new(),
            tenant_id,
            piece_id,
            used_length_mm,
            used_weight_kg,
            reference,
            used_on,
            remarks,
            reversed: false,
            audit_info: AuditInfo::new(created_by),
        }
    }

    pub fn mark_reversed(&mut self, user_id: Option<UserId>) {
        self.reversed = true;
        self.audit_info.update(user_id);
    }
}

impl Entity for MaterialUsage {
    type Id = MaterialUsageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for MaterialUsage {
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
