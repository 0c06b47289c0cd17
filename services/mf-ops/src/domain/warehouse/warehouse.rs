//! 仓库实体

use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::ids::WarehouseId;
use crate::domain::value_objects::BusinessCode;
use crate::error::OpsError;

/// 仓库类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarehouseType {
    RawMaterial,
    Component,
    FinishedGoods,
    General,
}

/// 仓库实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub tenant_id: TenantId,
    pub code: String,
    pub name: String,
    pub warehouse_type: WarehouseType,
    pub address: Option<String>,
    pub is_active: bool,
    pub audit_info: AuditInfo,
}

impl Warehouse {
    pub fn new(
        tenant_id: TenantId,
        code: BusinessCode,
        name: String,
        warehouse_type: WarehouseType,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: WarehouseId::new(),
            tenant_id,
            code: code.into_string(),
            name,
            warehouse_type,
            address: None,
            is_active: true,
            audit_info: AuditInfo::new(created_by),
        }
    }

    /// 出入库前校验仓库可用
    pub fn ensure_active(&self) -> Result<(), OpsError> {
        if !self.is_active {
            return Err(OpsError::inactive("Warehouse", &self.code));
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Warehouse {
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
