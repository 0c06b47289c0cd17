//! 仓库响应

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ids::WarehouseId;
use crate::domain::warehouse::{Warehouse, WarehouseType};

#[derive(Debug, Clone, Serialize)]
pub struct WarehouseResponse {
    pub id: WarehouseId,
    pub code: String,
    pub name: String,
    pub warehouse_type: WarehouseType,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Warehouse> for WarehouseResponse {
    fn from(warehouse: Warehouse) -> Self {
        Self {
            id: warehouse.id,
            code: warehouse.code,
            name: warehouse.name,
            warehouse_type: warehouse.warehouse_type,
            address: warehouse.address,
            is_active: warehouse.is_active,
            created_at: warehouse.audit_info.created_at,
            updated_at: warehouse.audit_info.updated_at,
        }
    }
}
