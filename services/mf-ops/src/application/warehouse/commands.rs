//! 仓库命令定义

use mferp_common::{TenantId, UserId};

use crate::domain::ids::WarehouseId;
use crate::domain::warehouse::WarehouseType;

#[derive(Debug, Clone)]
pub struct CreateWarehouseCommand {
    pub tenant_id: TenantId,
    pub code: String,
    pub name: String,
    pub warehouse_type: WarehouseType,
    pub address: Option<String>,
    pub performed_by: Option<UserId>,
}

impl CreateWarehouseCommand {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateWarehouseCommand {
    pub tenant_id: TenantId,
    pub warehouse_id: WarehouseId,
    pub name: Option<String>,
    pub warehouse_type: Option<WarehouseType>,
    pub address: Option<String>,
    pub performed_by: Option<UserId>,
}

impl UpdateWarehouseCommand {
    pub fn validate(&self) -> Result<(), String> {
        match self.name {
            Some(ref name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Warehouse name cannot be empty".to_string());
    }
    if name.chars().count() > 100 {
        return Err("Warehouse name cannot exceed 100 characters".to_string());
    }
    Ok(())
}
