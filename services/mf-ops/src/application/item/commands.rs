//! 物料命令定义

use mferp_common::{TenantId, UserId};
use rust_decimal::Decimal;

use crate::domain::geometry::{CrossSection, MaterialSpec};
use crate::domain::ids::ItemId;
use crate::domain::item::ItemCategory;

/// 原材料规格输入，未给密度时使用配置的默认密度
#[derive(Debug, Clone)]
pub struct MaterialSpecInput {
    pub cross_section: CrossSection,
    pub grade: String,
    pub density_g_cm3: Option<Decimal>,
}

impl MaterialSpecInput {
    pub fn into_spec(self, default_density: Decimal) -> MaterialSpec {
        MaterialSpec::new(
            self.cross_section,
            self.grade.trim(),
            self.density_g_cm3.unwrap_or(default_density),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CreateItemCommand {
    pub tenant_id: TenantId,
    pub item_code: String,
    pub name: String,
    pub category: ItemCategory,
    pub uom: String,
    pub material_spec: Option<MaterialSpecInput>,
    pub reorder_level: Option<Decimal>,
    pub performed_by: Option<UserId>,
}

impl CreateItemCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Item name cannot be empty".to_string());
        }
        if self.name.chars().count() > 200 {
            return Err("Item name cannot exceed 200 characters".to_string());
        }
        if self.uom.trim().is_empty() {
            return Err("Unit of measure cannot be empty".to_string());
        }
        validate_reorder_level(self.reorder_level)
    }
}

/// 更新物料命令；规格仅在无库存时允许修改
#[derive(Debug, Clone)]
pub struct UpdateItemCommand {
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    pub name: Option<String>,
    pub uom: Option<String>,
    pub material_spec: Option<MaterialSpecInput>,
    pub reorder_level: Option<Decimal>,
    pub performed_by: Option<UserId>,
}

impl UpdateItemCommand {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref name) = self.name
            && name.trim().is_empty()
        {
            return Err("Item name cannot be empty".to_string());
        }
        if let Some(ref uom) = self.uom
            && uom.trim().is_empty()
        {
            return Err("Unit of measure cannot be empty".to_string());
        }
        validate_reorder_level(self.reorder_level)
    }
}

fn validate_reorder_level(level: Option<Decimal>) -> Result<(), String> {
    match level {
        Some(l) if l < Decimal::ZERO => Err("Reorder level cannot be negative".to_string()),
        _ => Ok(()),
    }
}
