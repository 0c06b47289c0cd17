//! 物料响应

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::geometry::{MaterialSpec, round_half_up};
use crate::domain::ids::ItemId;
use crate::domain::item::{Item, ItemCategory};

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub item_code: String,
    pub name: String,
    pub category: ItemCategory,
    pub uom: String,
    pub material_spec: Option<MaterialSpec>,
    /// 原材料每米理论重量
    pub weight_per_metre_kg: Option<Decimal>,
    pub reorder_level: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        let weight_per_metre_kg = item
            .material_spec
            .as_ref()
            .map(|spec| round_half_up(spec.weight_for_length(Decimal::ONE_THOUSAND), 3));

        Self {
            id: item.id,
            item_code: item.item_code,
            name: item.name,
            category: item.category,
            uom: item.uom,
            material_spec: item.material_spec,
            weight_per_metre_kg,
            reorder_level: item.reorder_level,
            is_active: item.is_active,
            created_at: item.audit_info.created_at,
            updated_at: item.audit_info.updated_at,
        }
    }
}
