//! 物料实体

use mferp_common::{AuditInfo, TenantId, UserId};
use mferp_domain_core::{AggregateRoot, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::geometry::MaterialSpec;
use crate::domain::ids::ItemId;
use crate::domain::value_objects::BusinessCode;
use crate::error::OpsError;

/// 物料类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// 原材料（按件管理，带截面规格）
    RawMaterial,
    Component,
    Consumable,
    FinishedGood,
}

/// 物料实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub tenant_id: TenantId,
    pub item_code: String,
    pub name: String,
    pub category: ItemCategory,
    /// 计量单位
    pub uom: String,
    pub material_spec: Option<MaterialSpec>,
    pub reorder_level: Option<Decimal>,
    pub is_active: bool,
    pub audit_info: AuditInfo,
}

impl Item {
    pub fn new(
        tenant_id: TenantId,
        item_code: BusinessCode,
        name: String,
        category: ItemCategory,
        uom: String,
        material_spec: Option<MaterialSpec>,
        created_by: Option<UserId>,
    ) -> Result<Self, OpsError> {
        Self::check_spec(item_code.as_str(), category, material_spec.as_ref())?;

        Ok(Self {
            id: ItemId::new(),
            tenant_id,
            item_code: item_code.into_string(),
            name,
            category,
            uom,
            material_spec,
            reorder_level: None,
            is_active: true,
            audit_info: AuditInfo::new(created_by),
        })
    }

    /// 原材料必须带规格，其他类别不允许带规格
    fn check_spec(
        item_code: &str,
        category: ItemCategory,
        spec: Option<&MaterialSpec>,
    ) -> Result<(), OpsError> {
        match (category, spec) {
            (ItemCategory::RawMaterial, None) => Err(OpsError::InvalidItemCategory {
                item_code: item_code.to_string(),
                reason: "raw material requires a material spec".to_string(),
            }),
            (ItemCategory::RawMaterial, Some(spec)) => spec.validate(),
            (_, Some(_)) => Err(OpsError::InvalidItemCategory {
                item_code: item_code.to_string(),
                reason: "only raw material may carry a material spec".to_string(),
            }),
            (_, None) => Ok(()),
        }
    }

    pub fn is_raw_material(&self) -> bool {
        self.category == ItemCategory::RawMaterial
    }

    pub fn ensure_active(&self) -> Result<(), OpsError> {
        if !self.is_active {
            return Err(OpsError::inactive("Item", &self.item_code));
        }
        Ok(())
    }

    /// 件管理的原材料不能走数量类业务（发料、外协、手工调整）
    pub fn ensure_not_raw_material(&self, operation: &str) -> Result<(), OpsError> {
        if self.is_raw_material() {
            return Err(OpsError::InvalidItemCategory {
                item_code: self.item_code.clone(),
                reason: format!(
                    "raw material is tracked by piece and cannot be used for {}",
                    operation
                ),
            });
        }
        Ok(())
    }

    pub fn ensure_raw_material(&self) -> Result<(), OpsError> {
        if !self.is_raw_material() {
            return Err(OpsError::InvalidItemCategory {
                item_code: self.item_code.clone(),
                reason: "item is not raw material".to_string(),
            });
        }
        Ok(())
    }

    pub fn spec(&self) -> Result<&MaterialSpec, OpsError> {
        self.material_spec.as_ref().ok_or_else(|| {
            OpsError::GeometryUnavailable(format!("item {} has no material spec", self.item_code))
        })
    }

    pub fn change_spec(&mut self, spec: MaterialSpec) -> Result<(), OpsError> {
        Self::check_spec(&self.item_code, self.category, Some(&spec))?;
        self.material_spec = Some(spec);
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Item {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::CrossSection;
    use rust_decimal_macros::dec;

    fn round_bar() -> MaterialSpec {
        MaterialSpec::new(CrossSection::Round { diameter: dec!(32) }, "EN8", dec!(7.85))
    }

    fn code(s: &str) -> BusinessCode {
        BusinessCode::new(s).unwrap()
    }

    #[test]
    fn test_raw_material_requires_spec() {
        let result = Item::new(
            TenantId::new(),
            code("RM-EN8-32"),
            "EN8 round 32".to_string(),
            ItemCategory::RawMaterial,
            "pcs".to_string(),
            None,
            None,
        );
        assert!(matches!(result, Err(OpsError::InvalidItemCategory { .. })));
    }

    #[test]
    fn test_component_rejects_spec() {
        let result = Item::new(
            TenantId::new(),
            code("BRG-6204"),
            "Bearing 6204".to_string(),
            ItemCategory::Component,
            "nos".to_string(),
            Some(round_bar()),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_material_guards() {
        let item = Item::new(
            TenantId::new(),
            code("rm-en8-32"),
            "EN8 round 32".to_string(),
            ItemCategory::RawMaterial,
            "pcs".to_string(),
            Some(round_bar()),
            None,
        )
        .unwrap();

        assert_eq!(item.item_code, "RM-EN8-32");
        assert!(item.spec().is_ok());
        assert!(item.ensure_raw_material().is_ok());
        assert!(item.ensure_not_raw_material("component issue").is_err());
    }
}
