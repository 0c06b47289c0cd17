//! 集成测试共享夹具

#![allow(dead_code)]

use chrono::NaiveDate;
use mf_ops::application::ApiResponse;
use mf_ops::application::item::{CreateItemCommand, ItemResponse, MaterialSpecInput};
use mf_ops::application::vendor::{CreateVendorCommand, VendorResponse};
use mf_ops::application::warehouse::{CreateWarehouseCommand, WarehouseResponse};
use mf_ops::domain::geometry::CrossSection;
use mf_ops::domain::item::ItemCategory;
use mf_ops::domain::vendor::VendorType;
use mf_ops::ServiceRegistry;
use mferp_common::TenantId;
use mferp_config::AppConfig;
use rust_decimal_macros::dec;

pub fn setup() -> (ServiceRegistry, TenantId) {
    mferp_telemetry::init_test_tracing();
    (ServiceRegistry::in_memory(AppConfig::default()), TenantId::new())
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

/// 取出成功响应的数据
pub fn ok<T>(response: ApiResponse<T>) -> T {
    assert!(response.success, "expected success, got: {}", response.message);
    response.data.unwrap()
}

/// 断言失败并返回错误码
pub fn err_code<T>(response: ApiResponse<T>) -> String {
    assert!(!response.success, "expected failure, got success: {}", response.message);
    response.error_code().unwrap().to_string()
}

pub async fn vendor(
    services: &ServiceRegistry,
    tenant: &TenantId,
    vendor_type: VendorType,
) -> VendorResponse {
    ok(services
        .vendors
        .create_vendor(CreateVendorCommand {
            tenant_id: tenant.clone(),
            name: "Sharda Steels".to_string(),
            vendor_type,
            contact_person: None,
            phone: Some("+91 20 2712 3456".to_string()),
            email: Some("sales@shardasteels.in".to_string()),
            tax_id: None,
            address: None,
            payment_terms_days: None,
            performed_by: None,
        })
        .await)
}

pub async fn warehouse(
    services: &ServiceRegistry,
    tenant: &TenantId,
    code: &str,
) -> WarehouseResponse {
    ok(services
        .warehouses
        .create_warehouse(CreateWarehouseCommand {
            tenant_id: tenant.clone(),
            code: code.to_string(),
            name: format!("Store {}", code),
            warehouse_type: mf_ops::domain::warehouse::WarehouseType::General,
            address: None,
            performed_by: None,
        })
        .await)
}

/// 50 方 EN8 棒料，每毫米 0.019625 kg
pub async fn square_bar(services: &ServiceRegistry, tenant: &TenantId) -> ItemResponse {
    ok(services
        .items
        .create_item(CreateItemCommand {
            tenant_id: tenant.clone(),
            item_code: "rm-sq50".to_string(),
            name: "EN8 square bar 50".to_string(),
            category: ItemCategory::RawMaterial,
            uom: "PCS".to_string(),
            material_spec: Some(MaterialSpecInput {
                cross_section: CrossSection::Square { side: dec!(50) },
                grade: "EN8".to_string(),
                density_g_cm3: None,
            }),
            reorder_level: None,
            performed_by: None,
        })
        .await)
}

pub async fn component(services: &ServiceRegistry, tenant: &TenantId, code: &str) -> ItemResponse {
    ok(services
        .items
        .create_item(CreateItemCommand {
            tenant_id: tenant.clone(),
            item_code: code.to_string(),
            name: format!("Component {}", code),
            category: ItemCategory::Component,
            uom: "NOS".to_string(),
            material_spec: None,
            reorder_level: Some(dec!(10)),
            performed_by: None,
        })
        .await)
}
