//! 组件发料与退料集成测试

mod common;

use common::*;
use mf_ops::application::ServiceRegistry;
use mf_ops::application::component_issue::{IssueComponentCommand, ReturnComponentCommand};
use mf_ops::application::inventory::AdjustStockCommand;
use mf_ops::domain::component_issue::{ComponentIssueFilter, IssueStatus};
use mf_ops::domain::ids::{ComponentIssueId, ItemId, WarehouseId};
use mferp_common::{Pagination, TenantId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

async fn add_stock(
    services: &ServiceRegistry,
    tenant: &TenantId,
    item_id: &ItemId,
    warehouse_id: &WarehouseId,
    quantity: Decimal,
) {
    ok(services
        .inventory
        .adjust_stock(AdjustStockCommand {
            tenant_id: tenant.clone(),
            item_id: item_id.clone(),
            warehouse_id: warehouse_id.clone(),
            quantity_delta: quantity,
            reason: "Stock count".to_string(),
            performed_by: None,
        })
        .await);
}

fn issue(
    tenant: &TenantId,
    item_id: &ItemId,
    warehouse_id: &WarehouseId,
    quantity: Decimal,
    issued_to: &str,
) -> IssueComponentCommand {
    IssueComponentCommand {
        tenant_id: tenant.clone(),
        item_id: item_id.clone(),
        warehouse_id: warehouse_id.clone(),
        quantity,
        issued_to: issued_to.to_string(),
        reference: Some("WO-1182".to_string()),
        issue_date: date(3, 9),
        remarks: None,
        performed_by: None,
    }
}

fn return_cmd(
    tenant: &TenantId,
    issue_id: &ComponentIssueId,
    quantity: Decimal,
) -> ReturnComponentCommand {
    ReturnComponentCommand {
        tenant_id: tenant.clone(),
        issue_id: issue_id.clone(),
        quantity,
        remarks: None,
        performed_by: None,
    }
}

#[tokio::test]
async fn test_issue_and_return_components() {
    let (services, tenant) = setup();
    let store = warehouse(&services, &tenant, "MAIN").await;
    let bearing = component(&services, &tenant, "BRG-6204").await;
    add_stock(&services, &tenant, &bearing.id, &store.id, dec!(20)).await;

    let issued = ok(services
        .component_issues
        .issue_component(issue(&tenant, &bearing.id, &store.id, dec!(8), "Assembly Line 1"))
        .await);
    assert_eq!(issued.issue_number, "CI-202603-0001");
    assert_eq!(issued.status, IssueStatus::Issued);

    let stock = ok(services.inventory.get_stock(&tenant, &bearing.id, &store.id).await);
    assert_eq!(stock.quantity, dec!(12));

    // 库存不足时不生成发料单
    let short = services
        .component_issues
        .issue_component(issue(&tenant, &bearing.id, &store.id, dec!(15), "Assembly Line 2"))
        .await;
    assert_eq!(err_code(short), "FAILED_PRECONDITION");

    let partial = ok(services
        .component_issues
        .return_component(return_cmd(&tenant, &issued.id, dec!(3)))
        .await);
    assert_eq!(partial.status, IssueStatus::PartiallyReturned);
    assert_eq!(partial.returnable_quantity, dec!(5));

    let over = services
        .component_issues
        .return_component(return_cmd(&tenant, &issued.id, dec!(6)))
        .await;
    assert_eq!(err_code(over), "VALIDATION_ERROR");

    let full = ok(services
        .component_issues
        .return_component(return_cmd(&tenant, &issued.id, dec!(5)))
        .await);
    assert_eq!(full.status, IssueStatus::Returned);

    let stock = ok(services.inventory.get_stock(&tenant, &bearing.id, &store.id).await);
    assert_eq!(stock.quantity, dec!(20));

    let page = ok(services
        .component_issues
        .list_component_issues(
            &tenant,
            ComponentIssueFilter {
                issued_to: Some("line 1".to_string()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_raw_material_cannot_be_issued() {
    let (services, tenant) = setup();
    let store = warehouse(&services, &tenant, "MAIN").await;
    let bar = square_bar(&services, &tenant).await;

    let result = services
        .component_issues
        .issue_component(issue(&tenant, &bar.id, &store.id, dec!(1), "Cutting"))
        .await;
    assert_eq!(err_code(result), "VALIDATION_ERROR");

    let missing_recipient = services
        .component_issues
        .issue_component(issue(&tenant, &bar.id, &store.id, dec!(1), ""))
        .await;
    assert_eq!(err_code(missing_recipient), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_return_rejected_in_inactive_warehouse() {
    let (services, tenant) = setup();
    let store = warehouse(&services, &tenant, "MAIN").await;
    let bearing = component(&services, &tenant, "BRG-6204").await;
    add_stock(&services, &tenant, &bearing.id, &store.id, dec!(20)).await;

    let issued = ok(services
        .component_issues
        .issue_component(issue(&tenant, &bearing.id, &store.id, dec!(8), "Assembly Line 1"))
        .await);

    ok(services
        .warehouses
        .deactivate_warehouse(&tenant, &store.id, None)
        .await);
    let result = services
        .component_issues
        .return_component(return_cmd(&tenant, &issued.id, dec!(3)))
        .await;
    assert_eq!(err_code(result), "FAILED_PRECONDITION");

    let unchanged = ok(services
        .component_issues
        .get_component_issue(&tenant, &issued.id)
        .await);
    assert_eq!(unchanged.status, IssueStatus::Issued);
    assert_eq!(unchanged.returnable_quantity, dec!(8));

    let stock = ok(services.inventory.get_stock(&tenant, &bearing.id, &store.id).await);
    assert_eq!(stock.quantity, dec!(12));
}
