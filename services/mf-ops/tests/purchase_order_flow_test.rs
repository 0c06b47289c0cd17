//! 采购订单全流程集成测试

mod common;

use common::*;
use mf_ops::application::purchase_order::{
    CreatePurchaseOrderCommand, PurchaseOrderLineInput, ReceiptLineInput,
    ReceivePurchaseOrderCommand, UpdatePurchaseOrderCommand,
};
use mf_ops::domain::ids::{ItemId, PurchaseOrderId, VendorId, WarehouseId};
use mf_ops::domain::purchase_order::{PurchaseOrderFilter, PurchaseOrderStatus};
use mf_ops::domain::vendor::VendorType;
use mferp_common::{Pagination, TenantId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn line(item_id: &ItemId, quantity: Decimal, unit_price: Decimal) -> PurchaseOrderLineInput {
    PurchaseOrderLineInput {
        item_id: item_id.clone(),
        quantity,
        unit_price,
        tax_percent: dec!(18),
    }
}

fn create_cmd(
    tenant: &TenantId,
    vendor_id: &VendorId,
    warehouse_id: &WarehouseId,
    lines: Vec<PurchaseOrderLineInput>,
) -> CreatePurchaseOrderCommand {
    CreatePurchaseOrderCommand {
        tenant_id: tenant.clone(),
        vendor_id: vendor_id.clone(),
        warehouse_id: warehouse_id.clone(),
        order_date: date(3, 2),
        expected_date: Some(date(3, 20)),
        lines,
        notes: Some("Urgent for WO-1182".to_string()),
        performed_by: None,
    }
}

fn receipt(line_no: u32, quantity: Decimal) -> ReceiptLineInput {
    ReceiptLineInput {
        line_no,
        quantity,
        weight_kg: None,
        length_per_piece_mm: None,
        heat_number: None,
    }
}

fn receive_cmd(
    tenant: &TenantId,
    po_id: &PurchaseOrderId,
    receipts: Vec<ReceiptLineInput>,
) -> ReceivePurchaseOrderCommand {
    ReceivePurchaseOrderCommand {
        tenant_id: tenant.clone(),
        po_id: po_id.clone(),
        received_on: date(3, 12),
        receipts,
        performed_by: None,
    }
}

#[tokio::test]
async fn test_purchase_order_receipt_lifecycle() {
    let (services, tenant) = setup();
    let vendor = vendor(&services, &tenant, VendorType::Supplier).await;
    let store = warehouse(&services, &tenant, "RM-STORE").await;
    let bar = square_bar(&services, &tenant).await;
    let bearing = component(&services, &tenant, "BRG-6204").await;

    let po = ok(services
        .purchase_orders
        .create_purchase_order(create_cmd(
            &tenant,
            &vendor.id,
            &store.id,
            vec![line(&bar.id, dec!(4), dec!(1500)), line(&bearing.id, dec!(100), dec!(12.5))],
        ))
        .await);

    assert_eq!(po.po_number, "PO-202603-0001");
    assert_eq!(po.status, PurchaseOrderStatus::Draft);
    assert_eq!(po.subtotal, dec!(7250));
    assert_eq!(po.tax_total, dec!(1305));
    assert_eq!(po.grand_total, dec!(8555));

    // 未审批不能收货
    let early = services
        .purchase_orders
        .receive_purchase_order(receive_cmd(&tenant, &po.id, vec![receipt(2, dec!(10))]))
        .await;
    assert_eq!(err_code(early), "FAILED_PRECONDITION");

    ok(services.purchase_orders.approve_purchase_order(&tenant, &po.id, None).await);

    let mut bar_receipt = receipt(1, dec!(2));
    bar_receipt.weight_kg = Some(dec!(39.25));
    bar_receipt.heat_number = Some("H-4471".to_string());
    let first = ok(services
        .purchase_orders
        .receive_purchase_order(receive_cmd(
            &tenant,
            &po.id,
            vec![bar_receipt, receipt(2, dec!(60))],
        ))
        .await);

    assert_eq!(first.order.status, PurchaseOrderStatus::PartiallyReceived);
    assert_eq!(first.piece_numbers, vec!["RM-SQ50-00001", "RM-SQ50-00002"]);

    let bar_stock = ok(services.inventory.get_stock(&tenant, &bar.id, &store.id).await);
    assert_eq!(bar_stock.quantity, dec!(2));
    assert_eq!(bar_stock.weight_kg, dec!(39.25));
    assert_eq!(bar_stock.length_mm, dec!(2000));

    let bearing_stock = ok(services.inventory.get_stock(&tenant, &bearing.id, &store.id).await);
    assert_eq!(bearing_stock.quantity, dec!(60));

    let piece = ok(services.pieces.get_piece_by_number(&tenant, "RM-SQ50-00001").await);
    assert_eq!(piece.source_ref, po.po_number);
    assert_eq!(piece.heat_number.as_deref(), Some("H-4471"));
    assert_eq!(piece.original_weight_kg, dec!(19.625));

    // 第二行超收，整批不过账
    let mut more_bar = receipt(1, dec!(1));
    more_bar.length_per_piece_mm = Some(dec!(1000));
    let over = services
        .purchase_orders
        .receive_purchase_order(receive_cmd(&tenant, &po.id, vec![more_bar, receipt(2, dec!(50))]))
        .await;
    assert_eq!(err_code(over), "VALIDATION_ERROR");
    let bar_stock = ok(services.inventory.get_stock(&tenant, &bar.id, &store.id).await);
    assert_eq!(bar_stock.quantity, dec!(2));

    // 原材料收货必须给出重量或长度
    let no_measure = services
        .purchase_orders
        .receive_purchase_order(receive_cmd(&tenant, &po.id, vec![receipt(1, dec!(1))]))
        .await;
    assert_eq!(err_code(no_measure), "VALIDATION_ERROR");

    let mut rest_bar = receipt(1, dec!(2));
    rest_bar.length_per_piece_mm = Some(dec!(1000));
    let second = ok(services
        .purchase_orders
        .receive_purchase_order(receive_cmd(&tenant, &po.id, vec![rest_bar, receipt(2, dec!(40))]))
        .await);
    assert_eq!(second.order.status, PurchaseOrderStatus::Received);
    assert_eq!(second.piece_numbers, vec!["RM-SQ50-00003", "RM-SQ50-00004"]);
    assert!(second.order.lines.iter().all(|l| l.pending_quantity.is_zero()));

    let bar_stock = ok(services.inventory.get_stock(&tenant, &bar.id, &store.id).await);
    assert_eq!(bar_stock.quantity, dec!(4));
    assert_eq!(bar_stock.weight_kg, dec!(78.5));

    let closed = ok(services.purchase_orders.close_purchase_order(&tenant, &po.id, None).await);
    assert_eq!(closed.status, PurchaseOrderStatus::Closed);
    let cancel = services.purchase_orders.cancel_purchase_order(&tenant, &po.id, None).await;
    assert_eq!(err_code(cancel), "FAILED_PRECONDITION");

    let found = ok(services
        .purchase_orders
        .get_purchase_order_by_number(&tenant, "PO-202603-0001")
        .await);
    assert_eq!(found.id, po.id);
}

#[tokio::test]
async fn test_draft_update_cancel_and_delete() {
    let (services, tenant) = setup();
    let vendor = vendor(&services, &tenant, VendorType::Both).await;
    let store = warehouse(&services, &tenant, "MAIN").await;
    let bearing = component(&services, &tenant, "BRG-6204").await;

    let po = ok(services
        .purchase_orders
        .create_purchase_order(create_cmd(
            &tenant,
            &vendor.id,
            &store.id,
            vec![line(&bearing.id, dec!(10), dec!(20))],
        ))
        .await);

    let updated = ok(services
        .purchase_orders
        .update_purchase_order(UpdatePurchaseOrderCommand {
            tenant_id: tenant.clone(),
            po_id: po.id.clone(),
            expected_date: None,
            lines: Some(vec![line(&bearing.id, dec!(5), dec!(20))]),
            notes: None,
            performed_by: None,
        })
        .await);
    assert_eq!(updated.subtotal, dec!(100));
    assert_eq!(updated.grand_total, dec!(118));

    // 预计到货日期早于下单日期
    let bad_date = services
        .purchase_orders
        .update_purchase_order(UpdatePurchaseOrderCommand {
            tenant_id: tenant.clone(),
            po_id: po.id.clone(),
            expected_date: Some(date(2, 1)),
            lines: None,
            notes: None,
            performed_by: None,
        })
        .await;
    assert_eq!(err_code(bad_date), "VALIDATION_ERROR");

    let cancelled = ok(services.purchase_orders.cancel_purchase_order(&tenant, &po.id, None).await);
    assert_eq!(cancelled.status, PurchaseOrderStatus::Cancelled);
    let delete = services.purchase_orders.delete_purchase_order(&tenant, &po.id).await;
    assert_eq!(err_code(delete), "FAILED_PRECONDITION");

    let draft = ok(services
        .purchase_orders
        .create_purchase_order(create_cmd(
            &tenant,
            &vendor.id,
            &store.id,
            vec![line(&bearing.id, dec!(1), dec!(20))],
        ))
        .await);
    assert_eq!(draft.po_number, "PO-202603-0002");
    ok(services.purchase_orders.delete_purchase_order(&tenant, &draft.id).await);

    let page = ok(services
        .purchase_orders
        .list_purchase_orders(&tenant, PurchaseOrderFilter::default(), Pagination::default())
        .await);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_supplier_rules() {
    let (services, tenant) = setup();
    let subcontractor = vendor(&services, &tenant, VendorType::Subcontractor).await;
    let store = warehouse(&services, &tenant, "MAIN").await;
    let bearing = component(&services, &tenant, "BRG-6204").await;

    let rejected = services
        .purchase_orders
        .create_purchase_order(create_cmd(
            &tenant,
            &subcontractor.id,
            &store.id,
            vec![line(&bearing.id, dec!(1), dec!(5))],
        ))
        .await;
    assert_eq!(err_code(rejected), "FAILED_PRECONDITION");

    let no_lines = services
        .purchase_orders
        .create_purchase_order(create_cmd(&tenant, &subcontractor.id, &store.id, vec![]))
        .await;
    assert_eq!(err_code(no_lines), "VALIDATION_ERROR");

    let unknown_item = services
        .purchase_orders
        .create_purchase_order(create_cmd(
            &tenant,
            &subcontractor.id,
            &store.id,
            vec![line(&ItemId::new(), dec!(1), dec!(5))],
        ))
        .await;
    assert!(!unknown_item.success);
}

#[tokio::test]
async fn test_failed_split_posts_nothing() {
    let (services, tenant) = setup();
    let vendor = vendor(&services, &tenant, VendorType::Supplier).await;
    let store = warehouse(&services, &tenant, "RM-STORE").await;
    let bar = square_bar(&services, &tenant).await;
    let bearing = component(&services, &tenant, "BRG-6204").await;

    let po = ok(services
        .purchase_orders
        .create_purchase_order(create_cmd(
            &tenant,
            &vendor.id,
            &store.id,
            vec![
                line(&bearing.id, dec!(10), dec!(12.5)),
                line(&bar.id, dec!(4), dec!(1500)),
            ],
        ))
        .await);
    ok(services
        .purchase_orders
        .approve_purchase_order(&tenant, &po.id, None)
        .await);

    // 4 件分不了 0.002 kg，第一行的轴承也不能入库
    let mut tiny_bar = receipt(2, dec!(4));
    tiny_bar.weight_kg = Some(dec!(0.002));
    let result = services
        .purchase_orders
        .receive_purchase_order(receive_cmd(
            &tenant,
            &po.id,
            vec![receipt(1, dec!(10)), tiny_bar],
        ))
        .await;
    assert_eq!(err_code(result), "VALIDATION_ERROR");

    let order = ok(services.purchase_orders.get_purchase_order(&tenant, &po.id).await);
    assert_eq!(order.status, PurchaseOrderStatus::Approved);
    assert!(order.lines.iter().all(|l| l.received_quantity.is_zero()));

    let bearing_stock = ok(services
        .inventory
        .get_stock(&tenant, &bearing.id, &store.id)
        .await);
    assert!(bearing_stock.quantity.is_zero());
    let bar_stock = ok(services.inventory.get_stock(&tenant, &bar.id, &store.id).await);
    assert!(bar_stock.quantity.is_zero());

    let mut bars = receipt(2, dec!(4));
    bars.weight_kg = Some(dec!(78.5));
    let received = ok(services
        .purchase_orders
        .receive_purchase_order(receive_cmd(
            &tenant,
            &po.id,
            vec![receipt(1, dec!(10)), bars],
        ))
        .await);
    assert_eq!(received.order.status, PurchaseOrderStatus::Received);
    assert_eq!(received.piece_numbers.first().map(String::as_str), Some("RM-SQ50-00001"));
    assert_eq!(received.piece_numbers.len(), 4);
}
