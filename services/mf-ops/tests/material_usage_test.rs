//! 原材料件下料、冲销与报废集成测试

mod common;

use common::*;
use mf_ops::application::material_piece::{
    MaterialPieceResponse, RecordUsageCommand, ReverseUsageCommand, ScrapPieceCommand,
};
use mf_ops::application::opening_stock::CreateOpeningStockCommand;
use mf_ops::application::ServiceRegistry;
use mf_ops::domain::ids::{ItemId, WarehouseId};
use mf_ops::domain::material_piece::{PieceStatus, UsageFilter};
use mferp_common::{Pagination, TenantId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 两根 1000mm 的 50 方棒料入库，返回仓库与物料 id
async fn stock_two_bars(
    services: &ServiceRegistry,
    tenant: &TenantId,
) -> (WarehouseId, ItemId) {
    let store = warehouse(services, tenant, "RM-STORE").await;
    let bar = square_bar(services, tenant).await;
    let entry = ok(services
        .opening_stock
        .create_opening_stock(CreateOpeningStockCommand {
            tenant_id: tenant.clone(),
            item_id: bar.id.clone(),
            warehouse_id: store.id.clone(),
            quantity: dec!(2),
            total_weight_kg: Some(dec!(39.25)),
            length_per_piece_mm: None,
            heat_number: None,
            unit_cost: None,
            remarks: None,
            performed_by: None,
        })
        .await);
    ok(services.opening_stock.confirm_opening_stock(tenant, &entry.id, None).await);
    (store.id, bar.id)
}

fn usage(
    tenant: &TenantId,
    piece: &MaterialPieceResponse,
    length: Decimal,
    reference: &str,
) -> RecordUsageCommand {
    RecordUsageCommand {
        tenant_id: tenant.clone(),
        piece_id: piece.id.clone(),
        used_length_mm: length,
        reference: reference.to_string(),
        used_on: date(3, 15),
        remarks: None,
        performed_by: None,
    }
}

#[tokio::test]
async fn test_usage_reversal_and_scrap() {
    let (services, tenant) = setup();
    let (store_id, bar_id) = stock_two_bars(&services, &tenant).await;

    let first = ok(services.pieces.get_piece_by_number(&tenant, "RM-SQ50-00001").await);
    let second = ok(services.pieces.get_piece_by_number(&tenant, "RM-SQ50-00002").await);

    let cut = ok(services.pieces.record_usage(usage(&tenant, &first, dec!(300), "WO-1182")).await);
    assert_eq!(cut.usage.used_weight_kg, dec!(5.888));
    assert_eq!(cut.piece.remaining_length_mm, dec!(700));
    assert_eq!(cut.piece.remaining_weight_kg, dec!(13.737));
    assert_eq!(cut.piece.status, PieceStatus::PartiallyUsed);

    let stock = ok(services.inventory.get_stock(&tenant, &bar_id, &store_id).await);
    assert_eq!(stock.quantity, dec!(2));
    assert_eq!(stock.weight_kg, dec!(33.362));
    assert_eq!(stock.length_mm, dec!(1700));

    let rest = ok(services.pieces.record_usage(usage(&tenant, &first, dec!(700), "WO-1183")).await);
    assert_eq!(rest.usage.used_weight_kg, dec!(13.737));
    assert_eq!(rest.piece.status, PieceStatus::Consumed);

    let stock = ok(services.inventory.get_stock(&tenant, &bar_id, &store_id).await);
    assert_eq!(stock.quantity, dec!(1));
    assert_eq!(stock.weight_kg, dec!(19.625));

    // 只能冲销最近一次下料
    let older = services
        .pieces
        .reverse_usage(ReverseUsageCommand {
            tenant_id: tenant.clone(),
            usage_id: cut.usage.id.clone(),
            performed_by: None,
        })
        .await;
    assert_eq!(err_code(older), "FAILED_PRECONDITION");

    let reversed = ok(services
        .pieces
        .reverse_usage(ReverseUsageCommand {
            tenant_id: tenant.clone(),
            usage_id: rest.usage.id.clone(),
            performed_by: None,
        })
        .await);
    assert!(reversed.usage.reversed);
    assert_eq!(reversed.piece.status, PieceStatus::PartiallyUsed);
    assert_eq!(reversed.piece.remaining_length_mm, dec!(700));

    let stock = ok(services.inventory.get_stock(&tenant, &bar_id, &store_id).await);
    assert_eq!(stock.quantity, dec!(2));
    assert_eq!(stock.weight_kg, dec!(33.362));

    let too_long = services.pieces.record_usage(usage(&tenant, &first, dec!(800), "WO-1184")).await;
    assert_eq!(err_code(too_long), "VALIDATION_ERROR");

    let scrapped = ok(services
        .pieces
        .scrap_piece(ScrapPieceCommand {
            tenant_id: tenant.clone(),
            piece_id: second.id.clone(),
            reason: "Crack near end".to_string(),
            performed_by: None,
        })
        .await);
    assert_eq!(scrapped.status, PieceStatus::Scrapped);

    let stock = ok(services.inventory.get_stock(&tenant, &bar_id, &store_id).await);
    assert_eq!(stock.quantity, dec!(1));
    assert_eq!(stock.weight_kg, dec!(13.737));
    assert_eq!(stock.length_mm, dec!(700));

    let on_scrap = services.pieces.record_usage(usage(&tenant, &second, dec!(10), "WO-1185")).await;
    assert_eq!(err_code(on_scrap), "FAILED_PRECONDITION");

    let usages = ok(services
        .pieces
        .list_usages(
            &tenant,
            UsageFilter {
                piece_id: Some(first.id.clone()),
                reference: None,
            },
            Pagination::default(),
        )
        .await);
    assert_eq!(usages.total, 2);
    assert_eq!(usages.items.iter().filter(|u| u.reversed).count(), 1);
}

#[tokio::test]
async fn test_usage_requires_active_warehouse_and_blocks_delete() {
    let (services, tenant) = setup();
    let (store_id, _) = stock_two_bars(&services, &tenant).await;
    let piece = ok(services.pieces.get_piece_by_number(&tenant, "RM-SQ50-00001").await);

    let delete = services.warehouses.delete_warehouse(&tenant, &store_id).await;
    assert_eq!(err_code(delete), "CONFLICT");

    ok(services.warehouses.deactivate_warehouse(&tenant, &store_id, None).await);
    let result = services.pieces.record_usage(usage(&tenant, &piece, dec!(100), "WO-2001")).await;
    assert_eq!(err_code(result), "FAILED_PRECONDITION");

    let other_tenant = TenantId::new();
    let hidden = services.pieces.get_piece(&other_tenant, &piece.id).await;
    assert_eq!(err_code(hidden), "NOT_FOUND");
}

#[tokio::test]
async fn test_scrap_rejected_in_inactive_warehouse() {
    let (services, tenant) = setup();
    let (store_id, bar_id) = stock_two_bars(&services, &tenant).await;
    let piece = ok(services.pieces.get_piece_by_number(&tenant, "RM-SQ50-00001").await);
    let scrap = || ScrapPieceCommand {
        tenant_id: tenant.clone(),
        piece_id: piece.id.clone(),
        reason: "Bent during handling".to_string(),
        performed_by: None,
    };

    ok(services.warehouses.deactivate_warehouse(&tenant, &store_id, None).await);
    let result = services.pieces.scrap_piece(scrap()).await;
    assert_eq!(err_code(result), "FAILED_PRECONDITION");

    let unchanged = ok(services.pieces.get_piece(&tenant, &piece.id).await);
    assert_eq!(unchanged.status, PieceStatus::Available);
    let stock = ok(services.inventory.get_stock(&tenant, &bar_id, &store_id).await);
    assert_eq!(stock.quantity, dec!(2));
    assert_eq!(stock.weight_kg, dec!(39.25));

    ok(services.warehouses.activate_warehouse(&tenant, &store_id, None).await);
    let scrapped = ok(services.pieces.scrap_piece(scrap()).await);
    assert_eq!(scrapped.status, PieceStatus::Scrapped);
    let stock = ok(services.inventory.get_stock(&tenant, &bar_id, &store_id).await);
    assert_eq!(stock.quantity, dec!(1));
}
