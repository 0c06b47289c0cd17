//! 库存过账领域服务

use std::sync::Arc;

use chrono::Utc;
use mferp_common::{TenantId, UserId};
use mferp_errors::AppResult;
use tracing::debug;

use super::balance::InventoryBalance;
use super::movement::{MovementType, StockDelta, StockMovement};
use super::repository::{InventoryRepository, StockLedgerRepository};
use crate::domain::ids::{ItemId, StockMovementId, WarehouseId};

/// 过账请求
#[derive(Debug, Clone)]
pub struct PostingRequest {
    pub tenant_id: TenantId,
    pub item_id: ItemId,
    /// 用于错误信息
    pub item_code: String,
    pub warehouse_id: WarehouseId,
    pub movement_type: MovementType,
    pub delta: StockDelta,
    pub reference: Option<String>,
    pub remarks: Option<String>,
    pub performed_by: Option<UserId>,
}

/// 库存过账：加载（或新建）余额，应用变动，保存余额并追加流水
pub struct InventoryPosting {
    inventory: Arc<dyn InventoryRepository>,
    ledger: Arc<dyn StockLedgerRepository>,
}

impl InventoryPosting {
    pub fn new(
        inventory: Arc<dyn InventoryRepository>,
        ledger: Arc<dyn StockLedgerRepository>,
    ) -> Self {
        Self { inventory, ledger }
    }

    pub async fn post(&self, request: PostingRequest) -> AppResult<StockMovement> {
        let mut balance = self
            .inventory
            .find_balance(&request.tenant_id, &request.item_id, &request.warehouse_id)
            .await?
            .unwrap_or_else(|| {
                InventoryBalance::new(
                    request.tenant_id.clone(),
                    request.item_id.clone(),
                    request.warehouse_id.clone(),
                )
            });

        let balance_after =
            balance.apply(&request.item_code, &request.delta, request.performed_by.clone())?;
        self.inventory.save_balance(&balance).await?;

        let movement = StockMovement {
            id: StockMovementId::new(),
            tenant_id: request.tenant_id,
            item_id: request.item_id,
            warehouse_id: request.warehouse_id,
            movement_type: request.movement_type,
            quantity_delta: request.delta.quantity,
            weight_delta: request.delta.weight_kg,
            length_delta: request.delta.length_mm,
            balance_after,
            reference: request.reference,
            remarks: request.remarks,
            created_at: Utc::now(),
            created_by: request.performed_by,
        };
        self.ledger.append(&movement).await?;

        debug!(
            item_code = %request.item_code,
            movement_type = movement.movement_type.as_str(),
            quantity_delta = %movement.quantity_delta,
            "Stock movement posted"
        );

        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::repository::{MockInventoryRepository, MockStockLedgerRepository};
    use mferp_errors::AppError;
    use rust_decimal_macros::dec;

    fn request(delta: StockDelta) -> PostingRequest {
        PostingRequest {
            tenant_id: TenantId::new(),
            item_id: ItemId::new(),
            item_code: "BRG-6204".to_string(),
            warehouse_id: WarehouseId::new(),
            movement_type: MovementType::ComponentIssue,
            delta,
            reference: Some("CI-202603-0001".to_string()),
            remarks: None,
            performed_by: None,
        }
    }

    #[tokio::test]
    async fn test_shortage_does_not_touch_ledger() {
        let mut inventory = MockInventoryRepository::new();
        inventory.expect_find_balance().returning(|_, _, _| Ok(None));
        inventory.expect_save_balance().never();
        let mut ledger = MockStockLedgerRepository::new();
        ledger.expect_append().never();

        let posting = InventoryPosting::new(Arc::new(inventory), Arc::new(ledger));
        let err = posting
            .post(request(StockDelta::quantity(dec!(-1))))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::FailedPrecondition(_)));
    }

    #[tokio::test]
    async fn test_ledger_failure_propagates() {
        let mut inventory = MockInventoryRepository::new();
        inventory.expect_find_balance().returning(|_, _, _| Ok(None));
        inventory.expect_save_balance().times(1).returning(|_| Ok(()));
        let mut ledger = MockStockLedgerRepository::new();
        ledger
            .expect_append()
            .returning(|_| Err(AppError::database("ledger unavailable")));

        let posting = InventoryPosting::new(Arc::new(inventory), Arc::new(ledger));
        let err = posting
            .post(request(StockDelta::quantity(dec!(5))))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }
}
