//! 强类型 ID 定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
        #[display("{_0}")]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(
    /// 供应商 ID
    VendorId
);
define_id!(
    /// 仓库 ID
    WarehouseId
);
define_id!(
    /// 物料 ID
    ItemId
);
define_id!(
    /// 库存余额 ID
    InventoryBalanceId
);
define_id!(
    /// 库存流水 ID
    StockMovementId
);
define_id!(
    /// 采购订单 ID
    PurchaseOrderId
);
define_id!(
    /// 组件发料单 ID
    ComponentIssueId
);
define_id!(
    /// 期初库存单 ID
    OpeningStockId
);
define_id!(
    /// 物料件 ID
    MaterialPieceId
);
define_id!(
    /// 物料使用记录 ID
    MaterialUsageId
);
define_id!(
    /// 外协加工单 ID
    OspJobId
);
