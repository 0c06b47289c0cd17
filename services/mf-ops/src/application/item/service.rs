//! 物料服务

use std::sync::Arc;

use mferp_common::{PagedResult, Pagination, TenantId, UserId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::*;
use super::dto::ItemResponse;
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::domain::ids::ItemId;
use crate::domain::item::{Item, ItemFilter};
use crate::domain::value_objects::BusinessCode;
use crate::error::OpsError;

pub struct ItemService {
    ctx: Arc<ServiceContext>,
}

impl ItemService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn create_item(&self, cmd: CreateItemCommand) -> ApiResponse<ItemResponse> {
        self.handle_create(cmd)
            .await
            .map(ItemResponse::from)
            .into_envelope("Item created successfully")
    }

    pub async fn update_item(&self, cmd: UpdateItemCommand) -> ApiResponse<ItemResponse> {
        self.handle_update(cmd)
            .await
            .map(ItemResponse::from)
            .into_envelope("Item updated successfully")
    }

    pub async fn get_item(&self, tenant_id: &TenantId, id: &ItemId) -> ApiResponse<ItemResponse> {
        self.ctx
            .load_item(tenant_id, id)
            .await
            .map(ItemResponse::from)
            .into_envelope("Item retrieved successfully")
    }

    pub async fn list_items(
        &self,
        tenant_id: &TenantId,
        filter: ItemFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<ItemResponse>> {
        self.ctx
            .repos
            .items
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(ItemResponse::from))
            .into_envelope("Items retrieved successfully")
    }

    pub async fn set_item_active(
        &self,
        tenant_id: &TenantId,
        id: &ItemId,
        active: bool,
        performed_by: Option<UserId>,
    ) -> ApiResponse<ItemResponse> {
        self.handle_set_active(tenant_id, id, active, performed_by)
            .await
            .map(ItemResponse::from)
            .into_envelope("Item status updated successfully")
    }

    async fn handle_create(&self, cmd: CreateItemCommand) -> AppResult<Item> {
        cmd.validate().map_err(AppError::validation)?;
        let code = BusinessCode::new(cmd.item_code).map_err(OpsError::from)?;

        if self
            .ctx
            .repos
            .items
            .exists_by_code(code.as_str(), &cmd.tenant_id)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Item with code '{}' already exists",
                code
            )));
        }

        let default_density = self.ctx.config.inventory.default_density_g_cm3;
        let spec = cmd.material_spec.map(|s| s.into_spec(default_density));
        let mut item = Item::new(
            cmd.tenant_id,
            code,
            cmd.name.trim().to_string(),
            cmd.category,
            cmd.uom.trim().to_string(),
            spec,
            cmd.performed_by,
        )?;
        item.reorder_level = cmd.reorder_level;

        self.ctx.repos.items.save(&item).await?;
        info!(
            tenant_id = %item.tenant_id,
            item_code = %item.item_code,
            category = ?item.category,
            "Item created"
        );
        Ok(item)
    }

    async fn handle_update(&self, cmd: UpdateItemCommand) -> AppResult<Item> {
        cmd.validate().map_err(AppError::validation)?;
        let mut item = self.ctx.load_item(&cmd.tenant_id, &cmd.item_id).await?;

        if let Some(input) = cmd.material_spec {
            let balances = self
                .ctx
                .repos
                .inventory
                .balances_for_item(&cmd.tenant_id, &item.id)
                .await?;
            if balances.iter().any(|b| !b.level().is_zero()) {
                return Err(AppError::failed_precondition(format!(
                    "Material spec of item {} cannot change while stock exists",
                    item.item_code
                )));
            }
            item.change_spec(input.into_spec(self.ctx.config.inventory.default_density_g_cm3))?;
        }

        if let Some(name) = cmd.name {
            item.name = name.trim().to_string();
        }
        if let Some(uom) = cmd.uom {
            item.uom = uom.trim().to_string();
        }
        if cmd.reorder_level.is_some() {
            item.reorder_level = cmd.reorder_level;
        }

        item.touch(cmd.performed_by);
        self.ctx.repos.items.update(&item).await?;
        info!(tenant_id = %item.tenant_id, item_code = %item.item_code, "Item updated");
        Ok(item)
    }

    async fn handle_set_active(
        &self,
        tenant_id: &TenantId,
        id: &ItemId,
        active: bool,
        performed_by: Option<UserId>,
    ) -> AppResult<Item> {
        let mut item = self.ctx.load_item(tenant_id, id).await?;
        item.set_active(active);
        item.touch(performed_by);
        self.ctx.repos.items.update(&item).await?;

        info!(
            tenant_id = %tenant_id,
            item_code = %item.item_code,
            is_active = active,
            "Item activation changed"
        );
        Ok(item)
    }
}
