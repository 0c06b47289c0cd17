//! 采购订单服务

use std::sync::Arc;

use mferp_common::{PagedResult, Pagination, TenantId, UserId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::*;
use super::dto::{PurchaseOrderResponse, PurchaseReceiptResponse};
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::application::intake::{RawMaterialIntake, plan_raw_pieces, receive_raw_material};
use crate::application::non_empty;
use crate::domain::ids::PurchaseOrderId;
use crate::domain::inventory::{MovementType, PostingRequest, StockDelta};
use crate::domain::item::Item;
use crate::domain::material_piece::{PieceDimensions, PieceSource};
use crate::domain::numbering::DocumentKind;
use crate::domain::purchase_order::{PurchaseOrder, PurchaseOrderFilter, PurchaseOrderLine};
use crate::infrastructure::observability;

pub struct PurchaseOrderService {
    ctx: Arc<ServiceContext>,
}

impl PurchaseOrderService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn create_purchase_order(
        &self,
        cmd: CreatePurchaseOrderCommand,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.handle_create(cmd)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order created successfully")
    }

    pub async fn update_purchase_order(
        &self,
        cmd: UpdatePurchaseOrderCommand,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.handle_update(cmd)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order updated successfully")
    }

    pub async fn approve_purchase_order(
        &self,
        tenant_id: &TenantId,
        id: &PurchaseOrderId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.transition(tenant_id, id, performed_by, "approved", PurchaseOrder::approve)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order approved successfully")
    }

    /// 收货入库
    pub async fn receive_purchase_order(
        &self,
        cmd: ReceivePurchaseOrderCommand,
    ) -> ApiResponse<PurchaseReceiptResponse> {
        self.handle_receive(cmd)
            .await
            .into_envelope("Purchase order received successfully")
    }

    pub async fn cancel_purchase_order(
        &self,
        tenant_id: &TenantId,
        id: &PurchaseOrderId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.transition(tenant_id, id, performed_by, "cancelled", PurchaseOrder::cancel)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order cancelled successfully")
    }

    /// 结案（部分收货的订单短交结案）
    pub async fn close_purchase_order(
        &self,
        tenant_id: &TenantId,
        id: &PurchaseOrderId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.transition(tenant_id, id, performed_by, "closed", PurchaseOrder::close)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order closed successfully")
    }

    pub async fn delete_purchase_order(
        &self,
        tenant_id: &TenantId,
        id: &PurchaseOrderId,
    ) -> ApiResponse<()> {
        self.handle_delete(tenant_id, id)
            .await
            .into_envelope("Purchase order deleted successfully")
    }

    pub async fn get_purchase_order(
        &self,
        tenant_id: &TenantId,
        id: &PurchaseOrderId,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.load(tenant_id, id)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order retrieved successfully")
    }

    pub async fn get_purchase_order_by_number(
        &self,
        tenant_id: &TenantId,
        po_number: &str,
    ) -> ApiResponse<PurchaseOrderResponse> {
        self.handle_get_by_number(tenant_id, po_number)
            .await
            .map(PurchaseOrderResponse::from)
            .into_envelope("Purchase order retrieved successfully")
    }

    pub async fn list_purchase_orders(
        &self,
        tenant_id: &TenantId,
        filter: PurchaseOrderFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<PurchaseOrderResponse>> {
        self.ctx
            .repos
            .purchase_orders
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(PurchaseOrderResponse::from))
            .into_envelope("Purchase orders retrieved successfully")
    }

    async fn load(&self, tenant_id: &TenantId, id: &PurchaseOrderId) -> AppResult<PurchaseOrder> {
        self.ctx
            .repos
            .purchase_orders
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Purchase order {} not found", id)))
    }

    async fn handle_get_by_number(
        &self,
        tenant_id: &TenantId,
        po_number: &str,
    ) -> AppResult<PurchaseOrder> {
        self.ctx
            .repos
            .purchase_orders
            .find_by_number(po_number.trim(), tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Purchase order {} not found", po_number)))
    }

    /// 校验物料并生成订单行
    async fn build_lines(
        &self,
        tenant_id: &TenantId,
        inputs: Vec<PurchaseOrderLineInput>,
    ) -> AppResult<Vec<PurchaseOrderLine>> {
        let mut lines = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.into_iter().enumerate() {
            self.ctx.active_item(tenant_id, &input.item_id).await?;
            lines.push(PurchaseOrderLine::new(
                index as u32 + 1,
                input.item_id,
                input.quantity,
                input.unit_price,
                input.tax_percent,
            ));
        }
        Ok(lines)
    }

    async fn handle_create(&self, cmd: CreatePurchaseOrderCommand) -> AppResult<PurchaseOrder> {
        cmd.validate().map_err(AppError::validation)?;

        let vendor = self.ctx.load_vendor(&cmd.tenant_id, &cmd.vendor_id).await?;
        vendor.ensure_can_supply()?;
        self.ctx.active_warehouse(&cmd.tenant_id, &cmd.warehouse_id).await?;
        let lines = self.build_lines(&cmd.tenant_id, cmd.lines).await?;

        let po_number = self
            .ctx
            .numbers
            .next_document_number(&cmd.tenant_id, DocumentKind::PurchaseOrder, cmd.order_date)
            .await?;

        let order = PurchaseOrder::new(
            cmd.tenant_id,
            po_number,
            cmd.vendor_id,
            cmd.warehouse_id,
            cmd.order_date,
            cmd.expected_date,
            lines,
            non_empty(cmd.notes),
            cmd.performed_by,
        );

        self.ctx.repos.purchase_orders.save(&order).await?;
        observability::record_document_created(DocumentKind::PurchaseOrder.as_str());

        info!(
            tenant_id = %order.tenant_id,
            po_number = %order.po_number,
            vendor_code = %vendor.vendor_code,
            grand_total = %order.grand_total,
            "Purchase order created"
        );
        Ok(order)
    }

    async fn handle_update(&self, cmd: UpdatePurchaseOrderCommand) -> AppResult<PurchaseOrder> {
        cmd.validate().map_err(AppError::validation)?;
        let mut order = self.load(&cmd.tenant_id, &cmd.po_id).await?;

        validate_dates(order.order_date, cmd.expected_date.or(order.expected_date))
            .map_err(AppError::validation)?;
        let lines = match cmd.lines {
            Some(inputs) => Some(self.build_lines(&cmd.tenant_id, inputs).await?),
            None => None,
        };

        order.revise(cmd.expected_date, lines, non_empty(cmd.notes))?;
        order.touch(cmd.performed_by);
        self.ctx.repos.purchase_orders.update(&order).await?;

        info!(tenant_id = %order.tenant_id, po_number = %order.po_number, "Purchase order updated");
        Ok(order)
    }

    async fn transition(
        &self,
        tenant_id: &TenantId,
        id: &PurchaseOrderId,
        performed_by: Option<UserId>,
        label: &str,
        apply: fn(&mut PurchaseOrder) -> Result<(), crate::error::OpsError>,
    ) -> AppResult<PurchaseOrder> {
        let mut order = self.load(tenant_id, id).await?;
        apply(&mut order)?;
        order.touch(performed_by);
        self.ctx.repos.purchase_orders.update(&order).await?;

        info!(
            tenant_id = %tenant_id,
            po_number = %order.po_number,
            status = ?order.status,
            "Purchase order {}", label
        );
        Ok(order)
    }

    async fn handle_receive(
        &self,
        cmd: ReceivePurchaseOrderCommand,
    ) -> AppResult<PurchaseReceiptResponse> {
        cmd.validate().map_err(AppError::validation)?;
        let order = self.load(&cmd.tenant_id, &cmd.po_id).await?;
        order.ensure_receivable()?;
        self.ctx.active_warehouse(&cmd.tenant_id, &order.warehouse_id).await?;

        // 先在副本上校验全部收货行并完成拆件，避免部分过账
        let mut updated = order.clone();
        let mut plan: Vec<(ReceiptLineInput, Item, Option<Vec<PieceDimensions>>)> =
            Vec::with_capacity(cmd.receipts.len());
        for receipt in cmd.receipts {
            let line = order.line(receipt.line_no).ok_or_else(|| {
                AppError::validation(format!(
                    "Purchase order {} has no line {}",
                    order.po_number, receipt.line_no
                ))
            })?;
            let item = self.ctx.load_item(&cmd.tenant_id, &line.item_id).await?;
            let dimensions = if item.is_raw_material() {
                Some(plan_raw_pieces(
                    &self.ctx,
                    &item,
                    receipt.quantity,
                    receipt.weight_kg,
                    receipt.length_per_piece_mm,
                )?)
            } else {
                None
            };
            updated.receive_line(receipt.line_no, receipt.quantity)?;
            plan.push((receipt, item, dimensions));
        }

        let mut piece_numbers = Vec::new();
        for (receipt, item, dimensions) in plan {
            if let Some(dimensions) = dimensions {
                let pieces = receive_raw_material(
                    &self.ctx,
                    RawMaterialIntake {
                        tenant_id: &cmd.tenant_id,
                        item: &item,
                        warehouse_id: &order.warehouse_id,
                        dimensions,
                        heat_number: non_empty(receipt.heat_number),
                        source: PieceSource::PurchaseReceipt,
                        source_ref: &order.po_number,
                        movement_type: MovementType::PurchaseReceipt,
                        performed_by: cmd.performed_by.clone(),
                    },
                )
                .await?;
                piece_numbers.extend(pieces.into_iter().map(|p| p.piece_number));
            } else {
                self.ctx
                    .post_stock(PostingRequest {
                        tenant_id: cmd.tenant_id.clone(),
                        item_id: item.id.clone(),
                        item_code: item.item_code.clone(),
                        warehouse_id: order.warehouse_id.clone(),
                        movement_type: MovementType::PurchaseReceipt,
                        delta: StockDelta::quantity(receipt.quantity),
                        reference: Some(order.po_number.clone()),
                        remarks: Some(format!("Received on {}", cmd.received_on)),
                        performed_by: cmd.performed_by.clone(),
                    })
                    .await?;
            }
        }

        updated.refresh_receipt_status();
        updated.touch(cmd.performed_by);
        self.ctx.repos.purchase_orders.update(&updated).await?;

        info!(
            tenant_id = %updated.tenant_id,
            po_number = %updated.po_number,
            status = ?updated.status,
            pieces = piece_numbers.len(),
            "Purchase order received"
        );
        Ok(PurchaseReceiptResponse {
            order: updated.into(),
            piece_numbers,
        })
    }

    async fn handle_delete(&self, tenant_id: &TenantId, id: &PurchaseOrderId) -> AppResult<()> {
        let order = self.load(tenant_id, id).await?;
        order.ensure_deletable()?;
        self.ctx.repos.purchase_orders.delete(id, tenant_id).await?;

        info!(tenant_id = %tenant_id, po_number = %order.po_number, "Purchase order deleted");
        Ok(())
    }
}
