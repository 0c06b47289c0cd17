//! 组件发料服务

use std::sync::Arc;

use mferp_common::{PagedResult, Pagination, TenantId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::*;
use super::dto::ComponentIssueResponse;
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::application::non_empty;
use crate::domain::component_issue::{ComponentIssue, ComponentIssueFilter};
use crate::domain::ids::ComponentIssueId;
use crate::domain::inventory::{MovementType, PostingRequest, StockDelta};
use crate::domain::numbering::DocumentKind;
use crate::infrastructure::observability;

pub struct ComponentIssueService {
    ctx: Arc<ServiceContext>,
}

impl ComponentIssueService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 发料出库
    pub async fn issue_component(
        &self,
        cmd: IssueComponentCommand,
    ) -> ApiResponse<ComponentIssueResponse> {
        self.handle_issue(cmd)
            .await
            .map(ComponentIssueResponse::from)
            .into_envelope("Component issued successfully")
    }

    /// 退料入库
    pub async fn return_component(
        &self,
        cmd: ReturnComponentCommand,
    ) -> ApiResponse<ComponentIssueResponse> {
        self.handle_return(cmd)
            .await
            .map(ComponentIssueResponse::from)
            .into_envelope("Component returned successfully")
    }

    pub async fn get_component_issue(
        &self,
        tenant_id: &TenantId,
        id: &ComponentIssueId,
    ) -> ApiResponse<ComponentIssueResponse> {
        self.load(tenant_id, id)
            .await
            .map(ComponentIssueResponse::from)
            .into_envelope("Component issue retrieved successfully")
    }

    pub async fn list_component_issues(
        &self,
        tenant_id: &TenantId,
        filter: ComponentIssueFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<ComponentIssueResponse>> {
        self.ctx
            .repos
            .component_issues
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(ComponentIssueResponse::from))
            .into_envelope("Component issues retrieved successfully")
    }

    async fn load(&self, tenant_id: &TenantId, id: &ComponentIssueId) -> AppResult<ComponentIssue> {
        self.ctx
            .repos
            .component_issues
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Component issue {} not found", id)))
    }

    async fn handle_issue(&self, cmd: IssueComponentCommand) -> AppResult<ComponentIssue> {
        cmd.validate().map_err(AppError::validation)?;
        let item = self.ctx.active_item(&cmd.tenant_id, &cmd.item_id).await?;
        item.ensure_not_raw_material("component issue")?;
        self.ctx.active_warehouse(&cmd.tenant_id, &cmd.warehouse_id).await?;

        let issue_number = self
            .ctx
            .numbers
            .next_document_number(&cmd.tenant_id, DocumentKind::ComponentIssue, cmd.issue_date)
            .await?;

        let issue = ComponentIssue::new(
            cmd.tenant_id,
            issue_number,
            cmd.item_id,
            cmd.warehouse_id,
            cmd.quantity,
            cmd.issued_to.trim().to_string(),
            non_empty(cmd.reference),
            cmd.issue_date,
            non_empty(cmd.remarks),
            cmd.performed_by,
        );

        // 库存不足时过账失败，发料单不落库
        self.ctx
            .post_stock(PostingRequest {
                tenant_id: issue.tenant_id.clone(),
                item_id: item.id.clone(),
                item_code: item.item_code.clone(),
                warehouse_id: issue.warehouse_id.clone(),
                movement_type: MovementType::ComponentIssue,
                delta: StockDelta::quantity(issue.quantity).negate(),
                reference: Some(issue.issue_number.clone()),
                remarks: Some(format!("Issued to {}", issue.issued_to)),
                performed_by: issue.audit_info.created_by.clone(),
            })
            .await?;

        self.ctx.repos.component_issues.save(&issue).await?;
        observability::record_document_created(DocumentKind::ComponentIssue.as_str());

        info!(
            tenant_id = %issue.tenant_id,
            issue_number = %issue.issue_number,
            item_code = %item.item_code,
            quantity = %issue.quantity,
            issued_to = %issue.issued_to,
            "Component issued"
        );
        Ok(issue)
    }

    async fn handle_return(&self, cmd: ReturnComponentCommand) -> AppResult<ComponentIssue> {
        cmd.validate().map_err(AppError::validation)?;
        let mut issue = self.load(&cmd.tenant_id, &cmd.issue_id).await?;
        issue.register_return(cmd.quantity)?;

        let item = self.ctx.load_item(&cmd.tenant_id, &issue.item_id).await?;
        self.ctx.active_warehouse(&cmd.tenant_id, &issue.warehouse_id).await?;

        self.ctx
            .post_stock(PostingRequest {
                tenant_id: cmd.tenant_id.clone(),
                item_id: item.id.clone(),
                item_code: item.item_code.clone(),
                warehouse_id: issue.warehouse_id.clone(),
                movement_type: MovementType::ComponentReturn,
                delta: StockDelta::quantity(cmd.quantity),
                reference: Some(issue.issue_number.clone()),
                remarks: non_empty(cmd.remarks),
                performed_by: cmd.performed_by.clone(),
            })
            .await?;

        issue.touch(cmd.performed_by);
        self.ctx.repos.component_issues.update(&issue).await?;

        info!(
            tenant_id = %issue.tenant_id,
            issue_number = %issue.issue_number,
            returned = %cmd.quantity,
            status = ?issue.status,
            "Component returned"
        );
        Ok(issue)
    }
}
