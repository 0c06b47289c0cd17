//! 外协加工服务

use std::sync::Arc;

use chrono::NaiveDate;
use mferp_common::{PagedResult, Pagination, TenantId, UserId};
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tracing::info;

use super::commands::*;
use super::dto::OspJobResponse;
use crate::application::context::ServiceContext;
use crate::application::envelope::{ApiResponse, IntoEnvelope};
use crate::application::non_empty;
use crate::domain::ids::OspJobId;
use crate::domain::inventory::{MovementType, PostingRequest, StockDelta};
use crate::domain::numbering::DocumentKind;
use crate::domain::osp::{OspJob, OspJobFilter, OspReceipt};
use crate::infrastructure::observability;

pub struct OspJobService {
    ctx: Arc<ServiceContext>,
}

impl OspJobService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 发出外协，按数量出库
    pub async fn create_osp_job(&self, cmd: CreateOspJobCommand) -> ApiResponse<OspJobResponse> {
        self.handle_create(cmd)
            .await
            .map(OspJobResponse::from)
            .into_envelope("OSP job created successfully")
    }

    /// 外协回收，合格数量入库
    pub async fn receive_osp_job(&self, cmd: ReceiveOspJobCommand) -> ApiResponse<OspJobResponse> {
        self.handle_receive(cmd)
            .await
            .map(OspJobResponse::from)
            .into_envelope("OSP job received successfully")
    }

    pub async fn cancel_osp_job(
        &self,
        tenant_id: &TenantId,
        id: &OspJobId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<OspJobResponse> {
        self.handle_cancel(tenant_id, id, performed_by)
            .await
            .map(OspJobResponse::from)
            .into_envelope("OSP job cancelled successfully")
    }

    pub async fn short_close_osp_job(
        &self,
        tenant_id: &TenantId,
        id: &OspJobId,
        performed_by: Option<UserId>,
    ) -> ApiResponse<OspJobResponse> {
        self.handle_short_close(tenant_id, id, performed_by)
            .await
            .map(OspJobResponse::from)
            .into_envelope("OSP job short closed successfully")
    }

    pub async fn get_osp_job(
        &self,
        tenant_id: &TenantId,
        id: &OspJobId,
    ) -> ApiResponse<OspJobResponse> {
        self.load(tenant_id, id)
            .await
            .map(OspJobResponse::from)
            .into_envelope("OSP job retrieved successfully")
    }

    pub async fn list_osp_jobs(
        &self,
        tenant_id: &TenantId,
        filter: OspJobFilter,
        pagination: Pagination,
    ) -> ApiResponse<PagedResult<OspJobResponse>> {
        self.ctx
            .repos
            .osp_jobs
            .list(tenant_id, filter, self.ctx.page(pagination))
            .await
            .map(|page| page.map(OspJobResponse::from))
            .into_envelope("OSP jobs retrieved successfully")
    }

    /// 超过预计回厂日期仍未结案的加工单（按预计日期升序）
    pub async fn list_overdue_osp_jobs(
        &self,
        tenant_id: &TenantId,
        as_of: NaiveDate,
    ) -> ApiResponse<Vec<OspJobResponse>> {
        self.handle_overdue(tenant_id, as_of)
            .await
            .map(|jobs| jobs.into_iter().map(OspJobResponse::from).collect())
            .into_envelope("Overdue OSP jobs retrieved successfully")
    }

    async fn load(&self, tenant_id: &TenantId, id: &OspJobId) -> AppResult<OspJob> {
        self.ctx
            .repos
            .osp_jobs
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("OSP job {} not found", id)))
    }

    async fn post(
        &self,
        job: &OspJob,
        movement_type: MovementType,
        delta: StockDelta,
        remarks: Option<String>,
        performed_by: Option<UserId>,
    ) -> AppResult<()> {
        let item = self.ctx.load_item(&job.tenant_id, &job.item_id).await?;
        self.ctx
            .post_stock(PostingRequest {
                tenant_id: job.tenant_id.clone(),
                item_id: job.item_id.clone(),
                item_code: item.item_code,
                warehouse_id: job.warehouse_id.clone(),
                movement_type,
                delta,
                reference: Some(job.job_number.clone()),
                remarks,
                performed_by,
            })
            .await?;
        Ok(())
    }

    async fn handle_create(&self, cmd: CreateOspJobCommand) -> AppResult<OspJob> {
        cmd.validate().map_err(AppError::validation)?;

        let vendor = self.ctx.load_vendor(&cmd.tenant_id, &cmd.vendor_id).await?;
        vendor.ensure_can_process()?;
        let item = self.ctx.active_item(&cmd.tenant_id, &cmd.item_id).await?;
        item.ensure_not_raw_material("outsourced processing")?;
        self.ctx.active_warehouse(&cmd.tenant_id, &cmd.warehouse_id).await?;

        let job_number = self
            .ctx
            .numbers
            .next_document_number(&cmd.tenant_id, DocumentKind::OspJob, cmd.sent_on)
            .await?;

        let mut job = OspJob::new(
            cmd.tenant_id,
            job_number,
            cmd.vendor_id,
            cmd.item_id,
            cmd.warehouse_id,
            cmd.process.trim().to_string(),
            cmd.quantity,
            cmd.rate_per_unit,
            cmd.sent_on,
            cmd.expected_return_on,
            cmd.performed_by.clone(),
        );
        job.remarks = non_empty(cmd.remarks);

        self.post(
            &job,
            MovementType::OspDispatch,
            StockDelta::quantity(job.quantity_sent).negate(),
            Some(format!("Sent to {} for {}", vendor.vendor_code, job.process)),
            cmd.performed_by,
        )
        .await?;

        self.ctx.repos.osp_jobs.save(&job).await?;
        observability::record_document_created(DocumentKind::OspJob.as_str());

        info!(
            tenant_id = %job.tenant_id,
            job_number = %job.job_number,
            vendor_code = %vendor.vendor_code,
            item_code = %item.item_code,
            quantity = %job.quantity_sent,
            "OSP job created"
        );
        Ok(job)
    }

    async fn handle_receive(&self, cmd: ReceiveOspJobCommand) -> AppResult<OspJob> {
        cmd.validate().map_err(AppError::validation)?;
        let mut job = self.load(&cmd.tenant_id, &cmd.job_id).await?;
        self.ctx.active_warehouse(&cmd.tenant_id, &job.warehouse_id).await?;

        job.receive(OspReceipt {
            received_on: cmd.received_on,
            quantity_received: cmd.quantity_received,
            quantity_rejected: cmd.quantity_rejected,
            remarks: non_empty(cmd.remarks),
        })?;

        if !cmd.quantity_received.is_zero() {
            self.post(
                &job,
                MovementType::OspReceipt,
                StockDelta::quantity(cmd.quantity_received),
                Some(format!("Received on {}", cmd.received_on)),
                cmd.performed_by.clone(),
            )
            .await?;
        }

        job.touch(cmd.performed_by);
        self.ctx.repos.osp_jobs.update(&job).await?;
        observability::record_osp_receipt(cmd.quantity_rejected);

        info!(
            tenant_id = %job.tenant_id,
            job_number = %job.job_number,
            received = %cmd.quantity_received,
            rejected = %cmd.quantity_rejected,
            pending = %job.pending_quantity(),
            status = ?job.status,
            "OSP job received"
        );
        Ok(job)
    }

    async fn handle_cancel(
        &self,
        tenant_id: &TenantId,
        id: &OspJobId,
        performed_by: Option<UserId>,
    ) -> AppResult<OspJob> {
        let mut job = self.load(tenant_id, id).await?;
        self.ctx.active_warehouse(tenant_id, &job.warehouse_id).await?;
        job.cancel()?;

        // 取消后整单数量退回仓库
        self.post(
            &job,
            MovementType::OspReceipt,
            StockDelta::quantity(job.quantity_sent),
            Some("OSP job cancelled".to_string()),
            performed_by.clone(),
        )
        .await?;

        job.touch(performed_by);
        self.ctx.repos.osp_jobs.update(&job).await?;

        info!(tenant_id = %tenant_id, job_number = %job.job_number, "OSP job cancelled");
        Ok(job)
    }

    async fn handle_short_close(
        &self,
        tenant_id: &TenantId,
        id: &OspJobId,
        performed_by: Option<UserId>,
    ) -> AppResult<OspJob> {
        let mut job = self.load(tenant_id, id).await?;
        let written_off = job.pending_quantity();
        job.short_close()?;
        job.touch(performed_by);
        self.ctx.repos.osp_jobs.update(&job).await?;

        info!(
            tenant_id = %tenant_id,
            job_number = %job.job_number,
            written_off = %written_off,
            "OSP job short closed"
        );
        Ok(job)
    }

    async fn handle_overdue(
        &self,
        tenant_id: &TenantId,
        as_of: NaiveDate,
    ) -> AppResult<Vec<OspJob>> {
        let mut jobs: Vec<OspJob> = self
            .ctx
            .repos
            .osp_jobs
            .find_open(tenant_id)
            .await?
            .into_iter()
            .filter(|job| job.is_overdue(as_of))
            .collect();
        jobs.sort_by_key(|job| job.expected_return_on);
        Ok(jobs)
    }
}
