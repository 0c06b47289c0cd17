//! 单据编号生成

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mferp_common::TenantId;
use mferp_config::NumberingConfig;
use mferp_errors::AppResult;

/// 序列号仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// 取下一个序列值（从 1 开始，每个 key 独立递增）
    async fn next_value(&self, tenant_id: &TenantId, key: &str) -> AppResult<u64>;
}

/// 单据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PurchaseOrder,
    ComponentIssue,
    OpeningStock,
    OspJob,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::ComponentIssue => "component_issue",
            Self::OpeningStock => "opening_stock",
            Self::OspJob => "osp_job",
        }
    }
}

/// 单据编号生成器
///
/// - 单据：`{PREFIX}-{YYYYMM}-{seq}`，按租户、前缀、月份独立计数
/// - 供应商：`{PREFIX}-{seq}`
/// - 物料件：`{ITEM_CODE}-{seq}`，按物料独立计数
pub struct DocumentNumberGenerator {
    sequences: Arc<dyn SequenceRepository>,
    config: NumberingConfig,
}

impl DocumentNumberGenerator {
    pub fn new(sequences: Arc<dyn SequenceRepository>, config: NumberingConfig) -> Self {
        Self { sequences, config }
    }

    fn prefix(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::PurchaseOrder => &self.config.purchase_order_prefix,
            DocumentKind::ComponentIssue => &self.config.component_issue_prefix,
            DocumentKind::OpeningStock => &self.config.opening_stock_prefix,
            DocumentKind::OspJob => &self.config.osp_job_prefix,
        }
    }

    pub async fn next_document_number(
        &self,
        tenant_id: &TenantId,
        kind: DocumentKind,
        date: NaiveDate,
    ) -> AppResult<String> {
        let prefix = self.prefix(kind);
        let period = date.format("%Y%m").to_string();
        let key = format!("{}:{}:{}", kind.as_str(), prefix, period);
        let seq = self.sequences.next_value(tenant_id, &key).await?;

        Ok(format!(
            "{}-{}-{:0width$}",
            prefix,
            period,
            seq,
            width = self.config.sequence_width
        ))
    }

    pub async fn next_vendor_code(&self, tenant_id: &TenantId) -> AppResult<String> {
        let prefix = &self.config.vendor_prefix;
        let seq = self
            .sequences
            .next_value(tenant_id, &format!("vendor:{}", prefix))
            .await?;

        Ok(format!(
            "{}-{:0width$}",
            prefix,
            seq,
            width = self.config.sequence_width
        ))
    }

    pub async fn next_piece_number(
        &self,
        tenant_id: &TenantId,
        item_code: &str,
    ) -> AppResult<String> {
        let seq = self
            .sequences
            .next_value(tenant_id, &format!("piece:{}", item_code))
            .await?;

        Ok(format!(
            "{}-{:0width$}",
            item_code,
            seq,
            width = self.config.piece_sequence_width
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_document_number_format() {
        let mut sequences = MockSequenceRepository::new();
        sequences
            .expect_next_value()
            .with(always(), eq("purchase_order:PO:202603"))
            .times(1)
            .returning(|_, _| Ok(7));

        let generator =
            DocumentNumberGenerator::new(Arc::new(sequences), NumberingConfig::default());
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let number = generator
            .next_document_number(&TenantId::new(), DocumentKind::PurchaseOrder, date)
            .await
            .unwrap();

        assert_eq!(number, "PO-202603-0007");
    }

    #[tokio::test]
    async fn test_vendor_and_piece_numbers() {
        let mut sequences = MockSequenceRepository::new();
        sequences
            .expect_next_value()
            .with(always(), eq("vendor:VND"))
            .returning(|_, _| Ok(12));
        sequences
            .expect_next_value()
            .with(always(), eq("piece:RM-EN8-32"))
            .returning(|_, _| Ok(3));

        let generator =
            DocumentNumberGenerator::new(Arc::new(sequences), NumberingConfig::default());
        let tenant = TenantId::new();

        assert_eq!(generator.next_vendor_code(&tenant).await.unwrap(), "VND-0012");
        assert_eq!(
            generator.next_piece_number(&tenant, "RM-EN8-32").await.unwrap(),
            "RM-EN8-32-00003"
        );
    }
}
