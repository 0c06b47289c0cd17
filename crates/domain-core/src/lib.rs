//! mferp-domain-core - 跨 context 的领域核心抽象

mod entity;

pub use entity::*;

// Re-export common types
pub use mferp_common::{AuditInfo, TenantId, UserId};
