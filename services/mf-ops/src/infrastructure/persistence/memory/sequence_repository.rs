//! 序列号内存仓储

use std::collections::HashMap;

use async_trait::async_trait;
use mferp_common::TenantId;
use mferp_errors::AppResult;
use tokio::sync::Mutex;

use crate::domain::numbering::SequenceRepository;

pub struct InMemorySequenceRepository {
    counters: Mutex<HashMap<(TenantId, String), u64>>,
}

impl InMemorySequenceRepository {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySequenceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SequenceRepository for InMemorySequenceRepository {
    async fn next_value(&self, tenant_id: &TenantId, key: &str) -> AppResult<u64> {
        let mut counters = self.counters.lock().await;
        let counter = counters
            .entry((tenant_id.clone(), key.to_string()))
            .or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequences_are_per_tenant_and_key() {
        let repo = InMemorySequenceRepository::new();
        let a = TenantId::new();
        let b = TenantId::new();

        assert_eq!(repo.next_value(&a, "po").await.unwrap(), 1);
        assert_eq!(repo.next_value(&a, "po").await.unwrap(), 2);
        assert_eq!(repo.next_value(&a, "ci").await.unwrap(), 1);
        assert_eq!(repo.next_value(&b, "po").await.unwrap(), 1);
    }
}
