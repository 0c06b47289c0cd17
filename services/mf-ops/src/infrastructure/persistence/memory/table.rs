//! 内存表：按租户隔离的实体存储

use std::collections::HashMap;
use std::hash::Hash;

use mferp_common::TenantId;
use mferp_domain_core::AggregateRoot;
use mferp_errors::{AppError, AppResult};
use tokio::sync::RwLock;

struct TableInner<E: AggregateRoot> {
    next_seq: u64,
    /// (插入序号, 实体)
    rows: HashMap<E::Id, (u64, E)>,
}

pub(crate) struct MemoryTable<E: AggregateRoot> {
    name: &'static str,
    inner: RwLock<TableInner<E>>,
}

impl<E> MemoryTable<E>
where
    E: AggregateRoot + Clone + Send + Sync,
    E::Id: Eq + Hash + Clone + Send + Sync + std::fmt::Display,
{
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(TableInner {
                next_seq: 0,
                rows: HashMap::new(),
            }),
        }
    }

    pub(crate) async fn insert(&self, entity: &E) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if inner.rows.contains_key(entity.id()) {
            return Err(AppError::conflict(format!(
                "{} {} already exists",
                self.name,
                entity.id()
            )));
        }
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.rows.insert(entity.id().clone(), (seq, entity.clone()));
        Ok(())
    }

    pub(crate) async fn replace(&self, entity: &E) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(entity.id()) {
            Some((_, existing)) if existing.tenant_id() == entity.tenant_id() => {
                *existing = entity.clone();
                Ok(())
            }
            _ => Err(AppError::not_found(format!("{} {} not found", self.name, entity.id()))),
        }
    }

    pub(crate) async fn upsert(&self, entity: &E) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if let Some((_, existing)) = inner.rows.get_mut(entity.id()) {
            *existing = entity.clone();
            return Ok(());
        }
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.rows.insert(entity.id().clone(), (seq, entity.clone()));
        Ok(())
    }

    pub(crate) async fn remove(&self, id: &E::Id, tenant_id: &TenantId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .rows
            .get(id)
            .is_some_and(|(_, e)| e.tenant_id() == tenant_id);
        if !owned {
            return Err(AppError::not_found(format!("{} {} not found", self.name, id)));
        }
        inner.rows.remove(id);
        Ok(())
    }

    pub(crate) async fn get(&self, id: &E::Id, tenant_id: &TenantId) -> Option<E> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(id)
            .filter(|(_, e)| e.tenant_id() == tenant_id)
            .map(|(_, e)| e.clone())
    }

    pub(crate) async fn find<P>(&self, tenant_id: &TenantId, predicate: P) -> Option<E>
    where
        P: Fn(&E) -> bool,
    {
        let inner = self.inner.read().await;
        inner
            .rows
            .values()
            .map(|(_, e)| e)
            .find(|e| e.tenant_id() == tenant_id && predicate(*e))
            .cloned()
    }

    pub(crate) async fn any<P>(&self, tenant_id: &TenantId, predicate: P) -> bool
    where
        P: Fn(&E) -> bool,
    {
        self.find(tenant_id, predicate).await.is_some()
    }

    /// 按插入顺序倒序（最新在前）
    pub(crate) async fn select<P>(&self, tenant_id: &TenantId, predicate: P) -> Vec<E>
    where
        P: Fn(&E) -> bool,
    {
        let inner = self.inner.read().await;
        let mut rows: Vec<&(u64, E)> = inner
            .rows
            .values()
            .filter(|(_, e)| e.tenant_id() == tenant_id && predicate(e))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.into_iter().map(|(_, e)| e.clone()).collect()
    }
}
