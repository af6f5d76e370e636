use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    pkg::{
        internal::adaptors::jobs::{
            mutators::JobMutator,
            selectors::JobSelector,
            spec::{JobEntry, NewJob},
        },
        server::state::GetTxn,
    },
    prelude::Result,
};

/// Record store holding job entries keyed by a store-assigned id.
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    /// Newest first.
    async fn find_all(&self) -> Result<Vec<JobEntry>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobEntry>>;

    async fn create(&self, job: &NewJob) -> Result<JobEntry>;

    async fn find_by_id_and_update(&self, id: Uuid, job: &NewJob) -> Result<Option<JobEntry>>;

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<JobEntry>>;

    async fn ping(&self) -> Result<()>;
}

pub struct PgJobStore {
    pool: Arc<PgPool>,
}

impl PgJobStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgJobStore { pool }
    }
}

#[async_trait::async_trait]
impl JobStore for PgJobStore {
    async fn find_all(&self) -> Result<Vec<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut *conn).get_all().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut *conn).get_by_id(id).await
    }

    async fn create(&self, job: &NewJob) -> Result<JobEntry> {
        let mut tx = self.pool.begin_txn().await?;
        let entry = JobMutator::new(&mut *tx).create(job).await?;
        tx.commit().await?;
        tracing::debug!("inserted job {}", entry.id);
        Ok(entry)
    }

    async fn find_by_id_and_update(&self, id: Uuid, job: &NewJob) -> Result<Option<JobEntry>> {
        let mut tx = self.pool.begin_txn().await?;
        let entry = JobMutator::new(&mut *tx).update(id, job).await?;
        tx.commit().await?;
        Ok(entry)
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<JobEntry>> {
        let mut tx = self.pool.begin_txn().await?;
        let entry = JobMutator::new(&mut *tx).delete(id).await?;
        tx.commit().await?;
        Ok(entry)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&*self.pool).await?;
        Ok(())
    }
}

/// In-process store; entries are kept in insertion order.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<JobEntry>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl JobStore for MemoryJobStore {
    async fn find_all(&self) -> Result<Vec<JobEntry>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobEntry>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn create(&self, job: &NewJob) -> Result<JobEntry> {
        let entry = JobEntry {
            id: Uuid::new_v4(),
            company: job.company.clone(),
            position: job.position.clone(),
            status: job.status,
            date: job.date.clone(),
            link: job.link.clone(),
            created_at: Utc::now(),
        };
        self.jobs.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_id_and_update(&self, id: Uuid, job: &NewJob) -> Result<Option<JobEntry>> {
        let mut jobs = self.jobs.write().await;
        let Some(entry) = jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        entry.company = job.company.clone();
        entry.position = job.position.clone();
        entry.status = job.status;
        entry.date = job.date.clone();
        entry.link = job.link.clone();
        Ok(Some(entry.clone()))
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<JobEntry>> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs
            .iter()
            .position(|j| j.id == id)
            .map(|idx| jobs.remove(idx)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::adaptors::jobs::spec::JobStatus;

    fn new_job(company: &str) -> NewJob {
        NewJob {
            company: company.into(),
            position: "Engineer".into(),
            status: JobStatus::Applied,
            date: "2024-01-01".into(),
            link: "http://x".into(),
        }
    }

    #[tokio::test]
    async fn memory_store_lists_newest_first() {
        let store = MemoryJobStore::new();
        store.create(&new_job("first")).await.unwrap();
        store.create(&new_job("second")).await.unwrap();

        let all = store.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|j| j.company.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn memory_store_update_keeps_identity() {
        let store = MemoryJobStore::new();
        let created = store.create(&new_job("Foo")).await.unwrap();
        let mut changed = new_job("Bar");
        changed.status = JobStatus::Selected;

        let updated = store
            .find_by_id_and_update(created.id, &changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.company, "Bar");
        assert_eq!(updated.status, JobStatus::Selected);
    }

    #[tokio::test]
    async fn memory_store_unknown_id_is_none() {
        let store = MemoryJobStore::new();
        store.create(&new_job("Foo")).await.unwrap();
        let id = Uuid::new_v4();

        assert!(store.find_by_id_and_update(id, &new_job("x")).await.unwrap().is_none());
        assert!(store.find_by_id_and_delete(id).await.unwrap().is_none());
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
