use std::sync::Arc;

use uuid::Uuid;

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{JobEntry, JobInput},
        store::JobStore,
    },
    prelude::{Result, TrackerError},
};

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobStore>,
}

/// Ids are opaque to callers; anything that isn't one of ours cannot exist.
fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        tracing::warn!("malformed job id {}", id);
        TrackerError::NotFound
    })
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        JobService { store }
    }

    pub async fn list(&self) -> Result<Vec<JobEntry>> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<JobEntry> {
        let id = parse_id(id)?;
        self.store.find_by_id(id).await?.ok_or(TrackerError::NotFound)
    }

    pub async fn create(&self, input: JobInput) -> Result<JobEntry> {
        let job = input.into_new_job()?;
        let entry = self.store.create(&job).await?;
        tracing::info!("created job {} at {}", entry.id, &entry.company);
        Ok(entry)
    }

    pub async fn update(&self, id: &str, input: JobInput) -> Result<JobEntry> {
        let job = input.into_new_job()?;
        let id = parse_id(id)?;
        let entry = self
            .store
            .find_by_id_and_update(id, &job)
            .await?
            .ok_or(TrackerError::NotFound)?;
        tracing::info!("updated job {} to {}", entry.id, entry.status);
        Ok(entry)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        self.store
            .find_by_id_and_delete(id)
            .await?
            .ok_or(TrackerError::NotFound)?;
        tracing::info!("deleted job {}", id);
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::{adaptors::jobs::spec::JobStatus, store::MemoryJobStore};

    fn service() -> JobService {
        JobService::new(Arc::new(MemoryJobStore::new()))
    }

    fn input(status: Option<&str>) -> JobInput {
        JobInput {
            company: "Foo".into(),
            position: "Engineer".into(),
            status: status.map(String::from),
            date: "2024-01-01".into(),
            link: "http://x".into(),
        }
    }

    #[tokio::test]
    async fn create_then_list_contains_exactly_one_match() {
        let svc = service();
        let created = svc.create(input(Some("Applied"))).await.unwrap();

        let all = svc.list().await.unwrap();
        let matching: Vec<_> = all.iter().filter(|j| j.id == created.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].company, "Foo");
        assert_eq!(matching[0].status, JobStatus::Applied);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let svc = service();
        let created = svc.create(input(None)).await.unwrap();
        let mut changed = input(Some("Interview"));
        changed.position = "Staff Engineer".into();

        let updated = svc.update(&created.id.to_string(), changed).await.unwrap();
        let fetched = svc.get(&created.id.to_string()).await.unwrap();
        assert_eq!(updated, fetched);
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.position, "Staff Engineer");
        assert_eq!(fetched.status, JobStatus::Interview);
    }

    #[tokio::test]
    async fn update_with_empty_field_changes_nothing() {
        let svc = service();
        let created = svc.create(input(None)).await.unwrap();
        let mut changed = input(None);
        changed.company = String::new();

        let err = svc.update(&created.id.to_string(), changed).await.unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(svc.get(&created.id.to_string()).await.unwrap(), created);
    }

    #[tokio::test]
    async fn remove_twice_is_not_found() {
        let svc = service();
        let created = svc.create(input(None)).await.unwrap();
        let id = created.id.to_string();

        svc.remove(&id).await.unwrap();
        assert!(svc.list().await.unwrap().iter().all(|j| j.id != created.id));
        assert!(matches!(svc.remove(&id).await, Err(TrackerError::NotFound)));
    }

    #[tokio::test]
    async fn unknown_or_malformed_ids_are_not_found() {
        let svc = service();
        svc.create(input(None)).await.unwrap();

        let unknown = Uuid::new_v4().to_string();
        assert!(matches!(svc.update(&unknown, input(None)).await, Err(TrackerError::NotFound)));
        assert!(matches!(svc.remove("not-an-id").await, Err(TrackerError::NotFound)));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }
}
