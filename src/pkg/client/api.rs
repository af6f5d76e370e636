use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobEntry, JobInput},
    prelude::{Result, TrackerError},
};

/// Remote side of the board: the jobs REST resource.
#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    /// A body that is not a JSON array comes back as an empty list.
    async fn list(&self) -> Result<Vec<JobEntry>>;

    async fn create(&self, job: &JobInput) -> Result<JobEntry>;

    async fn update(&self, id: &str, job: &JobInput) -> Result<JobEntry>;

    async fn remove(&self, id: &str) -> Result<()>;
}

pub struct HttpJobsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobsApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("job-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpJobsApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

fn check(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    tracing::warn!("jobs api responded {}", status);
    Err(TrackerError::Status {
        status: status.as_u16(),
    })
}

/// Accepts only a JSON array; items that don't parse as jobs are dropped.
pub fn ensure_array(body: Value) -> Vec<JobEntry> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<JobEntry>(item) {
                Ok(job) => Some(job),
                Err(e) => {
                    tracing::warn!("skipping malformed job entry: {}", e);
                    None
                }
            })
            .collect(),
        other => {
            tracing::warn!("expected a job array, got {}", other);
            Vec::new()
        }
    }
}

#[async_trait::async_trait]
impl JobsApi for HttpJobsApi {
    async fn list(&self) -> Result<Vec<JobEntry>> {
        let response = self.client.get(&self.base_url).send().await?;
        check(&response)?;
        let body: Value = response.json().await?;
        Ok(ensure_array(body))
    }

    async fn create(&self, job: &JobInput) -> Result<JobEntry> {
        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .json(job)
            .send()
            .await?;
        check(&response)?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, job: &JobInput) -> Result<JobEntry> {
        let response = self
            .client
            .put(self.item_url(id))
            .header(CONTENT_TYPE, "application/json")
            .json(job)
            .send()
            .await?;
        check(&response)?;
        Ok(response.json().await?)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        check(&response)
    }
}
