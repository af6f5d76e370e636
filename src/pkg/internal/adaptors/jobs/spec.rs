use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

use crate::prelude::{Result, TrackerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type)]
#[sqlx(type_name = "job_status")]
pub enum JobStatus {
    #[default]
    Applied,
    Interview,
    Rejected,
    Selected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Rejected,
        JobStatus::Selected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Rejected => "Rejected",
            JobStatus::Selected => "Selected",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TrackerError::Validation(format!("status: unknown value '{}'", s)))
    }
}

/// A stored job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub date: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

/// Job fields as submitted by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct JobInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub company: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub link: String,
}

/// Validated fields ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub date: String,
    pub link: String,
}

impl JobInput {
    pub fn into_new_job(self) -> Result<NewJob> {
        self.validate()?;
        let status = match self.status.as_deref() {
            None | Some("") => JobStatus::default(),
            Some(s) => s.parse()?,
        };
        Ok(NewJob {
            company: self.company,
            position: self.position,
            status,
            date: self.date,
            link: self.link,
        })
    }
}

impl From<&JobEntry> for JobInput {
    fn from(job: &JobEntry) -> Self {
        JobInput {
            company: job.company.clone(),
            position: job.position.clone(),
            status: Some(job.status.to_string()),
            date: job.date.clone(),
            link: job.link.clone(),
        }
    }
}
