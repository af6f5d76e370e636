use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, NewJob};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &NewJob) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (company, position, status, date, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, company, position, status, date, link, created_at
            "#,
        )
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.status)
        .bind(&job.date)
        .bind(&job.link)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrites every mutable field; id and created_at are left alone.
    pub async fn update(&mut self, id: Uuid, job: &NewJob) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs
            SET company = $2, position = $3, status = $4, date = $5, link = $6
            WHERE id = $1
            RETURNING id, company, position, status, date, link, created_at
            "#,
        )
        .bind(id)
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.status)
        .bind(&job.date)
        .bind(&job.link)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "DELETE FROM jobs WHERE id = $1
             RETURNING id, company, position, status, date, link, created_at",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }
}
