use std::sync::Arc;

use sqlx::{PgPool, Pool, Postgres, Transaction, postgres::PgPoolOptions};

use crate::{
    conf::settings,
    pkg::internal::{
        jobs::JobService,
        store::{JobStore, MemoryJobStore, PgJobStore},
    },
    prelude::Result,
};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[async_trait::async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait::async_trait]
impl GetTxn for PgPool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub jobs: JobService,
}

impl AppState {
    pub fn new(in_memory: bool) -> Result<AppState> {
        let store: Arc<dyn JobStore> = if in_memory {
            tracing::warn!("using in-memory job store, records will not survive a restart");
            Arc::new(MemoryJobStore::new())
        } else {
            Arc::new(PgJobStore::new(Arc::new(db_pool()?)))
        };
        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<dyn JobStore>) -> AppState {
        AppState {
            jobs: JobService::new(store),
        }
    }
}
