use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    //client
    pub api_base_url: String,
    pub theme_file: String,
    pub board_log_file: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("listen_port", "5000")?
            .set_default("database_url", "postgres://localhost:5432/job_tracker")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("api_base_url", "http://localhost:5000/api/jobs")?
            .set_default("theme_file", ".job-tracker-theme.json")?
            .set_default("board_log_file", "job-tracker-board.log")?
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
