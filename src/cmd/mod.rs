use crate::{
    conf::settings,
    logging,
    pkg::{board, server::listen},
    prelude::Result,
};
use clap::{Parser, Subcommand};

mod migrate;

#[derive(Parser)]
#[command(about = "tracks job applications: REST backend and terminal board")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the jobs API
    Listen {
        /// Keep records in process memory instead of postgres
        #[arg(long)]
        in_memory: bool,
    },
    Migrate,
    /// Open the terminal board against a running API
    Board {
        #[arg(long)]
        api: Option<String>,
    },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen { in_memory }) => {
            logging::init_stdout();
            listen(in_memory).await?;
        }
        Some(SubCommandType::Migrate) => {
            logging::init_stdout();
            migrate::apply().await?;
        }
        Some(SubCommandType::Board { api }) => {
            logging::init_file(&settings.board_log_file)?;
            let api = api.unwrap_or_else(|| settings.api_base_url.clone());
            board::run(&api, &settings.theme_file).await?;
        }
        None => {
            logging::init_stdout();
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
