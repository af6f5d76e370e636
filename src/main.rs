mod cmd;
pub mod conf;
mod logging;
pub mod pkg;
mod prelude;

use crate::prelude::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cmd::run().await?;
    Ok(())
}
