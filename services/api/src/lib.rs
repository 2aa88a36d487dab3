mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use klima360::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
