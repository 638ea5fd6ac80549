mod cli;
mod demo;
mod infra;
mod inventory;
mod routes;
mod server;

use konastone::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
