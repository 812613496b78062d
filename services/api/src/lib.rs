mod cli;
mod infra;
mod report;
mod routes;
mod server;

use crop_yield::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
