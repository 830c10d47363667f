use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match event_booking::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
