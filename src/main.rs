use std::process::ExitCode;

use user_mcp_gateway::{cli, infra};

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();

    // Any subcommand runs the admin CLI instead of the gateway itself.
    if std::env::args().nth(1).is_some() {
        return cli::run().await;
    }

    match infra::boot::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "failed to start user-mcp-gateway");
            ExitCode::FAILURE
        }
    }
}
