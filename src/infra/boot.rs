use std::net::SocketAddr;

use crate::clients::user_api::UserApiClient;
use crate::infra::config::Config;
use crate::tools::mcp_router::UsersSvc;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        api_base_url = %cfg.api_base_url,
        deprecate_rest = cfg.deprecate_rest,
        "BOOT user-mcp-gateway"
    );

    // Stdio mode: run MCP over stdio ONLY (no HTTP).
    if cfg.mode == "stdio" {
        let base = cfg.api_base_url.clone();
        let factory = move || {
            let svc = UsersSvc::new(UserApiClient::new(base));
            (svc, UsersSvc::router())
        };
        crate::infra::runtime::mcp_transport::serve_stdio(factory)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = if cfg.deprecate_rest {
        crate::infra::http_app::build_app_default(&cfg)
    } else {
        let registry =
            crate::tools::registry::build_registry(&UserApiClient::new(cfg.api_base_url.clone()));
        crate::infra::http_app::build_app_with_deprecated_api(&cfg, registry)
    };

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
