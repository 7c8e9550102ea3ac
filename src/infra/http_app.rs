use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::clients::user_api::UserApiClient;
use crate::infra::config::Config;
use crate::infra::runtime::mcp_transport;
use crate::tools::mcp_router::UsersSvc;
use crate::tools::registry::ToolRegistry;

fn users_factory(cfg: &Config) -> impl Fn() -> (UsersSvc, crate::tools::mcp_router::UsersRouter) + Send + Sync + Clone + 'static {
    let base = cfg.api_base_url.clone();
    move || {
        let svc = UsersSvc::new(UserApiClient::new(base.clone()));
        (svc, UsersSvc::router())
    }
}

/// Default app: `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default(cfg: &Config) -> Router {
    let session_mgr = Arc::new(mcp_transport::LocalSessionManager::default());
    let mcp_service = mcp_transport::make_streamable_http_service(users_factory(cfg), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// Default app **plus** the deprecated JSON-RPC shim at `/v1/tools`.
pub fn build_app_with_deprecated_api(cfg: &Config, registry: ToolRegistry) -> Router {
    let session_mgr = Arc::new(mcp_transport::LocalSessionManager::default());
    let mcp_service = mcp_transport::make_streamable_http_service(users_factory(cfg), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
        .route("/v1/tools", post(crate::api::mcp::http))
        .with_state(registry)
}
