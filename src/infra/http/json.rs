use axum::Json;

use crate::clients::user_api::ApiError;
use crate::core::mcp::{err as rpc_err, ok as rpc_ok, RpcErr, RpcResp};
use crate::domain::ToolError;

pub fn ok(id: serde_json::Value, result: serde_json::Value) -> Json<RpcResp> {
    Json(rpc_ok(id, result))
}

pub fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Json<RpcResp> {
    Json(rpc_err(id, code, message, None))
}

pub fn parse_error(message: impl Into<String>) -> Json<RpcResp> {
    Json(RpcResp {
        jsonrpc: "2.0",
        id: serde_json::Value::Null,
        result: None,
        error: Some(RpcErr {
            code: -32700,
            message: message.into(),
            data: None,
        }),
    })
}

/// Map a ToolError onto its JSON-RPC error code: invalid arguments and
/// unknown tools are invalid-params, not-found gets its own code so hosts
/// can render it, everything else is a generic tool failure.
pub fn from_tool_error(id: serde_json::Value, err: &ToolError) -> Json<RpcResp> {
    let code = match err {
        ToolError::Validation(_) | ToolError::UnknownTool(_) => -32602,
        ToolError::Api(ApiError::NotFound) => -32001,
        ToolError::Api(_) => -32000,
    };
    error(id, code, err.to_string())
}
