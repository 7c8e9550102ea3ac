use std::future::Future;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, JsonObject};

use crate::clients::user_api::{ApiError, UserApiClient};
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::users::json_text;

/// The MCP tool surface: four user operations, each a single text content
/// block. Validation failures are protocol errors raised before any backend
/// call; backend failures come back in-band as failed tool results so one
/// bad invocation never takes the serving loop down.
#[derive(Clone)]
pub struct UsersSvc {
    client: UserApiClient,
}

impl UsersSvc {
    pub fn new(client: UserApiClient) -> Self {
        Self { client }
    }
}

impl ServerHandler for UsersSvc {}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn failure_result(e: &ApiError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("{}: {}", e.kind(), e))])
}

fn require_str(obj: &JsonObject, field: &str) -> Result<String, rmcp::ErrorData> {
    match obj.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_owned()),
        Some(_) => Err(rmcp::ErrorData::invalid_params(
            format!("'{field}' must be a non-empty string"),
            None,
        )),
        None => Err(rmcp::ErrorData::invalid_params(
            format!("missing required field: {field}"),
            None,
        )),
    }
}

#[rmcp::tool_router]
impl UsersSvc {
    #[rmcp::tool(name = "list-users", description = "Retrieve all users from the user API")]
    async fn list_users(&self) -> Result<CallToolResult, rmcp::ErrorData> {
        match self.client.list_users().await {
            Ok(users) => Ok(text_result(json_text(&users))),
            Err(e) => Ok(failure_result(&e)),
        }
    }

    #[rmcp::tool(
        name = "get-users-by-name",
        description = "Retrieve users by name from the user API"
    )]
    async fn get_users_by_name(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let name = require_str(&params.0, "name")?;
        match self.client.list_users_by_name(&name).await {
            Ok(users) => Ok(text_result(json_text(&users))),
            Err(e) => Ok(failure_result(&e)),
        }
    }

    #[rmcp::tool(
        name = "get-user-by-id",
        description = "Retrieve user by id from the user API"
    )]
    async fn get_user_by_id(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let id = require_str(&params.0, "id")?;
        match self.client.get_user_by_id(&id).await {
            Ok(user) => Ok(text_result(json_text(&user))),
            Err(e) => Ok(failure_result(&e)),
        }
    }

    #[rmcp::tool(
        name = "register-user",
        description = "Register a new user in the user API"
    )]
    async fn register_user(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let name = require_str(&params.0, "name")?;
        let email = require_str(&params.0, "email")?;
        match self.client.create_user(&name, &email).await {
            Ok(user) => Ok(text_result(format!(
                "User created successfully: {}",
                json_text(&user)
            ))),
            Err(e) => Ok(failure_result(&e)),
        }
    }
}

pub type UsersRouter = ToolRouter<UsersSvc>;

impl UsersSvc {
    pub fn router() -> UsersRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn svc(base: impl Into<String>) -> UsersSvc {
        UsersSvc::new(UserApiClient::new(base))
    }

    fn params(v: serde_json::Value) -> Parameters<JsonObject> {
        Parameters(v.as_object().unwrap().clone())
    }

    fn result_json(res: &CallToolResult) -> serde_json::Value {
        serde_json::to_value(res).unwrap()
    }

    #[test]
    fn router_exposes_all_four_tools() {
        let names: Vec<String> = UsersSvc::router()
            .into_iter()
            .map(|r| r.name().to_string())
            .collect();
        for expected in [
            "list-users",
            "get-users-by-name",
            "get-user-by-id",
            "register-user",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}, got: {names:?}");
        }
    }

    #[tokio::test]
    async fn list_users_returns_backend_array_as_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(
                json!({"success":true,"data":[{"id":"1","name":"Ana","email":"ana@x.com"}]}),
            );
        });

        let res = svc(server.base_url()).list_users().await.unwrap();
        let v = result_json(&res);
        assert_eq!(
            v["content"][0]["text"],
            r#"[{"id":"1","name":"Ana","email":"ana@x.com"}]"#
        );
        assert_ne!(v["isError"], json!(true));
    }

    #[tokio::test]
    async fn missing_name_is_invalid_params_without_backend_call() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!({"success":true,"data":[]}));
        });

        let err = svc(server.base_url())
            .get_users_by_name(params(json!({})))
            .await
            .unwrap_err();
        // JSON-RPC invalid params is -32602
        assert_eq!(err.code.0, -32602);
        assert!(err.message.contains("missing required field: name"));
        m.assert_hits(0);
    }

    #[tokio::test]
    async fn blank_id_is_invalid_params() {
        let err = svc("http://localhost:0")
            .get_user_by_id(params(json!({"id":"   "})))
            .await
            .unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(err.message.contains("'id' must be a non-empty string"));
    }

    #[tokio::test]
    async fn unknown_id_is_a_failed_tool_result_not_a_crash() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/999");
            then.status(404)
                .json_body(json!({"success":false,"message":"User not found"}));
        });

        let res = svc(server.base_url())
            .get_user_by_id(params(json!({"id":"999"})))
            .await
            .unwrap();
        let v = result_json(&res);
        assert_eq!(v["isError"], json!(true));
        let text = v["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("not-found:"), "got: {text}");
    }

    #[tokio::test]
    async fn register_user_embeds_created_user_in_message() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/users")
                .json_body(json!({"name":"Ana","email":"ana@x.com"}));
            then.status(201).json_body(
                json!({"success":true,"data":{"id":"u-42","name":"Ana","email":"ana@x.com"}}),
            );
        });

        let res = svc(server.base_url())
            .register_user(params(json!({"name":"Ana","email":"ana@x.com"})))
            .await
            .unwrap();
        m.assert_hits(1);
        let v = result_json(&res);
        let text = v["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("User created successfully: "));
        assert!(text.contains(r#""id":"u-42""#));
    }

    #[tokio::test]
    async fn backend_outage_is_a_failed_tool_result() {
        let res = svc("http://127.0.0.1:1").list_users().await.unwrap();
        let v = result_json(&res);
        assert_eq!(v["isError"], json!(true));
        let text = v["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("transport:"), "got: {text}");
    }
}
