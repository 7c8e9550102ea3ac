use async_trait::async_trait;
use serde_json::json;

use crate::clients::user_api::UserApiClient;
use crate::domain::{Tool, ToolError};

/// Wrap serialized output as the single text content block every tool returns.
fn text_content(text: String) -> serde_json::Value {
    json!({ "content": [ { "type": "text", "text": text } ] })
}

/// Serialize a payload to compact JSON preserving field order.
/// User payloads are plain string fields; this cannot fail.
pub(crate) fn json_text<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).expect("serialize user payload")
}

/// Extract a required non-empty string argument. Runs before any backend
/// call; a failure here must not produce an HTTP request.
fn require_str<'a>(args: &'a serde_json::Value, field: &str) -> Result<&'a str, ToolError> {
    match args.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(ToolError::Validation(format!(
            "'{field}' must be a non-empty string"
        ))),
        None => Err(ToolError::Validation(format!(
            "missing required field: {field}"
        ))),
    }
}

#[derive(Clone)]
pub struct ListUsersTool {
    client: UserApiClient,
}

impl ListUsersTool {
    pub fn new(client: UserApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUsersTool {
    fn name(&self) -> &'static str {
        "list-users"
    }
    fn title(&self) -> &'static str {
        "Retrieve all users tool"
    }
    fn description(&self) -> &'static str {
        "Retrieve all users from the user API"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({ "type":"object", "properties": {}, "required": [] })
    }
    async fn call(&self, _arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let users = self.client.list_users().await?;
        Ok(text_content(json_text(&users)))
    }
}

#[derive(Clone)]
pub struct GetUsersByNameTool {
    client: UserApiClient,
}

impl GetUsersByNameTool {
    pub fn new(client: UserApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetUsersByNameTool {
    fn name(&self) -> &'static str {
        "get-users-by-name"
    }
    fn title(&self) -> &'static str {
        "Retrieve users by name tool"
    }
    fn description(&self) -> &'static str {
        "Retrieve users by name from the user API"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
          "type":"object",
          "properties": { "name": { "type":"string", "minLength": 1 } },
          "required": ["name"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let name = require_str(arguments, "name")?;
        let users = self.client.list_users_by_name(name).await?;
        Ok(text_content(json_text(&users)))
    }
}

#[derive(Clone)]
pub struct GetUserByIdTool {
    client: UserApiClient,
}

impl GetUserByIdTool {
    pub fn new(client: UserApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetUserByIdTool {
    fn name(&self) -> &'static str {
        "get-user-by-id"
    }
    fn title(&self) -> &'static str {
        "Retrieve user by id tool"
    }
    fn description(&self) -> &'static str {
        "Retrieve user by id from the user API"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
          "type":"object",
          "properties": { "id": { "type":"string", "minLength": 1 } },
          "required": ["id"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let id = require_str(arguments, "id")?;
        let user = self.client.get_user_by_id(id).await?;
        Ok(text_content(json_text(&user)))
    }
}

#[derive(Clone)]
pub struct RegisterUserTool {
    client: UserApiClient,
}

impl RegisterUserTool {
    pub fn new(client: UserApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RegisterUserTool {
    fn name(&self) -> &'static str {
        "register-user"
    }
    fn title(&self) -> &'static str {
        "Register a new user tool"
    }
    fn description(&self) -> &'static str {
        "Register a new user in the user API"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
          "type":"object",
          "properties": {
            "name": { "type":"string", "minLength": 1 },
            "email": { "type":"string", "minLength": 1 }
          },
          "required": ["name", "email"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let name = require_str(arguments, "name")?;
        let email = require_str(arguments, "email")?;
        let user = self.client.create_user(name, email).await?;
        Ok(text_content(format!(
            "User created successfully: {}",
            json_text(&user)
        )))
    }
}
