use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::user_api::UserApiClient;
use crate::domain::{Tool, ToolError};
use crate::tools::users::{GetUserByIdTool, GetUsersByNameTool, ListUsersTool, RegisterUserTool};

#[derive(Clone)]
pub struct ToolRegistry {
    by_name: Arc<HashMap<&'static str, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut map: HashMap<&'static str, Arc<dyn Tool>> = HashMap::new();
        for t in iter.into_iter() {
            map.insert(t.name(), t);
        }
        Self { by_name: Arc::new(map) }
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.by_name
            .values()
            .map(|t| ToolMeta {
                name: t.name(),
                title: t.title(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub async fn call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let t = self
            .by_name
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        t.call(args).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

/// Build the full registry over one shared client.
pub fn build_registry(client: &UserApiClient) -> ToolRegistry {
    ToolRegistry::with_tools([
        Arc::new(ListUsersTool::new(client.clone())) as Arc<dyn Tool>,
        Arc::new(GetUsersByNameTool::new(client.clone())),
        Arc::new(GetUserByIdTool::new(client.clone())),
        Arc::new(RegisterUserTool::new(client.clone())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn registry_lists_all_four_operations() {
        let reg = build_registry(&UserApiClient::new("http://localhost:0"));
        let mut names: Vec<_> = reg.list().into_iter().map(|m| m.name).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "get-user-by-id",
                "get-users-by-name",
                "list-users",
                "register-user"
            ]
        );
    }

    #[test]
    fn metas_carry_title_and_schema() {
        let reg = build_registry(&UserApiClient::new("http://localhost:0"));
        let meta = reg
            .list()
            .into_iter()
            .find(|m| m.name == "get-users-by-name")
            .unwrap();
        assert_eq!(meta.title, "Retrieve users by name tool");
        assert_eq!(meta.input_schema["required"][0], "name");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let reg = build_registry(&UserApiClient::new("http://localhost:0"));
        let err = reg.call("does.not.exist", &json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
        assert!(err.to_string().contains("does.not.exist"));
    }

    #[tokio::test]
    async fn registry_dispatches_to_the_named_tool() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!({"success":true,"data":[]}));
        });

        let reg = build_registry(&UserApiClient::new(server.base_url()));
        let out = reg.call("list-users", &json!({})).await.unwrap();
        assert_eq!(out["content"][0]["text"], "[]");
    }
}
