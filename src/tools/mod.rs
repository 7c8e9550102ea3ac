pub mod mcp_router;
pub mod registry;
pub mod users;
