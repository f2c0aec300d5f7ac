use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted todo row. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    pub id: i64,
    pub content: String,
}

/// Request body accepted by create and update.
///
/// `content` is required; an empty string is accepted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TodoInput {
    pub content: String,
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Deleted {
    #[schema(value_type = String)]
    pub message: &'static str,
}

impl Deleted {
    pub const OK: Deleted = Deleted {
        message: "Todo Deleted Successfully",
    };
}

/// Liveness payload served at `/`: `{"Hello":"World"}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Greeting {
    #[serde(rename = "Hello")]
    #[schema(value_type = String)]
    pub hello: &'static str,
}

impl Greeting {
    pub const WORLD: Greeting = Greeting { hello: "World" };
}

/// Error body shared by every failure response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}
