//! OpenAPI document published at `/openapi.json`.
//!
//! Paths and schemas are derived from the handler annotations; only the
//! advertised server URL is filled in at startup, so the document can point
//! at a tunnel or public host instead of the bind address.

use utoipa::OpenApi;
use utoipa::openapi::server::ServerBuilder;

use super::handlers;
use crate::models::{Deleted, ErrorDetail, Greeting, Todo, TodoInput};

/// Title advertised in the document's `info` block.
pub const API_TITLE: &str = "Fast API with DB TODO APP";
/// Version advertised in the document's `info` block.
pub const API_VERSION: &str = "0.0.1";
/// Server URL advertised when none is configured.
pub const DEFAULT_PUBLIC_URL: &str = "http://0.0.0.0:8888";

#[derive(OpenApi)]
#[openapi(
    info(title = "Fast API with DB TODO APP", version = "0.0.1"),
    paths(
        handlers::root,
        handlers::list_todos,
        handlers::create_todo,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(Todo, TodoInput, Deleted, Greeting, ErrorDetail))
)]
struct ApiDoc;

/// Build the document, advertising `public_url` as the development server.
pub fn document(public_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![
        ServerBuilder::new()
            .url(public_url)
            .description(Some("Development Server"))
            .build(),
    ]);
    doc
}
