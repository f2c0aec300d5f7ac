use cucumber::{given, then, when};
use serde_json::{Value, json};

use crate::TodosWorld;
use crate::steps::web_steps::{http_delete, http_get, http_patch, http_post, parse_last_response};

fn todo_id(world: &TodosWorld, alias: &str) -> i64 {
    *world
        .todo_ids
        .get(alias)
        .unwrap_or_else(|| panic!("no todo with alias '{alias}'"))
}

/// Create a todo via the API and remember its id under `alias`.
async fn api_create_todo(world: &mut TodosWorld, alias: &str, content: &str) {
    let (status, body_text) = http_post(world, "/todos/", json!({ "content": content })).await;
    assert_eq!(
        status, 200,
        "expected 200 from POST /todos/ but got {status}: {body_text}"
    );
    let json: Value = serde_json::from_str(&body_text)
        .unwrap_or_else(|e| panic!("POST /todos/ response is not valid JSON: {e}\n{body_text}"));
    let id = json["id"]
        .as_i64()
        .unwrap_or_else(|| panic!("POST /todos/ response has no integer 'id': {json}"));
    world.todo_ids.insert(alias.to_string(), id);
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given(expr = "I created a todo with content {string} as {string}")]
async fn i_created_a_todo(world: &mut TodosWorld, content: String, alias: String) {
    api_create_todo(world, &alias, &content).await;
}

#[given(expr = "I created {int} todos")]
async fn i_created_n_todos(world: &mut TodosWorld, count: usize) {
    for i in 1..=count {
        api_create_todo(world, &format!("todo-{i}"), &format!("todo number {i}")).await;
    }
}

#[given(expr = "I deleted the todo {string}")]
async fn i_deleted_the_todo(world: &mut TodosWorld, alias: String) {
    let id = todo_id(world, &alias);
    let (status, body) = http_delete(world, &format!("/todos/{id}")).await;
    assert_eq!(status, 200, "expected 200 from DELETE /todos/{id} but got {status}: {body}");
}

// ---------------------------------------------------------------------------
// When steps — alias-based HTTP verbs
// ---------------------------------------------------------------------------

#[when(expr = "I GET the todo {string}")]
async fn i_get_the_todo(world: &mut TodosWorld, alias: String) {
    let id = todo_id(world, &alias);
    http_get(world, &format!("/todos/{id}")).await;
}

#[when(expr = "I PATCH the todo {string} with content {string}")]
async fn i_patch_the_todo(world: &mut TodosWorld, alias: String, content: String) {
    let id = todo_id(world, &alias);
    http_patch(world, &format!("/todos/{id}"), json!({ "content": content })).await;
}

#[when(expr = "I DELETE the todo {string}")]
async fn i_delete_the_todo(world: &mut TodosWorld, alias: String) {
    let id = todo_id(world, &alias);
    http_delete(world, &format!("/todos/{id}")).await;
}

#[when("I list the todos")]
async fn i_list_the_todos(world: &mut TodosWorld) {
    http_get(world, "/todos/").await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

/// Assert the response is the todo stored under `alias` with the given content.
#[then(expr = "the response is the todo {string} with content {string}")]
async fn the_response_is_the_todo(world: &mut TodosWorld, alias: String, content: String) {
    let id = todo_id(world, &alias);
    let actual = parse_last_response(world);
    assert_eq!(
        actual,
        json!({ "id": id, "content": content }),
        "unexpected todo body"
    );
}

#[then(expr = "the todo list contains content {string}")]
async fn the_todo_list_contains(world: &mut TodosWorld, content: String) {
    let json = parse_last_response(world);
    let todos = json
        .as_array()
        .unwrap_or_else(|| panic!("expected response body to be a JSON array but got: {json}"));
    let found = todos
        .iter()
        .any(|t| t["content"].as_str() == Some(content.as_str()));
    assert!(
        found,
        "expected todo list to contain '{content}' but got:\n{}",
        serde_json::to_string_pretty(todos).unwrap_or_default()
    );
}

#[then(expr = "the todo list does not contain the todo {string}")]
async fn the_todo_list_does_not_contain(world: &mut TodosWorld, alias: String) {
    let id = todo_id(world, &alias);
    let json = parse_last_response(world);
    let todos = json
        .as_array()
        .unwrap_or_else(|| panic!("expected response body to be a JSON array but got: {json}"));
    assert!(
        !todos.iter().any(|t| t["id"].as_i64() == Some(id)),
        "expected todo '{alias}' (id {id}) to be absent from the list"
    );
}

// ---------------------------------------------------------------------------
// Large payloads
// ---------------------------------------------------------------------------

#[when(expr = "I POST a todo whose content is {int} bytes long")]
async fn i_post_a_large_todo(world: &mut TodosWorld, len: usize) {
    let content = "x".repeat(len);
    http_post(world, "/todos/", json!({ "content": content })).await;
}

/// Remember the todo in the last response under `alias`.
#[when(expr = "I remember the response todo as {string}")]
async fn i_remember_the_response_todo(world: &mut TodosWorld, alias: String) {
    let json = parse_last_response(world);
    let id = json["id"]
        .as_i64()
        .unwrap_or_else(|| panic!("response has no integer 'id': {json}"));
    world.todo_ids.insert(alias, id);
}

#[then(expr = "the response todo content is {int} bytes long")]
async fn the_response_todo_content_is_n_bytes(world: &mut TodosWorld, len: usize) {
    let json = parse_last_response(world);
    let content = json["content"]
        .as_str()
        .unwrap_or_else(|| panic!("response has no string 'content'"));
    assert_eq!(content.len(), len);
    assert!(content.bytes().all(|b| b == b'x'));
}
