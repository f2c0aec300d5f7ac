/// SQLite store, per-request sessions, schema migration.
pub mod db;
/// Data types: Todo and request/response bodies.
pub mod models;
/// Axum-based web server and router.
pub mod web;
