//! Vault graph MCP tool surface.
//!
//! Request/result records live in `schemas`, the `rmcp` router in `dispatch`, and one
//! handler per tool under `dispatch::router`.

pub mod catalog;
mod dispatch;
mod schemas;

pub use dispatch::VaultGraphService;
