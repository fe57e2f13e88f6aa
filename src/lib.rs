//! A lightweight JSONPath query and mutation engine.
//!
//! This crate compiles textual path expressions like `$.store.book[0].title`
//! into an AST of path components, resolves them against an in-memory
//! `serde_json::Value` tree, and reports every matching location as a value,
//! a canonical re-parseable path string, or both. On top of the read surface
//! it supports writing through paths: replace-in-place assignment that
//! auto-creates missing intermediate containers, functional transforms over
//! all matches, and structural deletion.

pub mod ast;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod handlers;
mod mutation;
mod parser;

// --- Public API ---
pub use ast::{AppliedNode, Key, MemberTest, Node, Path, PathComponent, Scope, SubscriptTest};
pub use engine::{IntoPath, PathEngine};
pub use error::PathError;
pub use parser::parse_path;
