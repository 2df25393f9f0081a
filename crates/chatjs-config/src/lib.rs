//! Gateway-parameterized configuration for ChatJS
//!
//! A partial input names an AI gateway (or falls back to
//! [`DEFAULT_GATEWAY`]), is merged over that gateway's defaults, and is
//! validated against a schema whose model identifier fields only accept
//! models the gateway actually serves.

#![allow(clippy::must_use_candidate)]

pub mod ai;
pub mod app;
pub mod defaults;
mod env;
pub mod error;
mod loader;
pub mod merge;
pub mod registry;
mod resolve;
pub mod schema;

pub use ai::*;
pub use app::*;
pub use defaults::{app_defaults, default_table, defaults_for};
pub use env::ExpandError;
pub use error::*;
pub use loader::{InputFormat, load_input};
pub use merge::merge;
pub use registry::*;
pub use resolve::{global, init, resolve, validate, verify_defaults};
pub use schema::{Field, Schema, config_schema, schema_for};
