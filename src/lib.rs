//! Matrix shooter (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benches share a single import path:
//! `matrix_shooter::{core,engine,adapter,term,input,types}`.

pub use matrix_shooter_adapter as adapter;
pub use matrix_shooter_core as core;
pub use matrix_shooter_engine as engine;
pub use matrix_shooter_input as input;
pub use matrix_shooter_term as term;
pub use matrix_shooter_types as types;
