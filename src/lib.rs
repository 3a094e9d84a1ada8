//! arch-deps library: whole-project class dependency model with concurrent
//! extraction, in-memory queries and flat relation export.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
