//! Application layer: service orchestration over repository traits.

pub mod services;
