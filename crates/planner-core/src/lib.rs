//! Shared building blocks for the planner workspace: configuration, route
//! constants, the core error type and the clock abstraction.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
