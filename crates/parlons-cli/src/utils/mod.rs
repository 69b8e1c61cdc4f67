//! Small terminal helpers shared by handlers.

pub mod input;
