//! Request handlers, one module per resource

pub mod restaurant;
pub mod user;
