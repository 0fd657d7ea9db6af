//! Foodl API service
//!
//! REST surface for users and restaurants. Handlers live in [`controllers`],
//! are wired up in [`routes`], and persist through the store traits in
//! [`repositories`].

pub mod controllers;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod settings;
pub mod state;
pub mod validation;

pub use state::AppState;
