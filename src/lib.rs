//! LMS authentication: the REST backend (register / login / me) and the
//! client-side form flows that drive it.

pub mod api;
pub mod client;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;
