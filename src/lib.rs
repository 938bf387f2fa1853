//! authco: authorization subrequest endpoint for reverse proxies (`auth_request`).
//!
//! The proxy forwards the original request's metadata here; `/dev/auth/`
//! answers 200 with `X-Auth-User` / `X-Auth-Groups` to allow, or a non-2xx
//! status to deny.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
