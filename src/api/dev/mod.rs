/*
 * Responsibility
 * - /dev/... endpoints: the auth_request surface a reverse proxy talks to
 * - re-export routes() and the not-found fallback
 */
pub mod dto;
pub mod handlers;
pub mod response;
mod routes;

pub use handlers::not_found::not_found;
pub use routes::routes;
