pub mod auth;
pub mod index;
pub mod not_found;
pub mod signin;
